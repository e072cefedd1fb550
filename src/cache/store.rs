// Cache store for reading and writing raw API responses.
// Every operation goes straight to the filesystem; parsed data lives in the index.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

use super::paths::{self, CategoryHash};

/// Content-addressed store rooted at the cache directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the categories cache file.
    pub fn categories_path(&self) -> PathBuf {
        paths::categories_path(&self.root)
    }

    /// Deterministic path of a cached page.
    pub fn path_for(&self, hash: &CategoryHash, page: u32) -> PathBuf {
        paths::page_path(&self.root, hash, page)
    }

    /// Check if the categories response is cached.
    pub fn exists_categories(&self) -> bool {
        self.categories_path().is_file()
    }

    /// Check if a page for the category hash is cached.
    pub fn exists_page(&self, hash: &CategoryHash, page: u32) -> bool {
        self.path_for(hash, page).is_file()
    }

    /// Write a payload, creating parent directories and replacing any existing file.
    pub fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(bytes)?;
        file.flush()?;

        debug!(path = %path.display(), len = bytes.len(), "wrote cache file");
        Ok(())
    }

    /// Read a cached file's raw bytes.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    /// Delete the entire cache root.
    pub fn flush(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                debug!(root = %self.root.display(), "flushed cache");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
