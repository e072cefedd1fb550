// Cache path utilities.
// Constructs filesystem paths for the cache hierarchy: one categories file plus posts/<hash>/<page>.

use std::fmt;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};

/// File name of the cached categories response.
pub const CATEGORIES_FILE: &str = "cache_categories.json";

/// Directory holding one subdirectory per category hash.
pub const POSTS_DIR: &str = "posts";

/// Filesystem-safe key for a category path string (hex SHA-1 of its UTF-8 bytes).
///
/// The same value names the cache directory and keys the in-memory index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryHash(String);

impl CategoryHash {
    /// Hash a category path exactly as given (no normalization).
    pub fn of(category: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(category.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Wrap a directory name found on disk.
    pub fn from_dir_name(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to the categories cache file.
pub fn categories_path(root: &Path) -> PathBuf {
    root.join(CATEGORIES_FILE)
}

/// Path to the directory holding every category's pages.
pub fn posts_root(root: &Path) -> PathBuf {
    root.join(POSTS_DIR)
}

/// Path to a category's page directory.
pub fn category_dir(root: &Path, hash: &CategoryHash) -> PathBuf {
    posts_root(root).join(hash.as_str())
}

/// Path to one cached page: root/posts/<hash>/<page>.
pub fn page_path(root: &Path, hash: &CategoryHash, page: u32) -> PathBuf {
    category_dir(root, hash).join(page.to_string())
}
