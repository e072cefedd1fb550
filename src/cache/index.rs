// In-memory cache index.
// Parses the categories file and post pages from disk, eagerly or per category on demand.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{EsaError, Result};
use crate::esa::{CategoriesResponse, Category, PostPage};

use super::paths::{self, CategoryHash};
use super::store::CacheStore;

/// Pages of one category keyed by page number.
pub type PageMap = BTreeMap<u32, PostPage>;

/// Category tree plus every post page read from the cache.
#[derive(Debug, Clone)]
pub struct CacheIndex {
    /// Synthetic root of the category tree.
    pub categories: Category,
    posts: HashMap<CategoryHash, PageMap>,
}

impl CacheIndex {
    /// Read the whole cache: categories plus every category's pages.
    pub fn load(store: &CacheStore) -> Result<Self> {
        let mut index = Self::open(store)?;

        let posts_root = paths::posts_root(store.root());
        for entry in read_dir_or_empty(&posts_root)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            index.ensure_scanned(store, &CategoryHash::from_dir_name(name))?;
        }

        Ok(index)
    }

    /// Read only the categories file; post pages are scanned per category on first use.
    pub fn open(store: &CacheStore) -> Result<Self> {
        let path = store.categories_path();
        if !path.is_file() {
            return Err(EsaError::MissingCache(path));
        }

        let response: CategoriesResponse = parse_file(&path)?;
        Ok(Self {
            categories: response.into_root(),
            posts: HashMap::new(),
        })
    }

    /// Scan a category's page directory unless it was already scanned.
    pub fn ensure_scanned(&mut self, store: &CacheStore, hash: &CategoryHash) -> Result<()> {
        if self.posts.contains_key(hash) {
            return Ok(());
        }

        let dir = paths::category_dir(store.root(), hash);
        let mut pages = PageMap::new();
        for entry in read_dir_or_empty(&dir)? {
            let path = entry.path();
            let page = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u32>().ok())
                .ok_or_else(|| EsaError::InvalidPageFile(path.clone()))?;
            pages.insert(page, parse_file(&path)?);
        }

        debug!(category = %hash, pages = pages.len(), "scanned category cache");
        self.posts.insert(hash.clone(), pages);
        Ok(())
    }

    /// Re-read a single page from disk, typically right after fetching it.
    pub fn reload_page(
        &mut self,
        store: &CacheStore,
        hash: &CategoryHash,
        page: u32,
    ) -> Result<()> {
        let parsed: PostPage = parse_file(&store.path_for(hash, page))?;
        self.posts.entry(hash.clone()).or_default().insert(page, parsed);
        Ok(())
    }

    /// Cached page, if present in the index.
    pub fn page(&self, hash: &CategoryHash, page: u32) -> Option<&PostPage> {
        self.posts.get(hash).and_then(|pages| pages.get(&page))
    }

    /// Check if a page is present in the index.
    pub fn has_page(&self, hash: &CategoryHash, page: u32) -> bool {
        self.page(hash, page).is_some()
    }

    /// All indexed pages of a category.
    pub fn pages(&self, hash: &CategoryHash) -> Option<&PageMap> {
        self.posts.get(hash)
    }

    /// Number of categories with at least a scanned page directory.
    pub fn category_count(&self) -> usize {
        self.posts.len()
    }
}

/// Parse a cache file as JSON, tagging failures with the file path.
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read(path)?;
    serde_json::from_slice(&contents).map_err(|source| EsaError::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// List a directory, treating a missing directory as empty.
fn read_dir_or_empty(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    match fs::read_dir(dir) {
        Ok(entries) => Ok(entries.collect::<std::io::Result<Vec<_>>>()?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
