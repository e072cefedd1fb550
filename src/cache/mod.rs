// Cache module for local filesystem caching.
// Stores raw esa API responses and indexes them for offline browsing.

#![allow(dead_code)]

pub mod index;
pub mod paths;
pub mod store;

pub use index::CacheIndex;
pub use paths::CategoryHash;
pub use store::CacheStore;
