// Runtime configuration.
// Credentials, team, cache root, and API base are resolved once and passed to constructors.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::{EsaError, Result};

pub const TOKEN_VAR: &str = "ESA_TOKEN";
pub const TEAM_VAR: &str = "ESA_TEAM";
pub const CACHE_DIR_VAR: &str = "ESA_CACHE_DIR";
pub const API_BASE_VAR: &str = "ESA_API_BASE";

/// Default esa API host.
pub const DEFAULT_API_BASE: &str = "https://api.esa.io";

/// Directory name of the cache under the home directory.
const CACHE_DIR_NAME: &str = ".kyuujiki";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent with every request.
    pub token: String,
    /// Team subdomain, e.g. `docs` for docs.esa.io.
    pub team: String,
    /// Root of the on-disk response cache.
    pub cache_dir: PathBuf,
    /// API base URL without a trailing slash.
    pub api_base: String,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(EsaError::MissingEnv(key))
        };

        let token = required(TOKEN_VAR)?;
        let team = required(TEAM_VAR)?;

        let cache_dir = match lookup(CACHE_DIR_VAR).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_cache_dir().ok_or(EsaError::NoHomeDir)?,
        };

        let api_base = lookup(API_BASE_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token,
            team,
            cache_dir,
            api_base,
        })
    }
}

/// Get the default cache directory (~/.kyuujiki).
pub fn default_cache_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CACHE_DIR_NAME))
}
