// Error types for the esa CLI.
// Covers configuration, esa API, and cache errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EsaError {
    #[error("Missing {0} environment variable")]
    MissingEnv(&'static str),

    #[error("ESA_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("Could not determine the home directory for the cache")]
    NoHomeDir,

    #[error("esa API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("No cached data at {}, fetch categories first", .0.display())]
    MissingCache(PathBuf),

    #[error("Malformed cache file {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cache page file name is not a page number: {}", .0.display())]
    InvalidPageFile(PathBuf),

    #[error("'{0}' not found")]
    CategoryNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EsaError>;
