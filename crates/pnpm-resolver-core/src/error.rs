use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pnpm-deps-resolver.
///
/// Resolution itself never fails: manifest problems are carried as
/// [`Error::ManifestRead`]/[`Error::ManifestParse`] values only long enough
/// to be logged and turned into trace warnings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid anchor directory {path}")]
    InvalidAnchor { path: PathBuf },

    #[error("Failed to read package.json at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing package.json at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
