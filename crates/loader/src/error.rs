use std::path::PathBuf;

use thiserror::Error;

/// Why a replay could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid replay data at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("replay has no map header")]
    MissingMap,

    #[error("replay contains no frames")]
    NoFrames,

    #[error("loader runtime failed to start: {0}")]
    Runtime(#[source] std::io::Error),
}
