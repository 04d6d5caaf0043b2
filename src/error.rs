//! Error type for the event source and command-line layer.
//!
//! The grid, bucketing, overflow and navigation functions are total and never
//! return these.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid event data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::InvalidArgument(msg)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
