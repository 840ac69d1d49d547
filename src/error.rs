//! Error types for the I/O boundary
//!
//! Geometry, collision and store operations are total and never fail; only
//! configuration loading and the results file can.

use std::path::PathBuf;

/// Crate error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error on the config or results file
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config parsed but holds unusable values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A results line is not `name,score`
    #[error("Malformed results record on line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
