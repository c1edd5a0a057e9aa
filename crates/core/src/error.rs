use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum IfchartError {
    #[error("config error: {0}")]
    Config(String),

    #[error("link error: {0}")]
    Link(String),

    #[error("system error: {0}")]
    System(String),

    #[error("decode error: {0}")]
    Decode(#[from] SnapshotError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = IfchartError> = std::result::Result<T, E>;
