use thiserror::Error;

use crate::shape::ShapeId;

/// A history entry that no longer matches the scene it is replayed against.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("shape {0} is not in the scene")]
    ShapeNotFound(ShapeId),
    #[error("no stroke at index {0}")]
    StrokeNotFound(usize),
}

/// Errors raised while loading a pad configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
