use std::path::PathBuf;
use thiserror::Error;

/// Main error type for preprocessing operations
#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File {path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Malformed chunk: {0}")]
    Structure(String),

    #[error("Cannot read filter list {path}: {source}")]
    FilterList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
