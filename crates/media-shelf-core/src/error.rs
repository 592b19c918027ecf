use std::path::PathBuf;
use thiserror::Error;

/// Failures of the persistence layer.
///
/// Absence is never an error: a missing library file or a missing collection
/// key reads as an empty collection. Everything here is a real failure the
/// caller has to see.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage document {} is not a valid key-value document: {source}", path.display())]
    CorruptDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("value stored under '{key}' is not a valid media collection: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage lock poisoned by a panicked writer")]
    Poisoned,
}

/// Failures while reading or writing import/export files.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(String),

    #[error("unknown exchange format '{0}' (expected json or csv)")]
    UnknownFormat(String),

    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
