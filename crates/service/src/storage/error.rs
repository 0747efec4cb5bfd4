//! Errors raised by storage engines.

use std::path::PathBuf;

use thiserror::Error;

/// A storage engine could not load or flush objects.
///
/// Always distinct from "not found": lookups never fail, only persistence does.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error during file operations.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage file exists but cannot be decoded.
    #[error("corrupt storage file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Error serializing objects.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database driver error.
    #[error("database error: {0}")]
    Db(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Corrupt { path: path.into(), message: message.into() }
    }
}

impl From<sea_orm::DbErr> for StorageError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }
}
