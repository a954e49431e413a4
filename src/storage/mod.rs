//! Persistent storage
//!
//! Durable client-side state: the key-value store backing the session and the settings file.

pub mod kv;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Environment variable that relocates the data directory
pub const DATA_DIR_ENV: &str = "CAREBOOK_DATA_DIR";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine the application data directory")]
    NoDataDir,
}

/// Resolve the directory holding settings and the session file.
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    directories::ProjectDirs::from("org", "carebook", "Carebook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
