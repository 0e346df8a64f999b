//! Persistence for group state and application configuration.
//!
//! The engine is persistence-agnostic: everything goes through the [`Store`]
//! trait, which loads and saves the full group map. Three backends are
//! provided: SQLite (default), a flat JSON file, and an in-memory store for
//! tests.

mod config;
pub mod database;
pub mod file;
pub mod memory;

pub use config::{Config, ProgressConfig, StorageBackend, StorageConfig};
pub use database::SqliteStore;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{CoreError, StoreError};
use crate::registry::GroupState;

/// The persisted shape: group id -> group state.
pub type GroupMap = BTreeMap<String, GroupState>;

/// Durable persistence of group state.
///
/// `load` fails with [`StoreError::Corrupt`] if the backing bytes cannot be
/// parsed; the caller falls back to an empty registry. `save` failures must
/// be surfaced -- in-memory state is not authoritative until a save succeeds.
pub trait Store: Send {
    fn load(&self) -> Result<GroupMap, StoreError>;
    fn save(&self, groups: &GroupMap) -> Result<(), StoreError>;
}

/// Returns `~/.config/habitloop[-dev]/` based on HABITLOOP_ENV.
///
/// Set HABITLOOP_ENV=dev to use the development data directory, or
/// HABITLOOP_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    if let Ok(dir) = std::env::var("HABITLOOP_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitloop-dev")
    } else {
        base_dir.join("habitloop")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Open the store selected by `config`.
pub fn open_store(config: &Config) -> Result<Box<dyn Store>, CoreError> {
    let store: Box<dyn Store> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open()?),
        StorageBackend::Json => Box::new(JsonFileStore::open()?),
    };
    Ok(store)
}
