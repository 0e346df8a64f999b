//! Flat-file JSON group state storage.
//!
//! The whole group map is serialized to one JSON document. Writes go through
//! a temp file followed by a rename so a crash mid-write cannot corrupt the
//! previous state.

use std::io;
use std::path::PathBuf;

use super::{data_dir, GroupMap, Store};
use crate::error::StoreError;

/// JSON file store for group state.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store state at `~/.config/habitloop/habitloop.json`.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::Io {
            path: "~/.config/habitloop".into(),
            source,
        })?;
        Ok(Self::at(dir.join("habitloop.json")))
    }

    /// Store state at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<GroupMap, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            // First run: no file yet.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GroupMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save(&self, groups: &GroupMap) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(groups)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, blob).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
