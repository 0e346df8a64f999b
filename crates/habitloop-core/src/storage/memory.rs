//! In-memory store for tests.

use std::sync::{Arc, Mutex};

use super::{GroupMap, Store};
use crate::error::StoreError;

/// In-memory store. Clones share the same backing state, so a test can hand
/// one clone to a registry and inspect (or reload) through another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    groups: GroupMap,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed, for asserting write-through behavior.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<GroupMap, StoreError> {
        Ok(self.lock().groups.clone())
    }

    fn save(&self, groups: &GroupMap) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.groups = groups.clone();
        inner.save_count += 1;
        Ok(())
    }
}
