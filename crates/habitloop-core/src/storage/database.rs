//! SQLite-backed group state storage.
//!
//! One row per group in a `groups` table, with the state serialized as JSON.
//! Whole-group write granularity inside a single transaction; a busy timeout
//! bounds store I/O so a locked database surfaces as an error instead of
//! blocking indefinitely.

use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection};

use super::{data_dir, GroupMap, Store};
use crate::error::StoreError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite store for group state.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `~/.config/habitloop/habitloop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::Io {
            path: "~/.config/habitloop".into(),
            source,
        })?;
        Self::open_at(dir.join("habitloop.db"))
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS groups (
                id    TEXT PRIMARY KEY,
                state TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn load(&self) -> Result<GroupMap, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, state FROM groups")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut groups = GroupMap::new();
        for row in rows {
            let (id, blob) = row?;
            let state = serde_json::from_str(&blob)
                .map_err(|e| StoreError::Corrupt(format!("group '{id}': {e}")))?;
            groups.insert(id, state);
        }
        Ok(groups)
    }

    fn save(&self, groups: &GroupMap) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM groups", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO groups (id, state) VALUES (?1, ?2)")?;
            for (id, state) in groups {
                let blob = serde_json::to_string(state)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                stmt.execute(params![id, blob])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::GroupState;

    #[test]
    fn save_and_load_round_trip() {
        let store = SqliteStore::open_memory().unwrap();
        let mut groups = GroupMap::new();
        let mut state = GroupState::default();
        state.habits.upsert("run", "07:00".parse().unwrap());
        state.completions.mark("2026-08-07".parse().unwrap(), "run", "alice");
        state.streaks.record("run", "alice");
        groups.insert("team".to_string(), state);

        store.save(&groups).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        let team = &loaded["team"];
        assert_eq!(team.habits().len(), 1);
        assert_eq!(
            team.completions().count("2026-08-07".parse().unwrap(), "run"),
            1
        );
        assert_eq!(team.streaks().current("run", "alice"), 1);
    }

    #[test]
    fn save_replaces_previous_state() {
        let store = SqliteStore::open_memory().unwrap();
        let mut groups = GroupMap::new();
        groups.insert("a".to_string(), GroupState::default());
        groups.insert("b".to_string(), GroupState::default());
        store.save(&groups).unwrap();

        groups.remove("b");
        store.save(&groups).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn unparseable_row_is_corrupt() {
        let store = SqliteStore::open_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO groups (id, state) VALUES ('team', 'not json')",
                [],
            )
            .unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }
}
