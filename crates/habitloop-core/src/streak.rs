//! Per-user streak counters.
//!
//! A streak counter is kept per (habit, user) and is incremented by exactly 1
//! each time that user's completion is recorded for the first time on a day.
//! Counters never decrement: a missed day does not reset them. That matches
//! the observed behavior this engine reproduces; a decay rule is a documented
//! candidate improvement, not implemented here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of a streak listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub habit: String,
    pub user: String,
    pub days: u32,
}

/// Streak counters for one group: habit -> user -> count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreakBoard {
    counters: BTreeMap<String, BTreeMap<String, u32>>,
}

impl StreakBoard {
    /// Increment the counter for (habit, user) and return the new value.
    ///
    /// Call exactly once per first-time-today completion, never on repeats.
    pub fn record(&mut self, habit: &str, user: &str) -> u32 {
        let counter = self
            .counters
            .entry(habit.to_string())
            .or_default()
            .entry(user.to_string())
            .or_insert(0);
        *counter += 1;
        *counter
    }

    /// Current counter for (habit, user), 0 if never recorded.
    pub fn current(&self, habit: &str, user: &str) -> u32 {
        self.counters
            .get(habit)
            .and_then(|users| users.get(user))
            .copied()
            .unwrap_or(0)
    }

    /// All per-user counters for one habit.
    pub fn for_habit(&self, habit: &str) -> Option<&BTreeMap<String, u32>> {
        self.counters.get(habit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_increments_by_one() {
        let mut board = StreakBoard::default();
        assert_eq!(board.record("run", "alice"), 1);
        assert_eq!(board.record("run", "alice"), 2);
        assert_eq!(board.current("run", "alice"), 2);
    }

    #[test]
    fn counters_are_per_user_and_habit() {
        let mut board = StreakBoard::default();
        board.record("run", "alice");
        board.record("run", "bob");
        board.record("read", "alice");
        assert_eq!(board.current("run", "alice"), 1);
        assert_eq!(board.current("run", "bob"), 1);
        assert_eq!(board.current("read", "alice"), 1);
        assert_eq!(board.current("read", "bob"), 0);
    }

    #[test]
    fn unknown_keys_default_to_zero() {
        let board = StreakBoard::default();
        assert_eq!(board.current("run", "alice"), 0);
        assert!(board.for_habit("run").is_none());
    }
}
