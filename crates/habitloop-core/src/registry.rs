//! Group registry: the single owner of all tracked group state.
//!
//! Every mutation (habit ledger, completion tracker, streak engine) funnels
//! through the registry so that exactly one persistence call follows each
//! command. Groups are created lazily on first interaction; creation is
//! idempotent and groups are never deleted.
//!
//! ## Lifecycle
//!
//! ```ignore
//! let registry = GroupRegistry::load(Box::new(SqliteStore::open()?))?;
//! // mutate through the registry; each mutating call persists before returning
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionLog, HabitCompletionCount, MarkOutcome};
use crate::error::{CoreError, Result, StoreError};
use crate::habit::{Habit, HabitLedger};
use crate::storage::Store;
use crate::streak::{StreakBoard, StreakEntry};

/// All state owned by one group: its ledger, completion log, and streaks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupState {
    #[serde(default)]
    pub(crate) habits: HabitLedger,
    #[serde(default)]
    pub(crate) completions: CompletionLog,
    #[serde(default)]
    pub(crate) streaks: StreakBoard,
}

impl GroupState {
    pub fn habits(&self) -> &HabitLedger {
        &self.habits
    }

    pub fn completions(&self) -> &CompletionLog {
        &self.completions
    }

    pub fn streaks(&self) -> &StreakBoard {
        &self.streaks
    }

    /// Today's completion count for every habit, in ledger order.
    pub fn summary_counts(&self, date: NaiveDate) -> Vec<HabitCompletionCount> {
        self.habits
            .iter()
            .map(|habit| HabitCompletionCount {
                habit: habit.name.clone(),
                done_today: self.completions.count(date, &habit.name),
            })
            .collect()
    }
}

/// Central owner of all group state, hydrated from a [`Store`] at startup and
/// written through after every mutation.
pub struct GroupRegistry {
    groups: BTreeMap<String, GroupState>,
    store: Box<dyn Store>,
}

impl GroupRegistry {
    /// Create an empty registry on top of `store` without loading.
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            groups: BTreeMap::new(),
            store,
        }
    }

    /// Hydrate the registry from `store`.
    ///
    /// Corrupt backing state falls back to an empty registry (logged);
    /// I/O failures propagate.
    pub fn load(store: Box<dyn Store>) -> Result<Self> {
        let groups = match store.load() {
            Ok(groups) => groups,
            Err(StoreError::Corrupt(message)) => {
                tracing::warn!(%message, "store state is corrupt, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { groups, store })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn group(&self, id: &str) -> Option<&GroupState> {
        self.groups.get(id)
    }

    /// Iterate all (group id, state) pairs. Used by the reminder scheduler,
    /// which only reads.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupState)> {
        self.groups.iter().map(|(id, state)| (id.as_str(), state))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Habits of `group` in insertion order; empty for an unknown group.
    pub fn list_habits(&self, group: &str) -> &[Habit] {
        self.groups
            .get(group)
            .map(|g| g.habits.as_slice())
            .unwrap_or(&[])
    }

    /// Users who completed (group, habit) on `date`.
    pub fn completions_today(&self, group: &str, habit: &str, date: NaiveDate) -> BTreeSet<String> {
        self.groups
            .get(group)
            .and_then(|g| g.completions.completed_by(date, habit))
            .cloned()
            .unwrap_or_default()
    }

    /// Today's per-habit completion counts for `group`, in ledger order.
    pub fn summary_counts(&self, group: &str, date: NaiveDate) -> Vec<HabitCompletionCount> {
        self.groups
            .get(group)
            .map(|g| g.summary_counts(date))
            .unwrap_or_default()
    }

    /// Current streak for (group, habit, user), 0 if never recorded.
    pub fn current_streak(&self, group: &str, habit: &str, user: &str) -> u32 {
        self.groups
            .get(group)
            .map(|g| g.streaks.current(habit, user))
            .unwrap_or(0)
    }

    /// All streak counters for `group`, iterating the ledger so removed
    /// habits are not listed.
    pub fn list_streaks(&self, group: &str) -> Vec<StreakEntry> {
        let Some(state) = self.groups.get(group) else {
            return Vec::new();
        };
        let mut entries = Vec::new();
        for habit in state.habits.iter() {
            if let Some(users) = state.streaks.for_habit(&habit.name) {
                for (user, days) in users {
                    entries.push(StreakEntry {
                        habit: habit.name.clone(),
                        user: user.clone(),
                        days: *days,
                    });
                }
            }
        }
        entries
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Create an empty group if absent. Idempotent; persists only when a
    /// group was actually created.
    pub fn ensure_group(&mut self, id: &str) -> Result<&GroupState> {
        let created = !self.groups.contains_key(id);
        self.groups.entry(id.to_string()).or_default();
        if created {
            self.persist()?;
        }
        Ok(&self.groups[id])
    }

    /// Add a habit to `group`, or overwrite the reminder time of an existing
    /// habit of the same name. Creates the group if absent.
    pub fn add_habit(&mut self, group: &str, name: &str, time: &str) -> Result<()> {
        let reminder = time.parse()?;
        let state = self.groups.entry(group.to_string()).or_default();
        state.habits.upsert(name, reminder);
        self.persist()
    }

    /// Remove a habit from `group`. Returns `false` (and persists nothing)
    /// if the habit or the group is absent.
    pub fn remove_habit(&mut self, group: &str, name: &str) -> Result<bool> {
        let removed = self
            .groups
            .get_mut(group)
            .is_some_and(|state| state.habits.remove(name));
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Mark (group, habit) done by `user` on `date`.
    ///
    /// The first mark of the day records the completion, bumps the user's
    /// streak, persists once, and reports the updated count. A repeated mark
    /// is a strict no-op: no mutation, no persistence write.
    pub fn mark_done(
        &mut self,
        group: &str,
        habit: &str,
        user: &str,
        date: NaiveDate,
    ) -> Result<MarkOutcome> {
        let state = self.groups.entry(group.to_string()).or_default();
        if !state.habits.contains(habit) {
            return Err(CoreError::HabitNotFound {
                group: group.to_string(),
                name: habit.to_string(),
            });
        }
        if !state.completions.mark(date, habit, user) {
            return Ok(MarkOutcome::AlreadyDone);
        }
        let streak = state.streaks.record(habit, user);
        let done_today = state.completions.count(date, habit);
        self.persist()?;
        Ok(MarkOutcome::FirstTimeToday { done_today, streak })
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.groups)?;
        Ok(())
    }
}
