//! Per-day completion records.
//!
//! Completions are keyed by (date, habit) and hold the set of users who
//! completed that habit that day. Marking is idempotent per user: the second
//! mark on the same day is reported back as already done and changes nothing.
//! Records for past dates persist and are never pruned.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of marking a habit done.
///
/// `FirstTimeToday` carries today's updated completion count (raw, never
/// clamped) and the user's new streak value so the caller can render a
/// confirmation with a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MarkOutcome {
    FirstTimeToday { done_today: usize, streak: u32 },
    AlreadyDone,
}

/// Today's completion count for one habit, as carried by summary events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCompletionCount {
    pub habit: String,
    pub done_today: usize,
}

/// Completion records for one group: date -> habit -> set of users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionLog {
    days: BTreeMap<NaiveDate, BTreeMap<String, BTreeSet<String>>>,
}

impl CompletionLog {
    /// Record that `user` completed `habit` on `date`.
    ///
    /// Returns `true` if this is a new completion, `false` if the user had
    /// already been recorded for that (date, habit).
    pub fn mark(&mut self, date: NaiveDate, habit: &str, user: &str) -> bool {
        self.days
            .entry(date)
            .or_default()
            .entry(habit.to_string())
            .or_default()
            .insert(user.to_string())
    }

    /// Users who completed `habit` on `date`, if any were recorded.
    pub fn completed_by(&self, date: NaiveDate, habit: &str) -> Option<&BTreeSet<String>> {
        self.days.get(&date).and_then(|habits| habits.get(habit))
    }

    /// Number of users who completed `habit` on `date`.
    pub fn count(&self, date: NaiveDate, habit: &str) -> usize {
        self.completed_by(date, habit).map_or(0, BTreeSet::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn second_mark_is_a_no_op() {
        let mut log = CompletionLog::default();
        let day = date("2026-08-07");
        assert!(log.mark(day, "run", "alice"));
        assert!(!log.mark(day, "run", "alice"));
        assert_eq!(log.count(day, "run"), 1);
    }

    #[test]
    fn counts_are_per_date_and_habit() {
        let mut log = CompletionLog::default();
        let mon = date("2026-08-03");
        let tue = date("2026-08-04");
        log.mark(mon, "run", "alice");
        log.mark(mon, "run", "bob");
        log.mark(mon, "read", "alice");
        log.mark(tue, "run", "alice");
        assert_eq!(log.count(mon, "run"), 2);
        assert_eq!(log.count(mon, "read"), 1);
        assert_eq!(log.count(tue, "run"), 1);
        assert_eq!(log.count(tue, "read"), 0);
    }

    #[test]
    fn past_dates_are_kept() {
        let mut log = CompletionLog::default();
        log.mark(date("2026-01-01"), "run", "alice");
        log.mark(date("2026-08-07"), "run", "alice");
        assert_eq!(log.count(date("2026-01-01"), "run"), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut log = CompletionLog::default();
        log.mark(date("2026-08-07"), "run", "alice");
        let json = serde_json::to_string(&log).unwrap();
        let back: CompletionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count(date("2026-08-07"), "run"), 1);
    }
}
