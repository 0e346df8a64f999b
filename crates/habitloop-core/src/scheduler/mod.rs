//! Reminder scheduler.
//!
//! The scheduler is a wall-clock-based state machine. It does not keep its
//! own time: the caller (or the supervised [`ReminderScheduler::run`] loop)
//! invokes `tick()` with the current wall-clock value, and the scheduler
//! evaluates every (group, habit) pair at minute granularity.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Evaluating -> Idle      (one tick, nominally every 60 seconds)
//! ```
//!
//! A tick that faults is caught, logged, and followed by a short backoff;
//! the scheduler never permanently dies from a single bad tick.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::error::CoreError;
use crate::events::Event;
use crate::habit::ReminderTime;
use crate::registry::GroupRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// Waiting for the next tick.
    Idle,
    /// Iterating groups/habits for the current tick.
    Evaluating,
}

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between ticks. Wall-clock sleep, not drift-corrected.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    /// Time of day at which per-group summaries are emitted.
    #[serde(default = "default_summary_time")]
    pub summary_time: ReminderTime,
    /// Seconds to back off after a faulted tick.
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

fn default_tick_interval_secs() -> u64 {
    60
}
fn default_summary_time() -> ReminderTime {
    ReminderTime::new(20, 0).unwrap_or_default()
}
fn default_backoff_secs() -> u64 {
    1
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            summary_time: default_summary_time(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

/// Minute-granularity reminder evaluation over the group registry.
///
/// Only reads group state; all mutation stays on the command path.
pub struct ReminderScheduler {
    config: SchedulerConfig,
    state: SchedulerState,
}

impl ReminderScheduler {
    /// Create a new scheduler with default config.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create with custom config.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Evaluate one tick at `now`.
    ///
    /// Emits one `ReminderDue` per (group, habit) whose reminder time falls
    /// in the current minute, and one `SummaryDue` per group with habits
    /// when the summary minute is reached.
    pub fn tick(&mut self, registry: &GroupRegistry, now: NaiveDateTime) -> Vec<Event> {
        self.state = SchedulerState::Evaluating;
        let minute = now.time();
        let mut events = Vec::new();

        for (id, group) in registry.groups() {
            for habit in group.habits().iter() {
                if habit.reminder.matches_minute(minute) {
                    events.push(Event::ReminderDue {
                        group: id.to_string(),
                        habit: habit.name.clone(),
                        time: habit.reminder,
                        at: now,
                    });
                }
            }
            if self.config.summary_time.matches_minute(minute) && !group.habits().is_empty() {
                events.push(Event::SummaryDue {
                    group: id.to_string(),
                    completions: group.summary_counts(now.date()),
                    at: now,
                });
            }
        }

        self.state = SchedulerState::Idle;
        events
    }

    /// Supervised periodic evaluation: sleep one tick interval, evaluate,
    /// forward events, repeat.
    ///
    /// A faulted tick is logged and followed by a backoff instead of
    /// terminating. The loop exits when `shutdown` fires (the sleep is
    /// interrupted promptly) or the event channel closes.
    pub async fn run(
        mut self,
        registry: Arc<Mutex<GroupRegistry>>,
        events: mpsc::UnboundedSender<Event>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let tick_interval = Duration::from_secs(self.config.tick_interval_secs);
        let backoff = Duration::from_secs(self.config.backoff_secs);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(tick_interval) => {}
                _ = shutdown.changed() => {
                    tracing::info!("reminder scheduler shutting down");
                    return;
                }
            }

            match self.evaluate(&registry) {
                Ok(emitted) => {
                    for event in emitted {
                        if events.send(event).is_err() {
                            tracing::info!("event channel closed, stopping scheduler");
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "scheduler tick failed, backing off");
                    self.state = SchedulerState::Idle;
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    fn evaluate(&mut self, registry: &Arc<Mutex<GroupRegistry>>) -> Result<Vec<Event>, CoreError> {
        let guard = registry
            .lock()
            .map_err(|_| CoreError::Custom("group registry lock poisoned".to_string()))?;
        Ok(self.tick(&guard, Local::now().naive_local()))
    }
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn registry_with(habits: &[(&str, &str, &str)]) -> GroupRegistry {
        let mut registry = GroupRegistry::new(Box::new(MemoryStore::default()));
        for (group, name, time) in habits {
            registry.add_habit(group, name, time).unwrap();
        }
        registry
    }

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn emits_one_reminder_at_matching_minute() {
        let registry = registry_with(&[("team", "run", "07:00")]);
        let mut scheduler = ReminderScheduler::new();

        let events = scheduler.tick(&registry, at("2026-08-07T07:00:30"));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Event::ReminderDue { group, habit, .. } if group == "team" && habit == "run"
        ));
    }

    #[test]
    fn emits_nothing_at_other_minutes() {
        let registry = registry_with(&[("team", "run", "07:00")]);
        let mut scheduler = ReminderScheduler::new();
        assert!(scheduler.tick(&registry, at("2026-08-07T07:01:00")).is_empty());
        assert!(scheduler.tick(&registry, at("2026-08-07T06:59:59")).is_empty());
    }

    #[test]
    fn evaluates_all_groups_and_habits() {
        let registry = registry_with(&[
            ("team-a", "run", "07:00"),
            ("team-a", "read", "07:00"),
            ("team-b", "stretch", "07:00"),
            ("team-b", "write", "08:00"),
        ]);
        let mut scheduler = ReminderScheduler::new();

        let events = scheduler.tick(&registry, at("2026-08-07T07:00:00"));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn summary_fires_at_summary_minute_for_groups_with_habits() {
        let mut registry = registry_with(&[("team", "run", "07:00")]);
        registry.ensure_group("empty").unwrap();
        registry
            .mark_done("team", "run", "alice", "2026-08-07".parse().unwrap())
            .unwrap();
        let mut scheduler = ReminderScheduler::new();

        let events = scheduler.tick(&registry, at("2026-08-07T20:00:00"));
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::SummaryDue { group, completions, .. } => {
                assert_eq!(group, "team");
                assert_eq!(completions.len(), 1);
                assert_eq!(completions[0].done_today, 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn reminder_and_summary_can_share_a_minute() {
        let registry = registry_with(&[("team", "wind-down", "20:00")]);
        let mut scheduler = ReminderScheduler::new();
        let events = scheduler.tick(&registry, at("2026-08-07T20:00:00"));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn returns_to_idle_after_tick() {
        let registry = registry_with(&[("team", "run", "07:00")]);
        let mut scheduler = ReminderScheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        scheduler.tick(&registry, at("2026-08-07T07:00:00"));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }
}
