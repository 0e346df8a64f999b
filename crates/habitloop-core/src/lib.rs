//! # Habitloop Core Library
//!
//! This library provides the core business logic for Habitloop, a group habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available through this library, with any chat-bot or GUI frontend being a
//! thin adapter over the same core.
//!
//! ## Architecture
//!
//! - **Group Registry**: owns all tracked groups and funnels every mutation
//!   through a single persistence call
//! - **Habit Ledger**: per-group habit definitions (name -> reminder time)
//! - **Completion Tracker**: idempotent per-user-per-day completion records
//! - **Streak Engine**: per-user consecutive-completion counters
//! - **Reminder Scheduler**: a caller-clocked state machine plus a supervised
//!   periodic task that emits reminder and summary events
//! - **Storage**: swappable persistence (SQLite, flat JSON file, in-memory)
//!   and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`GroupRegistry`]: central owner of all group state
//! - [`ReminderScheduler`]: minute-granularity reminder evaluation
//! - [`Store`]: persistence abstraction
//! - [`Config`]: application configuration management

pub mod completion;
pub mod error;
pub mod events;
pub mod habit;
pub mod progress;
pub mod registry;
pub mod scheduler;
pub mod storage;
pub mod streak;

pub use completion::{CompletionLog, HabitCompletionCount, MarkOutcome};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use events::Event;
pub use habit::{Habit, HabitLedger, ReminderTime};
pub use registry::{GroupRegistry, GroupState};
pub use scheduler::{ReminderScheduler, SchedulerConfig, SchedulerState};
pub use storage::{Config, JsonFileStore, MemoryStore, SqliteStore, Store};
pub use streak::{StreakBoard, StreakEntry};
