//! Habit definitions and the per-group habit ledger.
//!
//! A habit is a named recurring action with a daily reminder time. Names are
//! case-sensitive and unique within a group; adding an existing name
//! overwrites its reminder time (last-write-wins).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A wall-clock time of day at minute granularity.
///
/// Parsed from strict `HH:MM` input (two digits each, 24h clock) and rendered
/// back in the same form. Reminder matching compares hour and minute only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    /// Build a reminder time, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTimeFormat {
                input: format!("{hour}:{minute}"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// True if `time` falls in the same wall-clock minute.
    pub fn matches_minute(&self, time: NaiveTime) -> bool {
        u32::from(self.hour) == time.hour() && u32::from(self.minute) == time.minute()
    }
}

impl FromStr for ReminderTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeFormat {
            input: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let (h, m) = (&s[..2], &s[3..]);
        if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(t: ReminderTime) -> Self {
        t.to_string()
    }
}

/// A named recurring action with a daily reminder time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub reminder: ReminderTime,
}

/// Per-group habit definitions.
///
/// Vector-backed so listings preserve insertion order; the name set invariant
/// is enforced by `upsert`. Upserting an existing name keeps its position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitLedger {
    habits: Vec<Habit>,
}

impl HabitLedger {
    /// Insert a habit or overwrite the reminder time of an existing one.
    ///
    /// Returns `true` if an existing habit was overwritten.
    pub fn upsert(&mut self, name: &str, reminder: ReminderTime) -> bool {
        if let Some(existing) = self.habits.iter_mut().find(|h| h.name == name) {
            existing.reminder = reminder;
            true
        } else {
            self.habits.push(Habit {
                name: name.to_string(),
                reminder,
            });
            false
        }
    }

    /// Remove a habit by name. Returns `false` if the name is absent.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.habits.iter().position(|h| h.name == name) {
            Some(idx) => {
                self.habits.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Habit> {
        self.habits.iter()
    }

    pub fn as_slice(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}
