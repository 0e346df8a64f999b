use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::completion::HabitCompletionCount;
use crate::habit::ReminderTime;

/// Every scheduler tick that finds work produces Events.
/// The messaging layer consumes them to render outbound notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A habit's reminder time matched the current wall-clock minute.
    ReminderDue {
        group: String,
        habit: String,
        time: ReminderTime,
        at: NaiveDateTime,
    },
    /// The daily summary minute was reached for a group with habits.
    SummaryDue {
        group: String,
        completions: Vec<HabitCompletionCount>,
        at: NaiveDateTime,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_by_type() {
        let event = Event::ReminderDue {
            group: "team".to_string(),
            habit: "run".to_string(),
            time: "07:00".parse().unwrap(),
            at: "2026-08-07T07:00:00".parse().unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ReminderDue");
        assert_eq!(json["time"], "07:00");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
