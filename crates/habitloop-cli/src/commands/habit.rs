use clap::Subcommand;
use habitloop_core::CoreError;

use crate::common;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit, or update the reminder time of an existing one
    Add {
        group: String,
        name: String,
        /// Reminder time, HH:MM (24h)
        time: String,
    },
    /// Remove a habit
    Remove { group: String, name: String },
    /// List habits with reminder times
    List {
        group: String,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = common::load_config()?;
    let mut registry = common::open_registry(&config)?;

    match action {
        HabitAction::Add { group, name, time } => {
            match registry.add_habit(&group, &name, &time) {
                Ok(()) => println!("Habit '{name}' will remind at {time}."),
                Err(CoreError::Validation(e)) => {
                    println!("{e}. Usage: habit add <group> <name> <HH:MM>")
                }
                Err(e) => return Err(e.into()),
            }
        }
        HabitAction::Remove { group, name } => {
            if registry.remove_habit(&group, &name)? {
                println!("Removed habit '{name}'.");
            } else {
                println!("No habit named '{name}'.");
            }
        }
        HabitAction::List { group, json } => {
            let habits = registry.list_habits(&group);
            if json {
                println!("{}", serde_json::to_string_pretty(habits)?);
            } else if habits.is_empty() {
                println!("No habits yet.");
            } else {
                for habit in habits {
                    println!("{} @ {}", habit.name, habit.reminder);
                }
            }
        }
    }
    Ok(())
}
