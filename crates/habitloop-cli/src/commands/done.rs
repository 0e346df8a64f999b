use chrono::Local;
use habitloop_core::{progress, CoreError, MarkOutcome};

use crate::common;

pub fn run(group: &str, habit: &str, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = common::load_config()?;
    let mut registry = common::open_registry(&config)?;
    let today = Local::now().date_naive();

    match registry.mark_done(group, habit, user, today) {
        Ok(MarkOutcome::FirstTimeToday { done_today, streak }) => {
            let bar = progress::render_bar(done_today, config.progress.capacity);
            println!("Well done, {user}! '{habit}' is marked for today.");
            println!("{bar} {done_today} done today | streak: {streak} day(s)");
        }
        Ok(MarkOutcome::AlreadyDone) => {
            println!("You've already marked '{habit}' complete today.");
        }
        Err(CoreError::HabitNotFound { name, .. }) => {
            println!("No habit named '{name}'.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
