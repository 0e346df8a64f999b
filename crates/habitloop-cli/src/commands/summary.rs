use chrono::Local;
use habitloop_core::progress;

use crate::common;

pub fn run(group: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = common::load_config()?;
    let registry = common::open_registry(&config)?;
    let counts = registry.summary_counts(group, Local::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else if counts.is_empty() {
        println!("No habits yet.");
    } else {
        for count in counts {
            println!(
                "{:<20} {} {}",
                count.habit,
                progress::render_bar(count.done_today, config.progress.capacity),
                count.done_today
            );
        }
    }
    Ok(())
}
