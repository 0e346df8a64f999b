use crate::common;

pub fn run(group: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = common::load_config()?;
    let registry = common::open_registry(&config)?;
    let entries = registry.list_streaks(group);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No streaks yet.");
    } else {
        for entry in entries {
            println!("{} / {}: {} day(s)", entry.habit, entry.user, entry.days);
        }
    }
    Ok(())
}
