use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "habitloop-cli", version, about = "Habitloop CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Mark a habit done for today
    Done {
        group: String,
        habit: String,
        user: String,
    },
    /// Current streaks for a group
    Streaks {
        group: String,
        #[arg(long)]
        json: bool,
    },
    /// Today's completion summary for a group
    Summary {
        group: String,
        #[arg(long)]
        json: bool,
    },
    /// Run the reminder scheduler until interrupted
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Done { group, habit, user } => commands::done::run(&group, &habit, &user),
        Commands::Streaks { group, json } => commands::streaks::run(&group, json),
        Commands::Summary { group, json } => commands::summary::run(&group, json),
        Commands::Watch => commands::watch::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
