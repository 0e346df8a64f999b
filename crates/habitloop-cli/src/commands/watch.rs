//! Long-running scheduler mode: evaluates reminders once per tick and prints
//! each emitted event as a JSON line until interrupted.

use std::sync::{Arc, Mutex};

use habitloop_core::ReminderScheduler;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::EnvFilter;

use crate::common;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays clean for the event stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("habitloop=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = common::load_config()?;
    let registry = Arc::new(Mutex::new(common::open_registry(&config)?));
    let scheduler = ReminderScheduler::with_config(config.scheduler.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let scheduler_task = tokio::spawn(scheduler.run(registry, events_tx, shutdown_rx));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    let _ = shutdown_tx.send(true);
                    break;
                }
                maybe_event = events_rx.recv() => match maybe_event {
                    Some(event) => println!("{}", serde_json::to_string(&event)?),
                    None => break,
                },
            }
        }

        scheduler_task.await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
