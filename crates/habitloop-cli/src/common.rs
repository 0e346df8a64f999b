//! Shared helpers for CLI commands.

use habitloop_core::storage::{self, Config};
use habitloop_core::GroupRegistry;

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    Ok(Config::load()?)
}

/// Open the configured store and hydrate the registry from it.
pub fn open_registry(config: &Config) -> Result<GroupRegistry, Box<dyn std::error::Error>> {
    let store = storage::open_store(config)?;
    Ok(GroupRegistry::load(store)?)
}
