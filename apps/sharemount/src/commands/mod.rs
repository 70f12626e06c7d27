pub mod check;
pub mod list;
pub mod mount;

use anyhow::Result;
use sharemount_core::{ConfigManager, LoadedConfig};
use std::path::Path;

fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = ConfigManager::resolve(explicit)?;
    Ok(ConfigManager::with_path(path).load()?)
}
