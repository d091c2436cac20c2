use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_peer_forms_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".peer-forms"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let base = get_peer_forms_dir()?;
    Ok(base.join("config.toml"))
}

/// Log directory for the interactive form, under the platform data dir.
pub fn get_logs_dir() -> Result<PathBuf> {
    let data = dirs::data_local_dir().ok_or_else(|| anyhow!("Could not find data directory"))?;
    Ok(data.join("peer-forms").join("logs"))
}
