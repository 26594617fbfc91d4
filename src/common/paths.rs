//! Centralized path management for redwall

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the redwall config directory
pub fn redwall_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("redwall");
    Ok(config_dir)
}

/// Get the default config file path
pub fn default_config_file() -> Result<PathBuf> {
    Ok(redwall_config_dir()?.join("config.toml"))
}

/// Default download location, relative to the home directory
pub fn default_output_dir() -> String {
    "~/Pictures/Wallpapers".to_string()
}

/// Expand `~` and environment variables in a user-supplied path
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("expanding path {}", raw))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Turn a possibly relative path into an absolute one without touching the filesystem
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("getting current directory")?
        .join(path))
}
