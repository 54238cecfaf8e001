//! File logging built on `fern`.
//!
//! Everything in the crate logs through the `log` facade; this module only
//! decides where those records go.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::LoggingConfig;
use crate::constants::{APP_NAME, LOG_FILE_NAME};

/// Install the global logger described by `config`.
///
/// Returns the log file path, or `None` when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }
    let path = get_log_file_path()?;
    init_with_path(config, &path)?;
    Ok(Some(path))
}

/// Install the global logger writing to `path`, creating parent directories.
pub fn init_with_path(config: &LoggingConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter()?)
        .chain(file)
        .apply()
        .context("A global logger is already installed")?;

    Ok(())
}

/// Get the path of the log file inside the local data directory.
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))
        .map(|dir| dir.join(APP_NAME).join(LOG_FILE_NAME))
}
