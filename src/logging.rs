//! File logging. The terminal UI owns stdout, so log lines go to
//! `kare.log` in the platform data directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;

/// Environment variable overriding the configured level.
pub const LOG_ENV: &str = "KARE_LOG";

pub fn log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kare")
        .join("kare.log")
}

/// Level from `KARE_LOG` if set and valid, else `configured`, else info.
pub fn resolve_level(env_value: Option<&str>, configured: &str) -> Level {
    env_value
        .and_then(|v| v.parse().ok())
        .or_else(|| configured.parse().ok())
        .unwrap_or(Level::INFO)
}

pub fn init(path: &Path, configured_level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_value = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env_value.as_deref(), configured_level);

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))?;
    Ok(())
}
