//! Path utilities for solvewatch.
//!
//! User-level files live under `~/.solvewatch/`:
//! - `~/.solvewatch/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the solvewatch home directory (`~/.solvewatch/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".solvewatch")
}

/// Returns the default config file path (`~/.solvewatch/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
