//! Canonical home directory resolution
//!
//! The global tool config lives at `~/.config/acr/config.toml`. Tests and
//! custom deployments point the home directory elsewhere with `ACR_HOME`.
//!
//! # Precedence
//!
//! 1. `ACR_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory used for global configuration.
///
/// # Errors
///
/// Returns an error if `ACR_HOME` is unset and the platform home directory
/// cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("ACR_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}
