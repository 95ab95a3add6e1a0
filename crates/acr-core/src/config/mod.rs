//! Tool configuration resolution
//!
//! Resolves where the catalog and environment files live, and how output is
//! formatted, from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Repo-local config (.acr.toml)
//! 4. Global config (~/.config/acr/config.toml)
//! 5. Defaults

mod discovery;
mod types;

pub use discovery::{ConfigError, ConfigOverrides, resolve_config};
pub use types::{
    Config, ConfigSource, ConfigSources, DEFAULT_CATALOG, DEFAULT_ENVIRONMENT, DisplayConfig,
    OutputFormat, PathsConfig,
};
