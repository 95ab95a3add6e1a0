//! Configuration discovery and resolution

use super::types::{Config, ConfigSource, OutputFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override catalog path
    pub catalog: Option<PathBuf>,
    /// Override environment path
    pub environment: Option<PathBuf>,
    /// Override output format
    pub format: Option<OutputFormat>,
}

/// Resolve configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (`ACR_CATALOG`, `ACR_ENVIRONMENT`, `ACR_FORMAT`)
/// 3. Repo-local config (.acr.toml in current dir or a parent, up to the git root)
/// 4. Global config (~/.config/acr/config.toml)
/// 5. Defaults
///
/// Relative paths inside a config file are taken relative to that file's
/// directory. Unreadable or malformed files are skipped with a warning.
///
/// # Errors
///
/// Never returns `Err` today: config files only select inputs, and a broken
/// one falls back to the next source after a `warn!`. The `Result` stays in
/// the signature so discovery can become stricter without breaking callers.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    current_dir: &Path,
    home_dir: &Path,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    // 4. Try global config
    let global_config_path = home_dir.join(".config/acr/config.toml");
    if global_config_path.exists() {
        match load_config_file(&global_config_path) {
            Ok(file_config) => merge_config(
                &mut config,
                file_config,
                &global_config_path,
                ConfigSource::GlobalConfig,
            ),
            Err(e) => warn!("Failed to parse global config at {global_config_path:?}: {e}"),
        }
    }

    // 3. Try repo-local config (current dir or git root)
    if let Some(repo_config) = find_repo_local_config(current_dir) {
        match load_config_file(&repo_config) {
            Ok(file_config) => {
                merge_config(&mut config, file_config, &repo_config, ConfigSource::RepoConfig)
            }
            Err(e) => warn!("Failed to parse repo config at {repo_config:?}: {e}"),
        }
    }

    // 2. Apply environment variables
    apply_env_overrides(&mut config);

    // 1. Apply command-line overrides
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Find repo-local config file
///
/// Searches current directory and parent directories up to git root
fn find_repo_local_config(current_dir: &Path) -> Option<PathBuf> {
    let mut dir = current_dir;

    loop {
        let config_path = dir.join(".acr.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if dir.join(".git").exists() {
            break;
        }

        dir = dir.parent()?;
    }

    None
}

/// Load config from a TOML file
fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge file config into base config; only values the file sets win
fn merge_config(base: &mut Config, file: Config, file_path: &Path, source: ConfigSource) {
    let file_dir = file_path.parent().unwrap_or(Path::new("."));

    if let Some(catalog) = file.paths.catalog {
        base.paths.catalog = Some(file_dir.join(catalog));
        base.sources.catalog = source;
    }

    if let Some(environment) = file.paths.environment {
        base.paths.environment = Some(file_dir.join(environment));
        base.sources.environment = source;
    }

    if let Some(format) = file.display.format {
        base.display.format = Some(format);
        base.sources.format = source;
    }
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut Config) {
    if let Some(catalog) = non_empty_env("ACR_CATALOG") {
        config.paths.catalog = Some(PathBuf::from(catalog));
        config.sources.catalog = ConfigSource::Env;
    }

    if let Some(environment) = non_empty_env("ACR_ENVIRONMENT") {
        config.paths.environment = Some(PathBuf::from(environment));
        config.sources.environment = ConfigSource::Env;
    }

    if let Some(format) = non_empty_env("ACR_FORMAT") {
        match format.parse::<OutputFormat>() {
            Ok(format) => {
                config.display.format = Some(format);
                config.sources.format = ConfigSource::Env;
            }
            Err(e) => warn!("Ignoring ACR_FORMAT: {e}"),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(ref catalog) = overrides.catalog {
        config.paths.catalog = Some(catalog.clone());
        config.sources.catalog = ConfigSource::Cli;
    }

    if let Some(ref environment) = overrides.environment {
        config.paths.environment = Some(environment.clone());
        config.sources.environment = ConfigSource::Cli;
    }

    if let Some(format) = overrides.format {
        config.display.format = Some(format);
        config.sources.format = ConfigSource::Cli;
    }
}
