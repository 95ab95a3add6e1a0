//! Configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default catalog file, relative to the working directory
pub const DEFAULT_CATALOG: &str = "config/mainnet3/catalog.toml";

/// Default environment file, relative to the working directory
pub const DEFAULT_ENVIRONMENT: &str = "config/mainnet3/environment.toml";

/// Complete tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input file locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,
    /// Where each effective value came from
    #[serde(skip)]
    pub sources: ConfigSources,
}

/// Input file locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Metadata catalog file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Environment definition file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<PathBuf>,
}

/// Display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON output
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}' (expected text or json)")),
        }
    }
}

/// Origin of a configuration value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    #[default]
    Default,
    GlobalConfig,
    RepoConfig,
    Env,
    Cli,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::GlobalConfig => write!(f, "~/.config/acr/config.toml"),
            ConfigSource::RepoConfig => write!(f, "repo .acr.toml"),
            ConfigSource::Env => write!(f, "environment"),
            ConfigSource::Cli => write!(f, "command line"),
        }
    }
}

/// Per-field sources of the effective configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfigSources {
    pub catalog: ConfigSource,
    pub environment: ConfigSource,
    pub format: ConfigSource,
}

impl Config {
    /// Effective catalog path.
    pub fn catalog_path(&self) -> PathBuf {
        self.paths
            .catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    /// Effective environment path.
    pub fn environment_path(&self) -> PathBuf {
        self.paths
            .environment
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENVIRONMENT))
    }

    /// Effective output format.
    pub fn format(&self) -> OutputFormat {
        self.display.format.unwrap_or_default()
    }
}
