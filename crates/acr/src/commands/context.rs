//! Shared loading of configuration, catalog and environment

use agent_chain_registry_core::config::{Config, ConfigOverrides, OutputFormat, resolve_config};
use agent_chain_registry_core::home::get_home_dir;
use agent_chain_registry_core::{BuiltEnvironment, EnvironmentConfig, StaticCatalog};
use anyhow::{Context, Result};
use tracing::debug;

use super::GlobalArgs;

/// Resolve the effective tool configuration for this invocation.
pub fn load_config(global: &GlobalArgs, json: bool) -> Result<Config> {
    let home_dir = get_home_dir()?;
    let current_dir = std::env::current_dir()?;

    let overrides = ConfigOverrides {
        catalog: global.catalog.clone(),
        environment: global.environment.clone(),
        format: json.then_some(OutputFormat::Json),
    };
    Ok(resolve_config(&overrides, &current_dir, &home_dir)?)
}

/// Load the catalog and environment and run the full build.
pub fn build_environment(config: &Config) -> Result<BuiltEnvironment> {
    let catalog_path = config.catalog_path();
    let environment_path = config.environment_path();
    debug!(catalog = ?catalog_path, environment = ?environment_path, "loading inputs");

    let catalog = StaticCatalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let environment = EnvironmentConfig::load(&environment_path)
        .with_context(|| format!("Failed to load environment {}", environment_path.display()))?;

    environment
        .build(&catalog)
        .with_context(|| format!("Environment '{}' is invalid", environment.environment))
}
