//! Config command implementation

use agent_chain_registry_core::config::OutputFormat;
use agent_chain_registry_core::home::get_home_dir;
use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::GlobalArgs;
use super::context::load_config;

/// Show effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the config command
pub fn execute(global: &GlobalArgs, args: ConfigArgs) -> Result<()> {
    let config = load_config(global, args.json)?;
    let home_dir = get_home_dir()?;
    let global_config_path = home_dir.join(".config/acr/config.toml");

    let catalog = config.catalog_path();
    let environment = config.environment_path();
    let sources = config.sources;

    if config.format() == OutputFormat::Json {
        let output = json!({
            "catalog": {
                "value": catalog.display().to_string(),
                "source": sources.catalog,
            },
            "environment": {
                "value": environment.display().to_string(),
                "source": sources.environment,
            },
            "format": {
                "value": config.format(),
                "source": sources.format,
            },
            "globalConfig": {
                "path": global_config_path.display().to_string(),
                "exists": global_config_path.exists(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Configuration:");
        println!("  catalog: {} (from {})", catalog.display(), sources.catalog);
        println!(
            "  environment: {} (from {})",
            environment.display(),
            sources.environment
        );
        let format = match config.format() {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        };
        println!("  format: {format} (from {})", sources.format);
        let global_status = if global_config_path.exists() { "(found)" } else { "(not found)" };
        println!("  global config: {} {global_status}", global_config_path.display());
    }

    Ok(())
}
