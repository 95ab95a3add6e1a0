//! Check command implementation

use agent_chain_registry_core::config::OutputFormat;
use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::GlobalArgs;
use super::context::{build_environment, load_config};

/// Validate the environment against the catalog
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the check command
///
/// Any merge, registration or resolution error propagates and fails the
/// command; on success a one-line summary is printed.
pub fn execute(global: &GlobalArgs, args: CheckArgs) -> Result<()> {
    let config = load_config(global, args.json)?;
    let built = build_environment(&config)?;

    if config.format() == OutputFormat::Json {
        let output = json!({
            "environment": built.name,
            "valid": true,
            "chains": built.registry.len(),
            "roles": built.assignment.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Environment '{}' OK: {} chains, {} roles",
            built.name,
            built.registry.len(),
            built.assignment.len()
        );
    }

    Ok(())
}
