//! Roles command implementation

use agent_chain_registry_core::config::OutputFormat;
use agent_chain_registry_core::schema::Role;
use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::GlobalArgs;
use super::context::{build_environment, load_config};

/// Show the chains each agent role runs against
#[derive(Args, Debug)]
pub struct RolesArgs {
    /// Only this role (validator, relayer, scraper, ...)
    #[arg(long)]
    role: Option<Role>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the roles command
pub fn execute(global: &GlobalArgs, args: RolesArgs) -> Result<()> {
    let config = load_config(global, args.json)?;
    let built = build_environment(&config)?;

    if let Some(ref role) = args.role {
        if built.assignment.chains(role).is_none() {
            anyhow::bail!("Role '{role}' has no policy in environment '{}'", built.name);
        }
    }

    let selected: Vec<(&Role, &[String])> = built
        .assignment
        .iter()
        .filter(|(role, _)| args.role.as_ref().is_none_or(|r| r == *role))
        .collect();

    if config.format() == OutputFormat::Json {
        let output: serde_json::Map<String, serde_json::Value> = selected
            .iter()
            .map(|(role, chains)| (role.to_string(), json!(chains)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Environment: {}", built.name);
    for (role, chains) in selected {
        println!("  {role} ({}): {}", chains.len(), chains.join(", "));
    }

    Ok(())
}
