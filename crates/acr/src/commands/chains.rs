//! Chains command implementation

use agent_chain_registry_core::config::OutputFormat;
use agent_chain_registry_core::registry::RegisteredChain;
use agent_chain_registry_core::schema::ChainFamily;
use anyhow::Result;
use clap::Args;

use super::GlobalArgs;
use super::context::{build_environment, load_config};

/// List supported chains
#[derive(Args, Debug)]
pub struct ChainsArgs {
    /// Only chains of this family (ethereum, cosmos, sealevel)
    #[arg(long)]
    family: Option<ChainFamily>,

    /// Only chains introduced by this override set
    #[arg(long)]
    set: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the chains command
pub fn execute(global: &GlobalArgs, args: ChainsArgs) -> Result<()> {
    let config = load_config(global, args.json)?;
    let built = build_environment(&config)?;

    let chains: Vec<&RegisteredChain> = built
        .registry
        .entries()
        .iter()
        .filter(|e| args.family.is_none_or(|f| e.metadata.family == f))
        .filter(|e| {
            args.set
                .as_deref()
                .is_none_or(|s| e.source_set.as_deref() == Some(s))
        })
        .collect();

    if config.format() == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&chains)?);
        return Ok(());
    }

    if chains.is_empty() {
        println!("No chains match");
        return Ok(());
    }

    println!("Environment: {}", built.name);
    for entry in chains {
        let chain = &entry.metadata;
        let set = entry.source_set.as_deref().unwrap_or("-");
        let fees = chain
            .transaction_overrides
            .map(|p| p.to_string())
            .unwrap_or_else(|| "default".to_string());
        println!(
            "  {:<14} {:<9} set={set} confirmations={} fees={fees}",
            chain.name,
            chain.family.to_string(),
            chain.blocks.confirmations
        );
    }

    Ok(())
}
