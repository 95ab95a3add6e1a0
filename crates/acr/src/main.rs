//! acr - chain registry and agent role assignment
//!
//! Loads a chain metadata catalog and a deployment environment, merges the
//! environment's overrides, and reports the supported chains and the chains
//! each agent role must run against.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    agent_chain_registry_core::logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
