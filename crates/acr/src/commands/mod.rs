//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod chains;
mod check;
mod config_cmd;
mod context;
mod roles;

/// acr - chain registry and agent role assignment
#[derive(Parser, Debug)]
#[command(
    name = "acr",
    version,
    about = "Chain registry and agent role assignment for cross-chain deployments",
    long_about = "Merges per-environment chain overrides onto a metadata catalog and resolves which chains each agent role runs against"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Input file selection shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Chain metadata catalog file
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Environment definition file
    #[arg(long, global = true)]
    environment: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported chains
    Chains(chains::ChainsArgs),

    /// Show the chains each agent role runs against
    Roles(roles::RolesArgs),

    /// Validate the environment against the catalog
    Check(check::CheckArgs),

    /// Show effective configuration
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Chains(args) => chains::execute(&self.global, args),
            Commands::Roles(args) => roles::execute(&self.global, args),
            Commands::Check(args) => check::execute(&self.global, args),
            Commands::Config(args) => config_cmd::execute(&self.global, args),
        }
    }
}
