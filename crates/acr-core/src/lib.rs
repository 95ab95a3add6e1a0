//! Core library for agent-chain-registry (acr)
//!
//! Builds the registry of chains a cross-chain messaging deployment supports
//! and decides which chains each agent role (validator, relayer, scraper, ...)
//! must run against.
//!
//! The pipeline is:
//!
//! 1. a [`MetadataCatalog`] supplies canonical per-chain metadata,
//! 2. ordered [`OverrideSet`]s are merged onto it ([`merge::merge`]),
//! 3. the merged records form a [`ChainRegistry`],
//! 4. per-role [`RolePolicy`] values are resolved into an
//!    [`AgentChainAssignment`] ([`resolve::resolve`]).
//!
//! Every step fails closed: an invalid configuration yields a
//! [`RegistryError`] naming the offending chain, never a partial result.

pub mod catalog;
pub mod config;
pub mod environment;
pub mod error;
pub mod home;
pub mod logging;
pub mod merge;
pub mod registry;
pub mod resolve;
pub mod schema;

pub use catalog::{MetadataCatalog, StaticCatalog};
pub use environment::{BuiltEnvironment, EnvironmentConfig};
pub use error::{LoadError, RegistryError};
pub use registry::ChainRegistry;
pub use resolve::AgentChainAssignment;
pub use schema::{
    ChainFamily, ChainMetadata, OverrideSet, PartialChainMetadata, Role, RolePolicy,
    TransactionFeePolicy,
};
