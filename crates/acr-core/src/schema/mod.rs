//! Data model for chain metadata, overrides, roles and role policies
//!
//! All types deserialise from the TOML configuration files and serialise to
//! JSON for agent launch tooling. Validating conversions run on the way in,
//! so an invalid record never exists as a value of these types.

mod chain_metadata;
mod overrides;
mod policy;
mod role;

pub use chain_metadata::{
    BlockSettings, ChainFamily, ChainId, ChainMetadata, FeeOverrides, TransactionFeePolicy,
};
pub use overrides::{ChainOverride, OverrideSet, PartialBlockSettings, PartialChainMetadata};
pub use policy::{BasePolicy, FamilyPredicate, RolePolicy};
pub use role::Role;
