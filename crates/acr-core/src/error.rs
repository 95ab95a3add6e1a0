//! Error types for registry construction and role resolution

use crate::schema::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while merging, registering or resolving chains.
///
/// All variants are deterministic functions of the input configuration and
/// are never retried. Each one names the offending chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed chain metadata, typically a bad fee policy
    #[error("Invalid metadata for chain '{chain}': {reason}")]
    Validation { chain: String, reason: String },

    /// An override set references a chain the catalog does not know
    #[error("Chain '{chain}' in override set '{set}' is not present in the metadata catalog")]
    UnknownChain { chain: String, set: String },

    /// The same chain was declared twice
    #[error("Chain '{chain}' is declared by both '{first}' and '{second}'")]
    DuplicateChain {
        chain: String,
        first: String,
        second: String,
    },

    /// An exclusion list names a chain that is not in the base subset
    #[error(
        "Role '{role}' excludes chain '{chain}', which is not in the base subset (stale exclusion)"
    )]
    UnknownExclusion { role: Role, chain: String },

    /// A resolved role violates the assignment post-condition
    #[error("Assignment for role '{role}' is invalid at chain '{chain}': {reason}")]
    AssignmentInvariant {
        role: Role,
        chain: String,
        reason: String,
    },
}

impl RegistryError {
    /// Name of the chain the error is about.
    pub fn chain(&self) -> &str {
        match self {
            RegistryError::Validation { chain, .. }
            | RegistryError::UnknownChain { chain, .. }
            | RegistryError::DuplicateChain { chain, .. }
            | RegistryError::UnknownExclusion { chain, .. }
            | RegistryError::AssignmentInvariant { chain, .. } => chain,
        }
    }

    pub(crate) fn validation(chain: &str, reason: impl Into<String>) -> Self {
        RegistryError::Validation {
            chain: chain.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading catalog or environment files
#[derive(Error, Debug)]
pub enum LoadError {
    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("TOML parse error in {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The file parsed but its contents are inconsistent
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
