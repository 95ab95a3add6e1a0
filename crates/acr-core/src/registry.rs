//! Chain registry
//!
//! [`ChainRegistry`] owns the effective metadata of every supported chain.
//! It is append-only: chains are registered once, in order, and never removed
//! or replaced. Insertion order is part of the contract, since agent tooling
//! iterates [`ChainRegistry::supported_chains`] and expects it to be stable.
//!
//! A registry is normally produced by [`ChainRegistry::build_from`], which
//! layers an ordered list of [`OverrideSet`]s onto a [`MetadataCatalog`].
//! Rebuilding yields a new registry; an existing one is never updated.

use crate::catalog::MetadataCatalog;
use crate::error::RegistryError;
use crate::merge::merge;
use crate::schema::{ChainFamily, ChainMetadata, FamilyPredicate, OverrideSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Label used in duplicate errors for chains registered directly.
const DIRECT: &str = "direct registration";

/// A registered chain together with the override set that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredChain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_set: Option<String>,
    pub metadata: ChainMetadata,
}

/// Ordered, append-only mapping from chain name to effective metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RegisteredChain>", into = "Vec<RegisteredChain>")]
pub struct ChainRegistry {
    entries: Vec<RegisteredChain>,
    index: HashMap<String, usize>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain under `name`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateChain`] if `name` is already registered
    /// - [`RegistryError::Validation`] if `name` is empty or does not match
    ///   `metadata.name`
    pub fn register(&mut self, name: &str, metadata: ChainMetadata) -> Result<(), RegistryError> {
        self.insert(name, metadata, None)
    }

    /// Build a registry by layering `override_sets`, in order, onto `catalog`.
    ///
    /// Every chain named by a set is looked up in the catalog, merged with its
    /// override and registered. The first failure aborts the build.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownChain`] if a set names a chain the catalog lacks
    /// - [`RegistryError::Validation`] if a merged record is invalid
    /// - [`RegistryError::DuplicateChain`] if a chain appears twice
    pub fn build_from<C>(catalog: &C, override_sets: &[OverrideSet]) -> Result<Self, RegistryError>
    where
        C: MetadataCatalog + ?Sized,
    {
        let mut registry = ChainRegistry::new();

        for set in override_sets {
            for chain in &set.chains {
                let base = catalog.get(&chain.name).ok_or_else(|| RegistryError::UnknownChain {
                    chain: chain.name.clone(),
                    set: set.name.clone(),
                })?;
                let effective = merge(base, &chain.metadata)?;
                registry.insert(&chain.name, effective, Some(&set.name))?;
            }
            debug!(set = %set.name, chains = set.chains.len(), "registered override set");
        }

        info!(
            chains = registry.len(),
            sets = override_sets.len(),
            "chain registry built"
        );
        Ok(registry)
    }

    fn insert(
        &mut self,
        name: &str,
        metadata: ChainMetadata,
        source_set: Option<&str>,
    ) -> Result<(), RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::validation(name, "chain name must not be empty"));
        }
        if metadata.name != name {
            return Err(RegistryError::validation(
                name,
                format!("registered name does not match metadata name '{}'", metadata.name),
            ));
        }
        if let Some(&existing) = self.index.get(name) {
            let first = self.entries[existing].source_set.as_deref().unwrap_or(DIRECT);
            return Err(RegistryError::DuplicateChain {
                chain: name.to_string(),
                first: first.to_string(),
                second: source_set.unwrap_or(DIRECT).to_string(),
            });
        }

        debug!(chain = %name, family = %metadata.family, "registered chain");
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(RegisteredChain {
            source_set: source_set.map(str::to_string),
            metadata,
        });
        Ok(())
    }

    /// Names of all registered chains, in registration order.
    pub fn supported_chains(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.metadata.name.as_str()).collect()
    }

    /// Names of registered chains of `family`, in registration order.
    pub fn chains_in_family(&self, family: ChainFamily) -> Vec<&str> {
        self.chains_matching(FamilyPredicate::Is(family))
    }

    /// Names of registered chains whose family satisfies `predicate`, in
    /// registration order.
    pub fn chains_matching(&self, predicate: FamilyPredicate) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| predicate.matches(e.metadata.family))
            .map(|e| e.metadata.name.as_str())
            .collect()
    }

    /// Names of chains introduced by the override set `set`, in registration
    /// order.
    pub fn chains_in_set(&self, set: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.source_set.as_deref() == Some(set))
            .map(|e| e.metadata.name.as_str())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ChainMetadata> {
        self.index.get(name).map(|&i| &self.entries[i].metadata)
    }

    /// The override set that introduced `name`, if it came from one.
    pub fn source_set(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .and_then(|&i| self.entries[i].source_set.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Effective metadata of every chain, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ChainMetadata> {
        self.entries.iter().map(|e| &e.metadata)
    }

    pub fn entries(&self) -> &[RegisteredChain] {
        &self.entries
    }
}

impl TryFrom<Vec<RegisteredChain>> for ChainRegistry {
    type Error = RegistryError;

    fn try_from(entries: Vec<RegisteredChain>) -> Result<Self, Self::Error> {
        let mut registry = ChainRegistry::new();
        for entry in entries {
            let name = entry.metadata.name.clone();
            registry.insert(&name, entry.metadata, entry.source_set.as_deref())?;
        }
        Ok(registry)
    }
}

impl From<ChainRegistry> for Vec<RegisteredChain> {
    fn from(registry: ChainRegistry) -> Self {
        registry.entries
    }
}
