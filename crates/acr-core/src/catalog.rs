//! Base chain metadata catalog
//!
//! The catalog is the canonical, read-only source of per-chain metadata that
//! override sets are layered onto. The registry only needs lookup by name and
//! enumeration of names, which is what [`MetadataCatalog`] exposes.
//! [`StaticCatalog`] is an in-memory implementation loaded from TOML:
//!
//! ```toml
//! [[chains]]
//! name = "ethereum"
//! family = "ethereum"
//! chain_id = 1
//! domain_id = 1
//! blocks = { confirmations = 1, reorg_period = 14, estimate_block_time = 13 }
//! ```

use crate::error::{LoadError, RegistryError};
use crate::schema::ChainMetadata;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Read-only lookup of canonical chain metadata.
pub trait MetadataCatalog {
    /// Look up the base record for a chain.
    fn get(&self, name: &str) -> Option<&ChainMetadata>;

    /// All chain names known to the catalog.
    fn chain_names(&self) -> Vec<&str>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    chains: Vec<ChainMetadata>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    chains: Vec<ChainMetadata>,
}

impl StaticCatalog {
    /// Build a catalog from records, rejecting duplicate names.
    pub fn from_chains<I>(chains: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ChainMetadata>,
    {
        let mut catalog = StaticCatalog::default();
        for chain in chains {
            if catalog.index.contains_key(&chain.name) {
                return Err(RegistryError::DuplicateChain {
                    chain: chain.name,
                    first: "catalog".to_string(),
                    second: "catalog".to_string(),
                });
            }
            catalog.index.insert(chain.name.clone(), catalog.chains.len());
            catalog.chains.push(chain);
        }
        Ok(catalog)
    }

    /// Parse a catalog from a TOML document.
    ///
    /// `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, LoadError> {
        let file: CatalogFile = toml::from_str(contents).map_err(|source| LoadError::TomlParse {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(StaticCatalog::from_chains(file.chains)?)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        StaticCatalog::from_toml_str(&contents, path)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl MetadataCatalog for StaticCatalog {
    fn get(&self, name: &str) -> Option<&ChainMetadata> {
        self.index.get(name).map(|&i| &self.chains[i])
    }

    fn chain_names(&self) -> Vec<&str> {
        self.chains.iter().map(|c| c.name.as_str()).collect()
    }
}
