//! Partial metadata and named override sets

use super::chain_metadata::FeeOverrides;
use serde::{Deserialize, Serialize};

/// Block settings where every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialBlockSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorg_period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate_block_time: Option<u32>,
}

/// Fields that may be overridden on top of a catalog entry.
///
/// Identity fields (name, family, chain and domain ids) are deliberately
/// absent: an override can tune a chain but never turn it into another one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialChainMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<PartialBlockSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_overrides: Option<FeeOverrides>,
}

impl PartialChainMetadata {
    /// Override only the confirmation count.
    pub fn confirmations(confirmations: u32) -> Self {
        Self {
            blocks: Some(PartialBlockSettings {
                confirmations: Some(confirmations),
                ..PartialBlockSettings::default()
            }),
            ..Self::default()
        }
    }

    /// Override only the fee fields.
    pub fn fees(fees: FeeOverrides) -> Self {
        Self {
            transaction_overrides: Some(fees),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.blocks.is_none() && self.transaction_overrides.is_none()
    }
}

/// One chain entry of an override set.
///
/// Written flat (`name` next to the overriding fields). Any other key is an
/// error, so a misspelled field can never fall back to the catalog value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawChainOverride")]
pub struct ChainOverride {
    /// Catalog name of the chain
    pub name: String,
    #[serde(flatten)]
    pub metadata: PartialChainMetadata,
}

/// Wire form of [`ChainOverride`]; `flatten` cannot be combined with
/// `deny_unknown_fields`, so the fields are spelled out here.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChainOverride {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    blocks: Option<PartialBlockSettings>,
    #[serde(default)]
    transaction_overrides: Option<FeeOverrides>,
}

impl From<RawChainOverride> for ChainOverride {
    fn from(raw: RawChainOverride) -> Self {
        ChainOverride {
            name: raw.name,
            metadata: PartialChainMetadata {
                display_name: raw.display_name,
                blocks: raw.blocks,
                transaction_overrides: raw.transaction_overrides,
            },
        }
    }
}

impl ChainOverride {
    /// Include a catalog chain unchanged.
    pub fn inherit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: PartialChainMetadata::default(),
        }
    }

    pub fn with(name: impl Into<String>, metadata: PartialChainMetadata) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }
}

/// A named, ordered group of chains and their overrides.
///
/// Every chain listed in a set is registered, including those with no
/// overriding fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideSet {
    pub name: String,
    #[serde(default)]
    pub chains: Vec<ChainOverride>,
}

impl OverrideSet {
    pub fn new(name: impl Into<String>, chains: Vec<ChainOverride>) -> Self {
        Self {
            name: name.into(),
            chains,
        }
    }

    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.chains.iter().map(|c| c.name.as_str())
    }
}
