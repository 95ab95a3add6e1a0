//! Effective chain metadata
//!
//! A [`ChainMetadata`] record is what every downstream consumer sees after the
//! catalog entry has been merged with its overrides. Records are validated on
//! deserialisation, so a persisted registry cannot smuggle in a malformed fee
//! policy.

use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainFamily {
    /// EVM-compatible chains
    Ethereum,
    /// Cosmos SDK chains
    Cosmos,
    /// Solana VM chains
    Sealevel,
}

impl ChainFamily {
    /// Returns true for EVM-compatible chains.
    pub fn is_ethereum(self) -> bool {
        matches!(self, ChainFamily::Ethereum)
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFamily::Ethereum => write!(f, "ethereum"),
            ChainFamily::Cosmos => write!(f, "cosmos"),
            ChainFamily::Sealevel => write!(f, "sealevel"),
        }
    }
}

impl std::str::FromStr for ChainFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(ChainFamily::Ethereum),
            "cosmos" => Ok(ChainFamily::Cosmos),
            "sealevel" => Ok(ChainFamily::Sealevel),
            other => Err(format!(
                "Unknown chain family '{other}' (expected ethereum, cosmos or sealevel)"
            )),
        }
    }
}

/// Native chain identifier: numeric for EVM chains, a string for e.g. Cosmos.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Number(n) => write!(f, "{n}"),
            ChainId::Name(s) => write!(f, "{s}"),
        }
    }
}

/// Block confirmation and timing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockSettings {
    /// Blocks to wait before a transaction counts as confirmed
    pub confirmations: u32,
    /// Blocks after which a chain is considered final
    pub reorg_period: u32,
    /// Expected block time in seconds
    pub estimate_block_time: u32,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            confirmations: 1,
            reorg_period: 0,
            estimate_block_time: 1,
        }
    }
}

/// Raw transaction fee fields as they appear in configuration.
///
/// Every field is optional. This is the form overrides are written in and
/// the wire form of [`TransactionFeePolicy`]; converting to the tagged policy
/// is where validation happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<u64>,
}

impl FeeOverrides {
    /// Lay `other` over `self`: fields present in `other` win.
    pub fn overlay(self, other: &FeeOverrides) -> FeeOverrides {
        FeeOverrides {
            gas_price: other.gas_price.or(self.gas_price),
            max_fee_per_gas: other.max_fee_per_gas.or(self.max_fee_per_gas),
            max_priority_fee_per_gas: other
                .max_priority_fee_per_gas
                .or(self.max_priority_fee_per_gas),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gas_price.is_none()
            && self.max_fee_per_gas.is_none()
            && self.max_priority_fee_per_gas.is_none()
    }
}

/// Transaction fee policy, either legacy or EIP-1559 style. Amounts in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeeOverrides", into = "FeeOverrides")]
pub enum TransactionFeePolicy {
    Legacy {
        gas_price: u64,
    },
    Eip1559 {
        max_fee_per_gas: u64,
        max_priority_fee_per_gas: u64,
    },
}

impl TransactionFeePolicy {
    /// Convert raw fee fields into a policy.
    ///
    /// Returns `Ok(None)` when no field is set.
    pub fn from_raw(raw: &FeeOverrides) -> Result<Option<Self>, String> {
        match (raw.gas_price, raw.max_fee_per_gas, raw.max_priority_fee_per_gas) {
            (None, None, None) => Ok(None),
            (Some(gas_price), None, None) => Ok(Some(TransactionFeePolicy::Legacy { gas_price })),
            (Some(_), _, _) => Err(
                "transaction overrides mix legacy gas_price with max_fee_per_gas/max_priority_fee_per_gas"
                    .to_string(),
            ),
            (None, Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => {
                if max_priority_fee_per_gas > max_fee_per_gas {
                    return Err(format!(
                        "max_priority_fee_per_gas ({max_priority_fee_per_gas}) exceeds max_fee_per_gas ({max_fee_per_gas})"
                    ));
                }
                Ok(Some(TransactionFeePolicy::Eip1559 {
                    max_fee_per_gas,
                    max_priority_fee_per_gas,
                }))
            }
            (None, _, _) => Err(
                "EIP-1559 overrides require both max_fee_per_gas and max_priority_fee_per_gas"
                    .to_string(),
            ),
        }
    }

    pub fn to_raw(self) -> FeeOverrides {
        match self {
            TransactionFeePolicy::Legacy { gas_price } => FeeOverrides {
                gas_price: Some(gas_price),
                ..FeeOverrides::default()
            },
            TransactionFeePolicy::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => FeeOverrides {
                gas_price: None,
                max_fee_per_gas: Some(max_fee_per_gas),
                max_priority_fee_per_gas: Some(max_priority_fee_per_gas),
            },
        }
    }
}

impl TryFrom<FeeOverrides> for TransactionFeePolicy {
    type Error = String;

    fn try_from(raw: FeeOverrides) -> Result<Self, Self::Error> {
        TransactionFeePolicy::from_raw(&raw)?
            .ok_or_else(|| "transaction overrides must set at least one fee field".to_string())
    }
}

impl From<TransactionFeePolicy> for FeeOverrides {
    fn from(policy: TransactionFeePolicy) -> Self {
        policy.to_raw()
    }
}

impl fmt::Display for TransactionFeePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionFeePolicy::Legacy { gas_price } => write!(f, "gas_price={gas_price}"),
            TransactionFeePolicy::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => write!(
                f,
                "max_fee_per_gas={max_fee_per_gas} max_priority_fee_per_gas={max_priority_fee_per_gas}"
            ),
        }
    }
}

/// Effective metadata for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChainMetadata")]
pub struct ChainMetadata {
    /// Unique chain name, the registry key
    pub name: String,
    pub family: ChainFamily,
    pub chain_id: ChainId,
    /// Messaging protocol domain
    pub domain_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub blocks: BlockSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_overrides: Option<TransactionFeePolicy>,
}

impl ChainMetadata {
    /// Create a record with default block settings and no fee policy.
    pub fn new(
        name: impl Into<String>,
        family: ChainFamily,
        chain_id: ChainId,
        domain_id: u32,
    ) -> Self {
        Self {
            name: name.into(),
            family,
            chain_id,
            domain_id,
            display_name: None,
            blocks: BlockSettings::default(),
            transaction_overrides: None,
        }
    }
}

/// Unvalidated wire form of [`ChainMetadata`]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChainMetadata {
    name: String,
    family: ChainFamily,
    chain_id: ChainId,
    domain_id: u32,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    blocks: BlockSettings,
    #[serde(default)]
    transaction_overrides: Option<FeeOverrides>,
}

impl TryFrom<RawChainMetadata> for ChainMetadata {
    type Error = RegistryError;

    fn try_from(raw: RawChainMetadata) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() {
            return Err(RegistryError::validation(&raw.name, "chain name must not be empty"));
        }
        let transaction_overrides = match raw.transaction_overrides {
            Some(fees) => TransactionFeePolicy::from_raw(&fees)
                .map_err(|reason| RegistryError::validation(&raw.name, reason))?,
            None => None,
        };
        Ok(ChainMetadata {
            name: raw.name,
            family: raw.family,
            chain_id: raw.chain_id,
            domain_id: raw.domain_id,
            display_name: raw.display_name,
            blocks: raw.blocks,
            transaction_overrides,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_policy_from_raw_variants() {
        let legacy = FeeOverrides {
            gas_price: Some(7_000_000_000),
            ..FeeOverrides::default()
        };
        assert_eq!(
            TransactionFeePolicy::from_raw(&legacy).unwrap(),
            Some(TransactionFeePolicy::Legacy { gas_price: 7_000_000_000 })
        );

        let eip1559 = FeeOverrides {
            gas_price: None,
            max_fee_per_gas: Some(150),
            max_priority_fee_per_gas: Some(150),
        };
        assert!(matches!(
            TransactionFeePolicy::from_raw(&eip1559).unwrap(),
            Some(TransactionFeePolicy::Eip1559 { .. })
        ));

        assert_eq!(TransactionFeePolicy::from_raw(&FeeOverrides::default()).unwrap(), None);
    }

    #[test]
    fn test_fee_policy_rejects_mixed_and_incomplete() {
        let mixed = FeeOverrides {
            gas_price: Some(1),
            max_fee_per_gas: Some(2),
            max_priority_fee_per_gas: None,
        };
        let err = TransactionFeePolicy::from_raw(&mixed).unwrap_err();
        assert!(err.contains("mix legacy"), "error was: {err}");

        let incomplete = FeeOverrides {
            max_priority_fee_per_gas: Some(2),
            ..FeeOverrides::default()
        };
        let err = TransactionFeePolicy::from_raw(&incomplete).unwrap_err();
        assert!(err.contains("require both"), "error was: {err}");
    }

    #[test]
    fn test_fee_policy_rejects_priority_above_max() {
        let raw = FeeOverrides {
            gas_price: None,
            max_fee_per_gas: Some(5),
            max_priority_fee_per_gas: Some(6),
        };
        let err = TransactionFeePolicy::from_raw(&raw).unwrap_err();
        assert!(err.contains("exceeds"), "error was: {err}");
    }

    #[test]
    fn test_chain_metadata_parses_from_toml() {
        let toml_str = r#"
name = "polygon"
family = "ethereum"
chain_id = 137
domain_id = 137
blocks = { confirmations = 1, reorg_period = 256, estimate_block_time = 2 }
transaction_overrides = { max_fee_per_gas = 500, max_priority_fee_per_gas = 100 }
"#;
        let chain: ChainMetadata = toml::from_str(toml_str).unwrap();
        assert_eq!(chain.name, "polygon");
        assert_eq!(chain.chain_id, ChainId::Number(137));
        assert_eq!(chain.blocks.reorg_period, 256);
        assert_eq!(
            chain.transaction_overrides,
            Some(TransactionFeePolicy::Eip1559 {
                max_fee_per_gas: 500,
                max_priority_fee_per_gas: 100
            })
        );
    }

    #[test]
    fn test_chain_metadata_rejects_bad_fee_policy_on_load() {
        let json = r#"{
            "name": "bsc",
            "family": "ethereum",
            "chain_id": 56,
            "domain_id": 56,
            "transaction_overrides": { "gas_price": 1, "max_fee_per_gas": 2 }
        }"#;
        let err = serde_json::from_str::<ChainMetadata>(json).unwrap_err();
        assert!(err.to_string().contains("bsc"), "error was: {err}");
    }

    #[test]
    fn test_chain_metadata_rejects_negative_confirmations() {
        let toml_str = r#"
name = "bsc"
family = "ethereum"
chain_id = 56
domain_id = 56
blocks = { confirmations = -1, reorg_period = 15, estimate_block_time = 3 }
"#;
        assert!(toml::from_str::<ChainMetadata>(toml_str).is_err());
    }

    #[test]
    fn test_string_chain_id_and_json_shape() {
        let mut chain = ChainMetadata::new(
            "neutron",
            ChainFamily::Cosmos,
            ChainId::Name("neutron-1".to_string()),
            1853125230,
        );
        chain.transaction_overrides = Some(TransactionFeePolicy::Legacy { gas_price: 7 });

        let value = serde_json::to_value(&chain).unwrap();
        assert_eq!(value["chain_id"], "neutron-1");
        assert_eq!(value["family"], "cosmos");
        assert_eq!(value["transaction_overrides"]["gas_price"], 7);
        assert!(value["transaction_overrides"].get("max_fee_per_gas").is_none());

        let parsed: ChainMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, chain);
    }
}
