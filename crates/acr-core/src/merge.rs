//! Override merging
//!
//! [`merge`] lays a [`PartialChainMetadata`] over a catalog record. Fields
//! present in the override replace the base, absent fields are inherited, and
//! nested structures (block settings, fee fields) merge field by field. The
//! merged fee fields are then converted back into a tagged
//! [`TransactionFeePolicy`], which is where malformed combinations are caught.

use crate::error::RegistryError;
use crate::schema::{
    BlockSettings, ChainMetadata, PartialBlockSettings, PartialChainMetadata, TransactionFeePolicy,
};
use tracing::debug;

/// Merge `override_` onto `base`, producing a validated effective record.
///
/// # Errors
///
/// Returns [`RegistryError::Validation`] if the resulting fee fields mix the
/// legacy and EIP-1559 variants, set only half of an EIP-1559 pair, or have
/// `max_priority_fee_per_gas > max_fee_per_gas`.
pub fn merge(
    base: &ChainMetadata,
    override_: &PartialChainMetadata,
) -> Result<ChainMetadata, RegistryError> {
    let mut merged = base.clone();

    if let Some(display_name) = &override_.display_name {
        merged.display_name = Some(display_name.clone());
    }

    if let Some(blocks) = &override_.blocks {
        merged.blocks = merge_blocks(base.blocks, blocks);
    }

    if let Some(fees) = &override_.transaction_overrides {
        let base_fees = base
            .transaction_overrides
            .map(TransactionFeePolicy::to_raw)
            .unwrap_or_default();
        let raw = base_fees.overlay(fees);
        merged.transaction_overrides = TransactionFeePolicy::from_raw(&raw)
            .map_err(|reason| RegistryError::validation(&base.name, reason))?;
    }

    if merged != *base {
        debug!(chain = %base.name, "applied metadata override");
    }
    Ok(merged)
}

fn merge_blocks(base: BlockSettings, partial: &PartialBlockSettings) -> BlockSettings {
    BlockSettings {
        confirmations: partial.confirmations.unwrap_or(base.confirmations),
        reorg_period: partial.reorg_period.unwrap_or(base.reorg_period),
        estimate_block_time: partial.estimate_block_time.unwrap_or(base.estimate_block_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ChainFamily, ChainId, FeeOverrides};

    fn polygon() -> ChainMetadata {
        let mut chain =
            ChainMetadata::new("polygon", ChainFamily::Ethereum, ChainId::Number(137), 137);
        chain.blocks = BlockSettings {
            confirmations: 1,
            reorg_period: 256,
            estimate_block_time: 2,
        };
        chain
    }

    fn legacy(gas_price: u64) -> FeeOverrides {
        FeeOverrides {
            gas_price: Some(gas_price),
            ..FeeOverrides::default()
        }
    }

    fn eip1559(max: u64, priority: u64) -> FeeOverrides {
        FeeOverrides {
            gas_price: None,
            max_fee_per_gas: Some(max),
            max_priority_fee_per_gas: Some(priority),
        }
    }

    #[test]
    fn test_empty_override_is_identity() {
        let mut base = polygon();
        assert_eq!(merge(&base, &PartialChainMetadata::default()).unwrap(), base);

        base.transaction_overrides = Some(TransactionFeePolicy::Legacy { gas_price: 3 });
        base.display_name = Some("Polygon".to_string());
        assert_eq!(merge(&base, &PartialChainMetadata::default()).unwrap(), base);
    }

    #[test]
    fn test_nested_override_keeps_siblings() {
        let base = polygon();
        let merged = merge(&base, &PartialChainMetadata::confirmations(3)).unwrap();

        assert_eq!(merged.blocks.confirmations, 3);
        assert_eq!(merged.blocks.reorg_period, base.blocks.reorg_period);
        assert_eq!(merged.blocks.estimate_block_time, base.blocks.estimate_block_time);
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.family, base.family);
        assert_eq!(merged.transaction_overrides, None);
    }

    #[test]
    fn test_fee_override_applied() {
        let merged = merge(&polygon(), &PartialChainMetadata::fees(eip1559(500, 100))).unwrap();
        assert_eq!(
            merged.transaction_overrides,
            Some(TransactionFeePolicy::Eip1559 {
                max_fee_per_gas: 500,
                max_priority_fee_per_gas: 100
            })
        );
        assert_eq!(merged.blocks, polygon().blocks);
    }

    #[test]
    fn test_priority_above_max_rejected() {
        let err = merge(&polygon(), &PartialChainMetadata::fees(eip1559(100, 500))).unwrap_err();
        match err {
            RegistryError::Validation { chain, reason } => {
                assert_eq!(chain, "polygon");
                assert!(reason.contains("exceeds"), "reason was: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_partial_fee_field_merges_with_base_policy() {
        let mut base = polygon();
        base.transaction_overrides = Some(TransactionFeePolicy::Eip1559 {
            max_fee_per_gas: 500,
            max_priority_fee_per_gas: 100,
        });

        let lower_max = FeeOverrides {
            max_fee_per_gas: Some(200),
            ..FeeOverrides::default()
        };
        let merged = merge(&base, &PartialChainMetadata::fees(lower_max)).unwrap();
        assert_eq!(
            merged.transaction_overrides,
            Some(TransactionFeePolicy::Eip1559 {
                max_fee_per_gas: 200,
                max_priority_fee_per_gas: 100
            })
        );

        // Inherited priority fee now exceeds the overridden max
        let too_low = FeeOverrides {
            max_fee_per_gas: Some(50),
            ..FeeOverrides::default()
        };
        assert!(matches!(
            merge(&base, &PartialChainMetadata::fees(too_low)),
            Err(RegistryError::Validation { .. })
        ));
    }

    #[test]
    fn test_mixing_variants_with_base_rejected() {
        let mut base = polygon();
        base.transaction_overrides = Some(TransactionFeePolicy::Legacy { gas_price: 50 });

        let err = merge(&base, &PartialChainMetadata::fees(eip1559(500, 100))).unwrap_err();
        assert!(err.to_string().contains("mix legacy"), "error was: {err}");

        // Replacing a legacy price with another legacy price is fine
        let merged = merge(&base, &PartialChainMetadata::fees(legacy(7))).unwrap();
        assert_eq!(
            merged.transaction_overrides,
            Some(TransactionFeePolicy::Legacy { gas_price: 7 })
        );
    }
}
