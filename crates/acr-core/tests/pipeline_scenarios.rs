//! End-to-end scenarios: catalog -> override sets -> registry -> role assignment

use agent_chain_registry_core::merge::merge;
use agent_chain_registry_core::resolve::resolve;
use agent_chain_registry_core::schema::{
    BasePolicy, ChainFamily, ChainId, ChainMetadata, ChainOverride, FamilyPredicate, FeeOverrides,
    OverrideSet, PartialChainMetadata, Role, RolePolicy, TransactionFeePolicy,
};
use agent_chain_registry_core::{ChainRegistry, RegistryError, StaticCatalog};
use std::collections::BTreeMap;

fn catalog() -> StaticCatalog {
    StaticCatalog::from_chains([
        ChainMetadata::new("A", ChainFamily::Ethereum, ChainId::Number(1), 1),
        ChainMetadata::new("B", ChainFamily::Ethereum, ChainId::Number(2), 2),
        ChainMetadata::new("C", ChainFamily::Cosmos, ChainId::Name("c-1".to_string()), 3),
    ])
    .unwrap()
}

fn eth() -> FamilyPredicate {
    FamilyPredicate::Is(ChainFamily::Ethereum)
}

fn override_sets() -> Vec<OverrideSet> {
    vec![
        OverrideSet::new(
            "ethereum",
            vec![
                ChainOverride::with("A", PartialChainMetadata::confirmations(3)),
                ChainOverride::inherit("B"),
            ],
        ),
        OverrideSet::new(
            "other",
            vec![ChainOverride::with(
                "C",
                PartialChainMetadata::fees(FeeOverrides {
                    gas_price: Some(7),
                    ..FeeOverrides::default()
                }),
            )],
        ),
    ]
}

#[test]
fn test_resolves_roles_for_mixed_families() {
    let registry = ChainRegistry::build_from(&catalog(), &override_sets()).unwrap();
    let policies = BTreeMap::from([
        (Role::Validator, RolePolicy::AllChains),
        (Role::Relayer, RolePolicy::subset(eth())),
        (
            Role::Scraper,
            RolePolicy::excluding(BasePolicy::Subset { family: eth() }, ["A"]),
        ),
    ]);

    let assignment = resolve(&registry, &policies).unwrap();

    assert_eq!(registry.supported_chains(), vec!["A", "B", "C"]);
    assert_eq!(assignment.chains(&Role::Validator).unwrap(), ["A", "B", "C"]);
    assert_eq!(assignment.chains(&Role::Relayer).unwrap(), ["A", "B"]);
    assert_eq!(assignment.chains(&Role::Scraper).unwrap(), ["B"]);

    assert_eq!(registry.get("A").unwrap().blocks.confirmations, 3);
    assert_eq!(
        registry.get("C").unwrap().transaction_overrides,
        Some(TransactionFeePolicy::Legacy { gas_price: 7 })
    );
}

#[test]
fn test_chain_declared_by_two_sets_fails_build() {
    let mut sets = override_sets();
    sets[1].chains.push(ChainOverride::inherit("B"));

    let err = ChainRegistry::build_from(&catalog(), &sets).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateChain { .. }));
    assert_eq!(err.chain(), "B");
}

#[test]
fn test_excluding_chain_outside_base_subset_fails() {
    let registry = ChainRegistry::build_from(&catalog(), &override_sets()).unwrap();
    let policies = BTreeMap::from([(
        Role::Scraper,
        RolePolicy::excluding(BasePolicy::Subset { family: eth() }, ["C"]),
    )]);

    let err = resolve(&registry, &policies).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownExclusion {
            role: Role::Scraper,
            chain: "C".to_string(),
        }
    );
}

#[test]
fn test_invalid_fee_override_fails_build() {
    let sets = vec![OverrideSet::new(
        "ethereum",
        vec![ChainOverride::with(
            "A",
            PartialChainMetadata::fees(FeeOverrides {
                gas_price: None,
                max_fee_per_gas: Some(100),
                max_priority_fee_per_gas: Some(101),
            }),
        )],
    )];

    let err = ChainRegistry::build_from(&catalog(), &sets).unwrap_err();
    assert!(matches!(err, RegistryError::Validation { ref chain, .. } if chain == "A"));
}

#[test]
fn test_merge_identity_over_every_catalog_entry() {
    let catalog = catalog();
    for name in ["A", "B", "C"] {
        let base = agent_chain_registry_core::MetadataCatalog::get(&catalog, name).unwrap();
        assert_eq!(&merge(base, &PartialChainMetadata::default()).unwrap(), base);
    }
}

#[test]
fn test_registry_and_assignment_shared_across_threads() {
    let registry = std::sync::Arc::new(
        ChainRegistry::build_from(&catalog(), &override_sets()).unwrap(),
    );
    let policies = BTreeMap::from([(Role::Validator, RolePolicy::AllChains)]);
    let assignment = std::sync::Arc::new(resolve(&registry, &policies).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = std::sync::Arc::clone(&registry);
            let assignment = std::sync::Arc::clone(&assignment);
            std::thread::spawn(move || {
                assert_eq!(
                    assignment.chains(&Role::Validator).unwrap(),
                    registry.supported_chains().as_slice()
                );
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
