//! Deployment environment definitions
//!
//! An environment file declares which catalog chains a deployment supports,
//! grouped into ordered override sets, and which chains each agent role runs
//! against:
//!
//! ```toml
//! environment = "mainnet3"
//!
//! [[override_sets]]
//! name = "ethereum"
//!
//! [[override_sets.chains]]
//! name = "ethereum"
//! blocks = { confirmations = 3 }
//!
//! [roles.validator]
//! policy = "all_chains"
//! ```
//!
//! [`EnvironmentConfig::build`] runs the whole pipeline and returns a
//! [`BuiltEnvironment`] whose registry and assignment are shared behind
//! [`Arc`]s. Rebuilding produces a new pair; existing readers keep the old one.

use crate::catalog::MetadataCatalog;
use crate::error::{LoadError, RegistryError};
use crate::registry::ChainRegistry;
use crate::resolve::{AgentChainAssignment, resolve};
use crate::schema::{OverrideSet, Role, RolePolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Static configuration of one deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Environment name, e.g. `mainnet3`
    pub environment: String,
    /// Override sets, applied in order
    #[serde(default)]
    pub override_sets: Vec<OverrideSet>,
    /// Per-role chain policies
    #[serde(default)]
    pub roles: BTreeMap<Role, RolePolicy>,
}

impl EnvironmentConfig {
    /// Parse an environment from a TOML document.
    ///
    /// `origin` is only used in error messages.
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, LoadError> {
        toml::from_str(contents).map_err(|source| LoadError::TomlParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load an environment file from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        EnvironmentConfig::from_toml_str(&contents, path)
    }

    /// Build the registry and resolve role assignments against `catalog`.
    pub fn build<C>(&self, catalog: &C) -> Result<BuiltEnvironment, RegistryError>
    where
        C: MetadataCatalog + ?Sized,
    {
        let registry = ChainRegistry::build_from(catalog, &self.override_sets)?;
        let assignment = resolve(&registry, &self.roles)?;
        info!(
            environment = %self.environment,
            chains = registry.len(),
            roles = assignment.len(),
            "environment built"
        );
        Ok(BuiltEnvironment {
            name: self.environment.clone(),
            registry: Arc::new(registry),
            assignment: Arc::new(assignment),
        })
    }
}

/// A fully built environment: the registry and the assignment resolved from
/// it. Both halves are immutable and cheap to share across threads.
#[derive(Debug, Clone)]
pub struct BuiltEnvironment {
    pub name: String,
    pub registry: Arc<ChainRegistry>,
    pub assignment: Arc<AgentChainAssignment>,
}

impl BuiltEnvironment {
    /// Chains for `role`, or an empty slice if the role has no policy.
    pub fn chains_for(&self, role: &Role) -> &[String] {
        self.assignment.chains(role).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::schema::{ChainFamily, ChainId, ChainMetadata};
    use std::path::PathBuf;

    const ENVIRONMENT: &str = r#"
environment = "testnet"

[[override_sets]]
name = "ethereum"

[[override_sets.chains]]
name = "A"
blocks = { confirmations = 3 }

[[override_sets.chains]]
name = "B"

[[override_sets]]
name = "other"

[[override_sets.chains]]
name = "C"
transaction_overrides = { gas_price = 7 }

[roles.validator]
policy = "all_chains"

[roles.relayer]
policy = "subset"
family = { is = "ethereum" }

[roles.scraper]
policy = "subset_excluding"
base = { policy = "subset", family = { is = "ethereum" } }
excluded = ["A"]
"#;

    fn parse(contents: &str) -> Result<EnvironmentConfig, LoadError> {
        EnvironmentConfig::from_toml_str(contents, &PathBuf::from("env.toml"))
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::from_chains([
            ChainMetadata::new("A", ChainFamily::Ethereum, ChainId::Number(1), 1),
            ChainMetadata::new("B", ChainFamily::Ethereum, ChainId::Number(2), 2),
            ChainMetadata::new("C", ChainFamily::Cosmos, ChainId::Name("c-1".into()), 3),
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_and_build() {
        let config = parse(ENVIRONMENT).unwrap();
        assert_eq!(config.environment, "testnet");
        assert_eq!(config.override_sets.len(), 2);
        assert_eq!(config.roles.len(), 3);

        let built = config.build(&catalog()).unwrap();
        assert_eq!(built.name, "testnet");
        assert_eq!(built.registry.supported_chains(), vec!["A", "B", "C"]);
        assert_eq!(built.chains_for(&Role::Validator), ["A", "B", "C"]);
        assert_eq!(built.chains_for(&Role::Relayer), ["A", "B"]);
        assert_eq!(built.chains_for(&Role::Scraper), ["B"]);
        assert!(built.chains_for(&Role::Deployer).is_empty());
    }

    #[test]
    fn test_rebuild_yields_independent_pair() {
        let config = parse(ENVIRONMENT).unwrap();
        let first = config.build(&catalog()).unwrap();
        let reader = Arc::clone(&first.registry);

        let mut changed = config.clone();
        changed.override_sets.truncate(1);
        changed.roles.remove(&Role::Validator);
        let second = changed.build(&catalog()).unwrap();

        assert_eq!(reader.supported_chains(), vec!["A", "B", "C"]);
        assert_eq!(second.registry.supported_chains(), vec!["A", "B"]);
        assert!(!Arc::ptr_eq(&reader, &second.registry));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let contents = format!("chains = []\n{ENVIRONMENT}");
        let err = parse(&contents).unwrap_err();
        assert!(matches!(err, LoadError::TomlParse { .. }));
    }

    #[test]
    fn test_misspelled_keys_fail_instead_of_building() {
        let cases = [
            // singular table name would leave the set empty
            ENVIRONMENT.replace("[[override_sets.chains]]", "[[override_sets.chain]]"),
            // chain-level field instead of `blocks = { ... }`
            ENVIRONMENT.replace("blocks = { confirmations = 3 }", "confirmations = 3"),
            ENVIRONMENT.replace("transaction_overrides =", "transaction_override ="),
            // exclusion list on a policy that has none
            ENVIRONMENT.replace("[roles.scraper]", "excluded = [\"B\"]\n\n[roles.scraper]"),
        ];

        for contents in &cases {
            assert_ne!(contents, ENVIRONMENT);
            let err = parse(contents).unwrap_err();
            assert!(matches!(err, LoadError::TomlParse { .. }), "{err}");
        }
    }

    #[test]
    fn test_built_environment_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BuiltEnvironment>();
    }
}
