//! Role assignment resolution
//!
//! [`resolve`] turns a set of declarative [`RolePolicy`] values into the
//! concrete chains each role runs against. Resolution is all-or-nothing: if
//! any role fails, no assignment is produced.

use crate::error::RegistryError;
use crate::registry::ChainRegistry;
use crate::schema::{BasePolicy, Role, RolePolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Resolved mapping from role to the ordered chains its agents run against.
///
/// Immutable once resolved. Any change to the registry or the policies
/// requires resolving again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentChainAssignment {
    roles: BTreeMap<Role, Vec<String>>,
}

impl AgentChainAssignment {
    /// Chains for `role`, or `None` if the role has no policy.
    pub fn chains(&self, role: &Role) -> Option<&[String]> {
        self.roles.get(role).map(Vec::as_slice)
    }

    /// Roles with a resolved assignment, in role order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &[String])> {
        self.roles.iter().map(|(role, chains)| (role, chains.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Verify the assignment against `registry`: every chain must be
    /// registered and no role may list a chain twice.
    ///
    /// Useful after deserialising an assignment produced elsewhere.
    pub fn validate(&self, registry: &ChainRegistry) -> Result<(), RegistryError> {
        for (role, chains) in &self.roles {
            check_postcondition(registry, role, chains)?;
        }
        Ok(())
    }
}

/// Resolve every role's policy against `registry`.
///
/// Roles are processed in [`Role`] order, so when several roles are invalid
/// the reported error is deterministic.
///
/// # Errors
///
/// - [`RegistryError::UnknownExclusion`] if an exclusion names a chain that is
///   not part of the base subset
/// - [`RegistryError::AssignmentInvariant`] if a resolved role lists a chain
///   twice or a chain that is not registered
pub fn resolve(
    registry: &ChainRegistry,
    policies: &BTreeMap<Role, RolePolicy>,
) -> Result<AgentChainAssignment, RegistryError> {
    let mut roles = BTreeMap::new();

    for (role, policy) in policies {
        let chains = resolve_policy(registry, role, policy)?;
        check_postcondition(registry, role, &chains)?;
        debug!(role = %role, chains = chains.len(), "resolved role");
        roles.insert(role.clone(), chains);
    }

    info!(roles = roles.len(), "agent chain assignment resolved");
    Ok(AgentChainAssignment { roles })
}

fn resolve_policy(
    registry: &ChainRegistry,
    role: &Role,
    policy: &RolePolicy,
) -> Result<Vec<String>, RegistryError> {
    match policy {
        RolePolicy::AllChains => Ok(resolve_base(registry, &BasePolicy::AllChains)),
        RolePolicy::Subset { family } => Ok(resolve_base(
            registry,
            &BasePolicy::Subset { family: *family },
        )),
        RolePolicy::SubsetExcluding { base, excluded } => {
            let chains = resolve_base(registry, base);
            if let Some(stale) = excluded.iter().find(|name| !chains.contains(*name)) {
                return Err(RegistryError::UnknownExclusion {
                    role: role.clone(),
                    chain: stale.clone(),
                });
            }
            Ok(chains
                .into_iter()
                .filter(|name| !excluded.contains(name))
                .collect())
        }
    }
}

fn resolve_base(registry: &ChainRegistry, base: &BasePolicy) -> Vec<String> {
    let names = match base {
        BasePolicy::AllChains => registry.supported_chains(),
        BasePolicy::Subset { family } => registry.chains_matching(*family),
    };
    names.into_iter().map(str::to_string).collect()
}

fn check_postcondition(
    registry: &ChainRegistry,
    role: &Role,
    chains: &[String],
) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for chain in chains {
        if !registry.contains(chain) {
            return Err(RegistryError::AssignmentInvariant {
                role: role.clone(),
                chain: chain.clone(),
                reason: "chain is not in the registry".to_string(),
            });
        }
        if !seen.insert(chain.as_str()) {
            return Err(RegistryError::AssignmentInvariant {
                role: role.clone(),
                chain: chain.clone(),
                reason: "chain is listed more than once".to_string(),
            });
        }
    }
    Ok(())
}
