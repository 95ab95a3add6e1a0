//! Declarative per-role chain policies

use super::chain_metadata::ChainFamily;
use serde::{Deserialize, Serialize};

/// A predicate over the chain family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyPredicate {
    /// Chains of exactly this family
    Is(ChainFamily),
    /// Chains of any other family
    IsNot(ChainFamily),
}

impl FamilyPredicate {
    pub fn matches(self, family: ChainFamily) -> bool {
        match self {
            FamilyPredicate::Is(f) => family == f,
            FamilyPredicate::IsNot(f) => family != f,
        }
    }
}

/// Policies usable as the base of an exclusion.
///
/// Exclusions cannot be nested, so this is [`RolePolicy`] without the
/// `SubsetExcluding` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case", try_from = "RawPolicy")]
pub enum BasePolicy {
    AllChains,
    Subset { family: FamilyPredicate },
}

/// Rule deciding which registered chains a role runs against.
///
/// Wire form is internally tagged:
///
/// ```toml
/// [roles.scraper]
/// policy = "subset_excluding"
/// base = { policy = "subset", family = { is = "ethereum" } }
/// excluded = ["mantapacific"]
/// ```
///
/// Keys that do not belong to the named policy are rejected, including
/// `excluded` on a plain `subset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case", try_from = "RawPolicy")]
pub enum RolePolicy {
    /// Every supported chain
    AllChains,
    /// Supported chains whose family matches
    Subset { family: FamilyPredicate },
    /// The base policy's chains minus an explicit exclusion list
    SubsetExcluding {
        base: BasePolicy,
        excluded: Vec<String>,
    },
}

impl RolePolicy {
    pub fn subset(family: FamilyPredicate) -> Self {
        RolePolicy::Subset { family }
    }

    pub fn excluding<I, S>(base: BasePolicy, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RolePolicy::SubsetExcluding {
            base,
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<BasePolicy> for RolePolicy {
    fn from(base: BasePolicy) -> Self {
        match base {
            BasePolicy::AllChains => RolePolicy::AllChains,
            BasePolicy::Subset { family } => RolePolicy::Subset { family },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PolicyKind {
    AllChains,
    Subset,
    SubsetExcluding,
}

impl PolicyKind {
    fn as_str(self) -> &'static str {
        match self {
            PolicyKind::AllChains => "all_chains",
            PolicyKind::Subset => "subset",
            PolicyKind::SubsetExcluding => "subset_excluding",
        }
    }
}

/// Flat wire form shared by [`BasePolicy`] and [`RolePolicy`]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicy {
    policy: PolicyKind,
    #[serde(default)]
    family: Option<FamilyPredicate>,
    #[serde(default)]
    base: Option<BasePolicy>,
    #[serde(default)]
    excluded: Option<Vec<String>>,
}

impl RawPolicy {
    /// Fail if any key outside `allowed` is set.
    fn only(&self, allowed: &[&str]) -> Result<(), String> {
        let present = [
            ("family", self.family.is_some()),
            ("base", self.base.is_some()),
            ("excluded", self.excluded.is_some()),
        ];
        let stray = present.iter().find(|(key, set)| *set && !allowed.contains(key));
        match stray {
            Some((key, _)) => Err(format!(
                "policy '{}' does not take `{key}`",
                self.policy.as_str()
            )),
            None => Ok(()),
        }
    }

    fn required<T>(value: Option<T>, policy: PolicyKind, key: &str) -> Result<T, String> {
        value.ok_or_else(|| format!("policy '{}' requires `{key}`", policy.as_str()))
    }
}

impl TryFrom<RawPolicy> for BasePolicy {
    type Error = String;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        match raw.policy {
            PolicyKind::AllChains => {
                raw.only(&[])?;
                Ok(BasePolicy::AllChains)
            }
            PolicyKind::Subset => {
                raw.only(&["family"])?;
                let family = RawPolicy::required(raw.family, raw.policy, "family")?;
                Ok(BasePolicy::Subset { family })
            }
            PolicyKind::SubsetExcluding => {
                Err("exclusions cannot be nested: base must be all_chains or subset".to_string())
            }
        }
    }
}

impl TryFrom<RawPolicy> for RolePolicy {
    type Error = String;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        match raw.policy {
            PolicyKind::AllChains | PolicyKind::Subset => BasePolicy::try_from(raw).map(Into::into),
            PolicyKind::SubsetExcluding => {
                raw.only(&["base", "excluded"])?;
                let base = RawPolicy::required(raw.base, raw.policy, "base")?;
                let excluded = RawPolicy::required(raw.excluded, raw.policy, "excluded")?;
                Ok(RolePolicy::SubsetExcluding { base, excluded })
            }
        }
    }
}
