//! Agent roles.
//!
//! [`Role`] names an operational agent category. Each role gets its own scope
//! of chains to run workers for. Roles not listed here may be expressed with
//! the `Custom(String)` variant (serialised as `"custom:<identifier>"`).
//!
//! # Serialisation
//!
//! All variants serialise/deserialise via their display string, so roles can
//! be used directly as keys of TOML tables and JSON objects.
//!
//! # Examples
//!
//! ```rust
//! use agent_chain_registry_core::schema::Role;
//! use std::str::FromStr;
//!
//! let r = Role::from_str("relayer").unwrap();
//! assert_eq!(r, Role::Relayer);
//! assert_eq!(r.to_string(), "relayer");
//!
//! let c = Role::from_str("custom:watchtower").unwrap();
//! assert!(matches!(c, Role::Custom(_)));
//!
//! assert!(Role::from_str("janitor").is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An agent role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// `validator`: signs checkpoints for messages dispatched from a chain
    Validator,
    /// `relayer`: delivers messages between chains
    Relayer,
    /// `scraper`: indexes chain activity
    Scraper,
    /// `deployer`
    Deployer,
    /// `kathy`: test message generator
    Kathy,
    /// A role not known to this crate, expressed as `"custom:<identifier>"`.
    ///
    /// The identifier portion must be non-empty.
    Custom(String),
}

impl Role {
    /// The built-in roles, in canonical order.
    pub const BUILTIN: [Role; 5] = [
        Role::Validator,
        Role::Relayer,
        Role::Scraper,
        Role::Deployer,
        Role::Kathy,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Validator => write!(f, "validator"),
            Role::Relayer => write!(f, "relayer"),
            Role::Scraper => write!(f, "scraper"),
            Role::Deployer => write!(f, "deployer"),
            Role::Kathy => write!(f, "kathy"),
            Role::Custom(id) => write!(f, "custom:{id}"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "validator" => Ok(Role::Validator),
            "relayer" => Ok(Role::Relayer),
            "scraper" => Ok(Role::Scraper),
            "deployer" => Ok(Role::Deployer),
            "kathy" => Ok(Role::Kathy),
            s if s.starts_with("custom:") => {
                let id = &s["custom:".len()..];
                if id.is_empty() {
                    Err(
                        "'custom:' requires a non-empty identifier (e.g., 'custom:watchtower')"
                            .to_string(),
                    )
                } else {
                    Ok(Role::Custom(id.to_string()))
                }
            }
            other => Err(format!(
                "Unknown role '{other}'. Use 'custom:<identifier>' for roles not built in."
            )),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Role::from_str(&s).map_err(serde::de::Error::custom)
    }
}
