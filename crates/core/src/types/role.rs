//! Account roles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Account role with different capabilities.
///
/// Customers browse and compare; shopkeepers additionally manage exactly one
/// shop and its products through the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browse shops and compare prices.
    #[default]
    Customer,
    /// Manage a shop and its product listings.
    Shopkeeper,
}

impl Role {
    /// Stable string form used in the database and in forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Shopkeeper => "shopkeeper",
        }
    }

    /// Parse a role from its string form. Unknown values map to `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "shopkeeper" => Some(Self::Shopkeeper),
            _ => None,
        }
    }

    /// Whether this role may use the shopkeeper dashboard.
    #[must_use]
    pub const fn is_shopkeeper(self) -> bool {
        matches!(self, Self::Shopkeeper)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for role in [Role::Customer, Role::Shopkeeper] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_shopkeeper_gate() {
        assert!(Role::Shopkeeper.is_shopkeeper());
        assert!(!Role::Customer.is_shopkeeper());
    }
}
