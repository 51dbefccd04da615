//! Strongly-typed ID wrappers
//!
//! Store-assigned entities get UUID newtypes so an expense id can never be
//! passed where a participant id is expected. User ids come from the identity
//! provider and are kept as opaque strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Whether `s` names this id, either as the full UUID or as the
            /// short display form (`prefix` + first 8 hex digits)
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                s == self.to_string() || s.eq_ignore_ascii_case(&self.0.to_string())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(ParticipantId, "prt-");
define_id!(DebtId, "debt-");
define_id!(BudgetCategoryId, "bud-");
define_id!(MicroPaymentId, "mpay-");

/// Identity-provider user key. Never interpreted, only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = ExpenseId::new();
        let display = id.to_string();
        assert!(display.starts_with("exp-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let plain = DebtId::parse(uuid_str).unwrap();
        let prefixed: DebtId = format!("debt-{}", uuid_str).parse().unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(plain.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_matches_short_and_full_form() {
        let id = ParticipantId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(!id.matches("prt-00000000"));
    }

    #[test]
    fn test_user_id_is_opaque() {
        let user = UserId::from("auth0|5f1b");
        assert_eq!(user.as_str(), "auth0|5f1b");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, "\"auth0|5f1b\"");
    }
}
