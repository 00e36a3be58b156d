//! Strongly-typed identifiers for domain entities
//!
//! Using newtype wrappers around opaque id strings provides type safety and
//! prevents accidental mixing of different identifier types. Identifiers are
//! string-backed rather than UUID-backed because upstream records carry ids
//! minted by other systems, and those must round-trip byte for byte.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::generate()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Pricing domain identifiers
define_string_id!(RuleId);
define_string_id!(ServiceId);
define_string_id!(TimeslotId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_preserves_input() {
        let id = RuleId::new("clx2k9f0a0001abcd");
        assert_eq!(id.as_str(), "clx2k9f0a0001abcd");
        assert_eq!(id.to_string(), "clx2k9f0a0001abcd");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RuleId::generate();
        let b = RuleId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_str_conversion() {
        let id: ServiceId = "svc-1".into();
        assert_eq!(id, ServiceId::new("svc-1"));
    }
}
