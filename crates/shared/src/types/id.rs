//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `UnitId` where a
//! `PropertyId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(PropertyId, "Unique identifier for a property.");
typed_id!(UnitId, "Unique identifier for a rent-roll unit.");
typed_id!(ExpensesId, "Unique identifier for a property's expense schedule.");
typed_id!(CapRateId, "Unique identifier for a property's cap rate record.");
typed_id!(QuoteId, "Unique identifier for an underwriting quote.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        let a = PropertyId::new();
        let b = PropertyId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_roundtrip_through_uuid() {
        let id = UnitId::new();
        assert_eq!(UnitId::from_uuid(id.into_inner()), id);
    }

    #[test]
    fn test_id_display_parse_roundtrip() {
        let id = QuoteId::new();
        let parsed = QuoteId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_ids_are_time_ordered() {
        // UUID v7 embeds a millisecond timestamp, so sequential IDs sort
        // in creation order.
        let a = UnitId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = UnitId::new();
        assert!(a.into_inner() < b.into_inner());
    }
}
