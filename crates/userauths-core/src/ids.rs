//! Storage-assigned surrogate keys.
//!
//! Application code never mints these; a repository assigns one on first
//! insert and the value is immutable from then on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::UserAuthsError;

macro_rules! surrogate_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = UserAuthsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|e| {
                    UserAuthsError::invalid_field($entity, format!("not a UUID: {}", e))
                })
            }
        }
    };
}

surrogate_id!(
    /// Internal identifier of an [`Account`](crate::account::Account).
    AccountId,
    "account_id"
);

surrogate_id!(
    /// Internal identifier of a [`Profile`](crate::profile::Profile).
    ProfileId,
    "profile_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(AccountId::generate(), AccountId::generate());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let id = ProfileId::generate();
        let parsed: ProfileId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<AccountId>().unwrap_err();
        assert!(err.is_invalid_field());
    }
}
