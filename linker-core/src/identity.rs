//! Identity types for catalog records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a new UUIDv7 record id (timestamp-sortable).
///
/// Ordering rows by id therefore orders them by creation time.
pub fn new_record_id() -> Uuid {
    Uuid::now_v7()
}

/// Common behaviour of the strongly-typed record identifiers.
pub trait RecordId: Copy + Eq + fmt::Display {
    /// Lowercase name of the record this id points at.
    const NAME: &'static str;

    /// Wrap a raw UUID.
    fn new(uuid: Uuid) -> Self;

    /// The raw UUID.
    fn as_uuid(&self) -> Uuid;

    /// Generate a fresh id.
    fn generate() -> Self {
        Self::new(new_record_id())
    }
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl RecordId for $name {
            const NAME: &'static str = $label;

            fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a row in the `entity` table.
    EntityId,
    "entity"
);
define_record_id!(
    /// Identifier of a row in the `property` table.
    PropertyId,
    "property"
);
define_record_id!(
    /// Identifier of a row in the `link` table (and of its `named_link` projection).
    LinkId,
    "link"
);
