//! Catalog error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which catalog table an error or record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Entity,
    Property,
    Link,
}

impl RecordKind {
    /// Name of the backing SQL table.
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Entity => "entity",
            RecordKind::Property => "property",
            RecordKind::Link => "link",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Entity => "Entity",
            RecordKind::Property => "Property",
            RecordKind::Link => "Link",
        };
        f.write_str(label)
    }
}

/// Errors raised by a [`CatalogStore`](crate::CatalogStore).
///
/// Constraint failures are classified so the HTTP layer can pick a status
/// code; everything else collapses into `Storage` with the driver's message,
/// which is meant for logs and never for clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} already exists: {reason}")]
    AlreadyExists { kind: RecordKind, reason: String },

    #[error("{kind} reference violation: {reason}")]
    ReferenceViolation { kind: RecordKind, reason: String },

    #[error("Storage connection pool exhausted")]
    PoolExhausted,

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage error: {reason}")]
    Storage { reason: String },
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_tables() {
        assert_eq!(RecordKind::Entity.table(), "entity");
        assert_eq!(RecordKind::Property.table(), "property");
        assert_eq!(RecordKind::Link.table(), "link");
    }

    #[test]
    fn test_error_display_names_kind() {
        let err = CatalogError::ReferenceViolation {
            kind: RecordKind::Entity,
            reason: "still referenced by 2 links".to_string(),
        };
        let display = err.to_string();
        assert!(display.starts_with("Entity"));
        assert!(display.contains("2 links"));
    }
}
