//! Linker Core - Catalog Records
//!
//! Plain records for the entity/property/link catalog, the typed identifiers
//! that key them, and the `CatalogStore` abstraction the API layer talks to.
//! An in-memory store that enforces the same constraints as the SQL schema
//! lives here too so every crate can test against it.

pub mod error;
pub mod identity;
pub mod memory;
pub mod records;
pub mod store;

pub use error::{CatalogError, CatalogResult, RecordKind};
pub use identity::{new_record_id, EntityId, LinkId, PropertyId, RecordId};
pub use memory::InMemoryCatalog;
pub use records::{Entity, Link, NamedLink, Property};
pub use store::CatalogStore;
