//! Async catalog storage trait.
//!
//! Every HTTP operation maps onto exactly one method here, and every
//! implementation is expected to perform each method as a single atomic
//! statement against its backend. There is no transactional composition
//! across calls.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::identity::{EntityId, LinkId, PropertyId};
use crate::records::{Entity, Link, NamedLink, Property};

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // ENTITY OPERATIONS
    // ========================================================================

    /// List every entity in creation order.
    async fn entity_list(&self) -> CatalogResult<Vec<Entity>>;

    /// Insert an entity with a freshly assigned id.
    async fn entity_create(&self, name: &str) -> CatalogResult<Entity>;

    /// Delete an entity by id. When `name` is given it must match as well.
    ///
    /// Returns the deleted row, or `None` when nothing matched.
    async fn entity_delete(&self, id: EntityId, name: Option<&str>)
        -> CatalogResult<Option<Entity>>;

    // ========================================================================
    // PROPERTY OPERATIONS
    // ========================================================================

    /// List every property in creation order.
    async fn property_list(&self) -> CatalogResult<Vec<Property>>;

    /// Insert a property with a freshly assigned id.
    async fn property_create(&self, name: &str) -> CatalogResult<Property>;

    /// Delete a property by id. When `name` is given it must match as well.
    async fn property_delete(
        &self,
        id: PropertyId,
        name: Option<&str>,
    ) -> CatalogResult<Option<Property>>;

    // ========================================================================
    // LINK OPERATIONS
    // ========================================================================

    /// List every link in creation order.
    async fn link_list(&self) -> CatalogResult<Vec<Link>>;

    /// Link an entity to a property.
    async fn link_create(&self, entity_id: EntityId, property_id: PropertyId)
        -> CatalogResult<Link>;

    /// Delete a link by id.
    async fn link_delete(&self, id: LinkId) -> CatalogResult<Option<Link>>;

    // ========================================================================
    // NAMED LINK / FIELD OPERATIONS
    // ========================================================================

    /// List the `named_link` projection in link creation order.
    async fn named_link_list(&self) -> CatalogResult<Vec<NamedLink>>;

    /// List the named links whose entity is `entity_id`.
    async fn field_list(&self, entity_id: EntityId) -> CatalogResult<Vec<NamedLink>>;

    /// Link `property_id` to `entity_id` and return the resulting named link.
    async fn field_create(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> CatalogResult<NamedLink>;

    // ========================================================================
    // HEALTH
    // ========================================================================

    /// Cheap round trip to the backend.
    async fn ping(&self) -> CatalogResult<()>;
}
