//! In-memory catalog used by tests and local development.
//!
//! Enforces the same constraints as the SQL schema: link ends must exist,
//! a linked entity or property cannot be deleted, and an (entity, property)
//! pair may be linked only once. Names are not constrained.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CatalogError, CatalogResult, RecordKind};
use crate::identity::{EntityId, LinkId, PropertyId, RecordId};
use crate::records::{Entity, Link, NamedLink, Property};
use crate::store::CatalogStore;

#[derive(Debug, Default)]
struct Tables {
    entities: Vec<Entity>,
    properties: Vec<Property>,
    links: Vec<Link>,
}

impl Tables {
    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    fn named(&self, link: &Link) -> Option<NamedLink> {
        let entity = self.entity(link.entity_id)?;
        let property = self.property(link.property_id)?;
        NamedLink::compose(link, entity, property)
    }

    fn insert_link(&mut self, entity_id: EntityId, property_id: PropertyId) -> CatalogResult<Link> {
        if self.entity(entity_id).is_none() {
            return Err(CatalogError::ReferenceViolation {
                kind: RecordKind::Link,
                reason: format!("entity {} does not exist", entity_id),
            });
        }
        if self.property(property_id).is_none() {
            return Err(CatalogError::ReferenceViolation {
                kind: RecordKind::Link,
                reason: format!("property {} does not exist", property_id),
            });
        }
        if self
            .links
            .iter()
            .any(|l| l.entity_id == entity_id && l.property_id == property_id)
        {
            return Err(CatalogError::AlreadyExists {
                kind: RecordKind::Link,
                reason: format!("entity {} is already linked to property {}", entity_id, property_id),
            });
        }

        let link = Link {
            id: LinkId::generate(),
            entity_id,
            property_id,
        };
        self.links.push(link.clone());
        Ok(link)
    }
}

/// Thread-safe in-memory [`CatalogStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts as `(entities, properties, links)`.
    pub fn counts(&self) -> CatalogResult<(usize, usize, usize)> {
        let tables = self.read()?;
        Ok((
            tables.entities.len(),
            tables.properties.len(),
            tables.links.len(),
        ))
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| CatalogError::LockPoisoned)
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| CatalogError::LockPoisoned)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn entity_list(&self) -> CatalogResult<Vec<Entity>> {
        Ok(self.read()?.entities.clone())
    }

    async fn entity_create(&self, name: &str) -> CatalogResult<Entity> {
        let entity = Entity {
            id: EntityId::generate(),
            name: name.to_string(),
        };
        self.write()?.entities.push(entity.clone());
        Ok(entity)
    }

    async fn entity_delete(
        &self,
        id: EntityId,
        name: Option<&str>,
    ) -> CatalogResult<Option<Entity>> {
        let mut tables = self.write()?;
        let Some(index) = tables
            .entities
            .iter()
            .position(|e| e.id == id && name.map_or(true, |n| e.name == n))
        else {
            return Ok(None);
        };

        let referenced = tables.links.iter().filter(|l| l.entity_id == id).count();
        if referenced > 0 {
            return Err(CatalogError::ReferenceViolation {
                kind: RecordKind::Entity,
                reason: format!("entity {} is still referenced by {} link(s)", id, referenced),
            });
        }

        Ok(Some(tables.entities.remove(index)))
    }

    async fn property_list(&self) -> CatalogResult<Vec<Property>> {
        Ok(self.read()?.properties.clone())
    }

    async fn property_create(&self, name: &str) -> CatalogResult<Property> {
        let property = Property {
            id: PropertyId::generate(),
            name: name.to_string(),
        };
        self.write()?.properties.push(property.clone());
        Ok(property)
    }

    async fn property_delete(
        &self,
        id: PropertyId,
        name: Option<&str>,
    ) -> CatalogResult<Option<Property>> {
        let mut tables = self.write()?;
        let Some(index) = tables
            .properties
            .iter()
            .position(|p| p.id == id && name.map_or(true, |n| p.name == n))
        else {
            return Ok(None);
        };

        let referenced = tables.links.iter().filter(|l| l.property_id == id).count();
        if referenced > 0 {
            return Err(CatalogError::ReferenceViolation {
                kind: RecordKind::Property,
                reason: format!("property {} is still referenced by {} link(s)", id, referenced),
            });
        }

        Ok(Some(tables.properties.remove(index)))
    }

    async fn link_list(&self) -> CatalogResult<Vec<Link>> {
        Ok(self.read()?.links.clone())
    }

    async fn link_create(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> CatalogResult<Link> {
        self.write()?.insert_link(entity_id, property_id)
    }

    async fn link_delete(&self, id: LinkId) -> CatalogResult<Option<Link>> {
        let mut tables = self.write()?;
        let removed = tables
            .links
            .iter()
            .position(|l| l.id == id)
            .map(|index| tables.links.remove(index));
        Ok(removed)
    }

    async fn named_link_list(&self) -> CatalogResult<Vec<NamedLink>> {
        let tables = self.read()?;
        Ok(tables.links.iter().filter_map(|l| tables.named(l)).collect())
    }

    async fn field_list(&self, entity_id: EntityId) -> CatalogResult<Vec<NamedLink>> {
        let tables = self.read()?;
        Ok(tables
            .links
            .iter()
            .filter(|l| l.entity_id == entity_id)
            .filter_map(|l| tables.named(l))
            .collect())
    }

    async fn field_create(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> CatalogResult<NamedLink> {
        let mut tables = self.write()?;
        let link = tables.insert_link(entity_id, property_id)?;
        tables.named(&link).ok_or_else(|| CatalogError::Storage {
            reason: format!("link {} lost its ends", link.id),
        })
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let first = catalog.entity_create("car").await?;
        let second = catalog.entity_create("car").await?;

        assert_eq!(first.name, "car");
        assert_eq!(second.name, "car");
        assert_ne!(first.id, second.id);
        assert_eq!(catalog.entity_list().await?, vec![first, second]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_with_mismatched_name_is_a_miss() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let property = catalog.property_create("colour").await?;

        let miss = catalog.property_delete(property.id, Some("color")).await?;
        assert!(miss.is_none());
        assert_eq!(catalog.property_list().await?.len(), 1);

        let hit = catalog.property_delete(property.id, Some("colour")).await?;
        assert_eq!(hit, Some(property));
        assert!(catalog.property_list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_link_requires_existing_ends() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let entity = catalog.entity_create("car").await?;

        let err = catalog
            .link_create(entity.id, PropertyId::generate())
            .await
            .err();
        assert!(matches!(err, Some(CatalogError::ReferenceViolation { kind: RecordKind::Link, .. })));
        assert_eq!(catalog.counts()?, (1, 0, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_link_pair_rejected() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let entity = catalog.entity_create("car").await?;
        let property = catalog.property_create("colour").await?;

        catalog.link_create(entity.id, property.id).await?;
        let err = catalog.link_create(entity.id, property.id).await.err();
        assert!(matches!(err, Some(CatalogError::AlreadyExists { .. })));
        assert_eq!(catalog.link_list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_linked_rows_cannot_be_deleted() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let entity = catalog.entity_create("car").await?;
        let property = catalog.property_create("colour").await?;
        let link = catalog.link_create(entity.id, property.id).await?;

        assert!(catalog.entity_delete(entity.id, None).await.is_err());
        assert!(catalog.property_delete(property.id, None).await.is_err());

        assert_eq!(catalog.link_delete(link.id).await?, Some(link));
        assert!(catalog.entity_delete(entity.id, None).await?.is_some());
        assert!(catalog.property_delete(property.id, None).await?.is_some());
        assert_eq!(catalog.counts()?, (0, 0, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_named_links_and_fields() -> CatalogResult<()> {
        let catalog = InMemoryCatalog::new();
        let car = catalog.entity_create("car").await?;
        let boat = catalog.entity_create("boat").await?;
        let colour = catalog.property_create("colour").await?;

        let named = catalog.field_create(car.id, colour.id).await?;
        assert_eq!(named.entity_name, "car");
        assert_eq!(named.property_name, "colour");

        catalog.link_create(boat.id, colour.id).await?;
        assert_eq!(catalog.named_link_list().await?.len(), 2);
        assert_eq!(catalog.field_list(car.id).await?, vec![named]);
        assert!(catalog.field_list(EntityId::generate()).await?.is_empty());
        Ok(())
    }
}
