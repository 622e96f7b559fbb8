//! Catalog records
//!
//! One struct per table (or view). Field names match the SQL column names so
//! the JSON produced by the API is the row shape clients already expect.

use serde::{Deserialize, Serialize};

use crate::identity::{EntityId, LinkId, PropertyId};

/// A named record in the `entity` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Entity {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: EntityId,
    pub name: String,
}

/// A named record in the `property` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Property {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: PropertyId,
    pub name: String,
}

/// An association row joining one entity to one property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Link {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: LinkId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub entity_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub property_id: PropertyId,
}

/// Read-only projection of a link with the names of both ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NamedLink {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: LinkId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub entity_id: EntityId,
    pub entity_name: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub property_id: PropertyId,
    pub property_name: String,
}

impl NamedLink {
    /// Build the projection the `named_link` view would return for `link`.
    ///
    /// Returns `None` when `entity` or `property` is not the row the link
    /// points at.
    pub fn compose(link: &Link, entity: &Entity, property: &Property) -> Option<Self> {
        if link.entity_id != entity.id || link.property_id != property.id {
            return None;
        }
        Some(Self {
            id: link.id,
            entity_id: entity.id,
            entity_name: entity.name.clone(),
            property_id: property.id,
            property_name: property.name.clone(),
        })
    }

    /// The underlying link row.
    pub fn link(&self) -> Link {
        Link {
            id: self.id,
            entity_id: self.entity_id,
            property_id: self.property_id,
        }
    }

    /// Whether this link joins exactly `entity_id` and `property_id`.
    pub fn joins(&self, entity_id: EntityId, property_id: PropertyId) -> bool {
        self.entity_id == entity_id && self.property_id == property_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::RecordId;

    fn fixture() -> (Entity, Property, Link) {
        let entity = Entity {
            id: EntityId::generate(),
            name: "car".to_string(),
        };
        let property = Property {
            id: PropertyId::generate(),
            name: "colour".to_string(),
        };
        let link = Link {
            id: LinkId::generate(),
            entity_id: entity.id,
            property_id: property.id,
        };
        (entity, property, link)
    }

    #[test]
    fn test_compose_copies_names() {
        let (entity, property, link) = fixture();
        let named = NamedLink::compose(&link, &entity, &property);
        let named = named.as_ref();
        assert_eq!(named.map(|n| n.entity_name.as_str()), Some("car"));
        assert_eq!(named.map(|n| n.property_name.as_str()), Some("colour"));
        assert_eq!(named.map(NamedLink::link), Some(link));
    }

    #[test]
    fn test_compose_rejects_foreign_rows() {
        let (entity, property, link) = fixture();
        let stranger = Entity {
            id: EntityId::generate(),
            name: "boat".to_string(),
        };
        assert!(NamedLink::compose(&link, &stranger, &property).is_none());
        assert!(NamedLink::compose(&link, &entity, &property).is_some());
    }

    #[test]
    fn test_json_uses_column_names() -> Result<(), serde_json::Error> {
        let (entity, property, link) = fixture();
        let value = serde_json::to_value(&link)?;
        assert_eq!(value["entity_id"], serde_json::json!(entity.id.to_string()));
        assert_eq!(value["property_id"], serde_json::json!(property.id.to_string()));

        let named = serde_json::to_value(NamedLink::compose(&link, &entity, &property))?;
        assert_eq!(named["entity_name"], "car");
        assert_eq!(named["property_name"], "colour");
        Ok(())
    }
}
