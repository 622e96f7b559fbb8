//! Linker Test Utilities
//!
//! Shared test infrastructure for the linker workspace:
//! - Proptest generators for ids, names and records
//! - Fixtures for common scenarios
//! - Assertions over JSON responses

pub use linker_core::{
    CatalogError, CatalogResult, CatalogStore, Entity, EntityId, InMemoryCatalog, Link, LinkId,
    NamedLink, Property, PropertyId, RecordId,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for catalog values.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate an arbitrary UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<u128>().prop_map(Uuid::from_u128)
    }

    pub fn arb_entity_id() -> impl Strategy<Value = EntityId> {
        arb_uuid().prop_map(EntityId::new)
    }

    pub fn arb_property_id() -> impl Strategy<Value = PropertyId> {
        arb_uuid().prop_map(PropertyId::new)
    }

    pub fn arb_link_id() -> impl Strategy<Value = LinkId> {
        arb_uuid().prop_map(LinkId::new)
    }

    /// Short lowercase names, so that substring collisions are common.
    pub fn arb_name() -> impl Strategy<Value = String> {
        "[a-e]{1,6}"
    }

    /// Any text a user might type, including empty and non-ASCII input.
    pub fn arb_query() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-e]{1,3}",
            "\\PC{0,8}",
        ]
    }

    pub fn arb_entity() -> impl Strategy<Value = Entity> {
        (arb_entity_id(), arb_name()).prop_map(|(id, name)| Entity { id, name })
    }

    pub fn arb_property() -> impl Strategy<Value = Property> {
        (arb_property_id(), arb_name()).prop_map(|(id, name)| Property { id, name })
    }

    pub fn arb_entities(max: usize) -> impl Strategy<Value = Vec<Entity>> {
        prop::collection::vec(arb_entity(), 0..=max)
    }

    pub fn arb_properties(max: usize) -> impl Strategy<Value = Vec<Property>> {
        prop::collection::vec(arb_property(), 0..=max)
    }

    /// Named links drawn from the given entities and properties.
    ///
    /// Each (entity, property) pair appears at most once.
    pub fn arb_named_links(
        entities: Vec<Entity>,
        properties: Vec<Property>,
    ) -> impl Strategy<Value = Vec<NamedLink>> {
        let pairs: Vec<(Entity, Property)> = entities
            .iter()
            .flat_map(|e| properties.iter().map(move |p| (e.clone(), p.clone())))
            .collect();
        let len = pairs.len();
        prop::sample::subsequence(pairs, 0..=len).prop_map(|chosen| {
            chosen
                .into_iter()
                .map(|(entity, property)| super::fixtures::named_link(&entity, &property))
                .collect()
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records for common testing scenarios.

    use super::*;

    pub fn entity(name: &str) -> Entity {
        Entity {
            id: EntityId::generate(),
            name: name.to_string(),
        }
    }

    pub fn property(name: &str) -> Property {
        Property {
            id: PropertyId::generate(),
            name: name.to_string(),
        }
    }

    /// A fresh link between `entity` and `property`, with names.
    pub fn named_link(entity: &Entity, property: &Property) -> NamedLink {
        NamedLink {
            id: LinkId::generate(),
            entity_id: entity.id,
            entity_name: entity.name.clone(),
            property_id: property.id,
            property_name: property.name.clone(),
        }
    }

    /// Catalog holding `car`, `boat`, `colour`, `weight` and the link
    /// `car -> colour`.
    pub async fn vehicle_catalog() -> CatalogResult<(InMemoryCatalog, SeededRows)> {
        let catalog = InMemoryCatalog::new();
        let car = catalog.entity_create("car").await?;
        let boat = catalog.entity_create("boat").await?;
        let colour = catalog.property_create("colour").await?;
        let weight = catalog.property_create("weight").await?;
        let car_colour = catalog.link_create(car.id, colour.id).await?;
        Ok((
            catalog,
            SeededRows {
                car,
                boat,
                colour,
                weight,
                car_colour,
            },
        ))
    }

    /// Rows created by [`vehicle_catalog`].
    #[derive(Debug, Clone)]
    pub struct SeededRows {
        pub car: Entity,
        pub boat: Entity,
        pub colour: Property,
        pub weight: Property,
        pub car_colour: Link,
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over JSON bodies returned by the API.

    use serde_json::Value;

    /// Assert the body is an error envelope carrying `code`.
    pub fn assert_error_code(body: &Value, code: &str) {
        assert_eq!(
            body.get("code").and_then(Value::as_str),
            Some(code),
            "unexpected error body: {}",
            body
        );
        assert!(body.get("message").and_then(Value::as_str).is_some());
    }

    /// Assert a JSON array holds exactly `expected` elements.
    pub fn assert_len(body: &Value, expected: usize) {
        let len = body.as_array().map(Vec::len);
        assert_eq!(len, Some(expected), "unexpected list body: {}", body);
    }
}
