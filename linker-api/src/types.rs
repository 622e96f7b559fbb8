//! Request bodies accepted by the catalog routes.
//!
//! Response bodies are the `linker_core` records themselves.

use linker_core::{EntityId, LinkId, PropertyId};
use serde::{Deserialize, Serialize};

/// Body of `POST /entity` and `POST /property`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateNamedRequest {
    pub name: String,
}

/// Body of `DELETE /entity` and `DELETE /property`.
///
/// When `name` is present the row is only deleted if it matches too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteNamedRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: uuid::Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `POST /link`. Accepts the camelCase spellings as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateLinkRequest {
    #[serde(alias = "entityId")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub entity_id: EntityId,
    #[serde(alias = "propertyId")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub property_id: PropertyId,
}

/// Body of `DELETE /link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteLinkRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: LinkId,
}

/// Body of `POST /field/:entity_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateFieldRequest {
    #[serde(alias = "propertyId")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub property_id: PropertyId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_request_accepts_both_spellings() -> Result<(), serde_json::Error> {
        let entity = uuid::Uuid::now_v7();
        let property = uuid::Uuid::now_v7();

        let snake: CreateLinkRequest =
            serde_json::from_value(json!({ "entity_id": entity, "property_id": property }))?;
        let camel: CreateLinkRequest =
            serde_json::from_value(json!({ "entityId": entity, "propertyId": property }))?;

        assert_eq!(snake, camel);
        assert_eq!(snake.entity_id, EntityId::from(entity));
        Ok(())
    }

    #[test]
    fn test_delete_named_name_is_optional() -> Result<(), serde_json::Error> {
        let id = uuid::Uuid::now_v7();
        let bare: DeleteNamedRequest = serde_json::from_value(json!({ "id": id }))?;
        assert_eq!(bare.name, None);

        let named: DeleteNamedRequest =
            serde_json::from_value(json!({ "id": id, "name": "car" }))?;
        assert_eq!(named.name.as_deref(), Some("car"));
        Ok(())
    }

    #[test]
    fn test_bad_uuid_is_rejected() {
        let parsed = serde_json::from_value::<DeleteLinkRequest>(json!({ "id": "nope" }));
        assert!(parsed.is_err());
    }
}
