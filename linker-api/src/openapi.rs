//! OpenAPI Specification for the Linker API
//!
//! Generated by utoipa from the record types and route annotations.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::routes::{entity, field, health, link, named_link, property};
use crate::telemetry::metrics;
use crate::types::{
    CreateFieldRequest, CreateLinkRequest, CreateNamedRequest, DeleteLinkRequest,
    DeleteNamedRequest,
};
use linker_core::{Entity, Link, NamedLink, Property};

/// OpenAPI document for the Linker API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Linker API",
        version = "0.1.0",
        description = "Entity / property / link catalog",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Entities", description = "Named entity records"),
        (name = "Properties", description = "Named property records"),
        (name = "Links", description = "Entity-to-property associations and their named projection"),
        (name = "Fields", description = "Properties attached to one entity"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        entity::list_entities,
        entity::create_entity,
        entity::delete_entity,
        property::list_properties,
        property::create_property,
        property::delete_property,
        link::list_links,
        link::create_link,
        link::delete_link,
        named_link::list_named_links,
        field::list_fields,
        field::create_field,
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(
        schemas(
            ApiError, ErrorCode,
            Entity, Property, Link, NamedLink,
            CreateNamedRequest, DeleteNamedRequest,
            CreateLinkRequest, DeleteLinkRequest, CreateFieldRequest,
            HealthResponse, HealthStatus, HealthDetails, ComponentHealth,
        )
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate OpenAPI spec as JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }

    /// Generate OpenAPI spec as YAML string.
    #[cfg(feature = "openapi")]
    pub fn to_yaml() -> Result<String, String> {
        serde_yaml::to_string(&Self::openapi()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "Linker API");
        assert_eq!(openapi.info.version, "0.1.0");
    }

    #[test]
    fn test_openapi_paths_exist() {
        let openapi = ApiDoc::openapi();
        for path in [
            "/entity",
            "/property",
            "/link",
            "/named_link",
            "/field/{entity_id}",
            "/health/ready",
            "/metrics",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_openapi_json_serialization() -> Result<(), String> {
        let json = ApiDoc::to_json().map_err(|e| format!("Failed to serialize OpenAPI: {}", e))?;
        serde_json::from_str::<serde_json::Value>(&json)
            .map_err(|e| format!("Generated JSON invalid: {}", e))?;
        assert!(json.contains("NamedLink"));
        assert!(json.contains("RECORD_NOT_FOUND"));
        Ok(())
    }
}
