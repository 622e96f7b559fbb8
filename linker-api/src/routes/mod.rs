//! REST API Routes Module
//!
//! Route handlers organized by resource:
//! - Entity, property and link CRUD
//! - The named-link read model and per-entity fields
//! - Health checks, metrics and the OpenAPI document
//! - CORS so browser clients can call every route, DELETE bodies included

pub mod entity;
pub mod field;
pub mod health;
pub mod link;
pub mod named_link;
pub mod property;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use linker_core::CatalogStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::openapi::ApiDoc;
use crate::telemetry::{metrics_handler, observability_middleware};

pub use entity::create_router as entity_router;
pub use field::create_router as field_router;
pub use health::create_router as health_router;
pub use link::create_router as link_router;
pub use named_link::create_router as named_link_router;
pub use property::create_router as property_router;

// ============================================================================
// ROOT AND OPENAPI ENDPOINTS
// ============================================================================

/// GET / - Greeting, useful as a smoke check.
async fn root() -> &'static str {
    "hello world"
}

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Handler for /openapi.yaml endpoint.
#[cfg(feature = "openapi")]
async fn openapi_yaml() -> impl IntoResponse {
    use axum::http::StatusCode;

    match ApiDoc::to_yaml() {
        Ok(yaml) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/yaml")], yaml),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain")],
            format!("Failed to generate YAML: {}", e),
        ),
    }
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// With no configured origins every origin is allowed.
pub fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if !config.restricts_origins() {
        tracing::info!("CORS: allowing all origins");
        return cors.allow_origin(Any).allow_headers(Any);
    }

    tracing::info!(origins = ?config.cors_origins, "CORS: restricting origins");
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// - `/` greeting
/// - `/entity`, `/property`, `/link` CRUD
/// - `/named_link` and `/field/:entity_id`
/// - `/health/*`, `/metrics`, `/openapi.json` (and `/openapi.yaml`, Swagger UI
///   when the features are enabled)
///
/// Execution order: CORS -> Trace -> Observability -> Handler.
pub fn create_api_router(store: Arc<dyn CatalogStore>, config: &ApiConfig) -> Router {
    if config.environment.eq_ignore_ascii_case("production") && !config.restricts_origins() {
        tracing::warn!("CORS allows every origin in production; set LINKER_CORS_ORIGINS");
    }

    let mut router = Router::new()
        .route("/", get(root))
        .nest("/entity", entity::create_router(store.clone()))
        .nest("/property", property::create_router(store.clone()))
        .nest("/link", link::create_router(store.clone()))
        .nest("/named_link", named_link::create_router(store.clone()))
        .nest("/field", field::create_router(store.clone()))
        .nest("/health", health::create_router(store))
        .route("/metrics", get(metrics_handler))
        .route("/openapi.json", get(openapi_json));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.yaml", get(openapi_yaml));
    }

    #[cfg(feature = "swagger-ui")]
    {
        use utoipa_swagger_ui::SwaggerUi;
        router = router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    router
        .layer(from_fn(observability_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}
