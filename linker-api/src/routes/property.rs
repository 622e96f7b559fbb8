//! Property REST API Routes
//!
//! `GET`, `POST` and `DELETE` on `/property`.

use axum::{extract::State, routing::get, Json, Router};
use linker_core::{CatalogStore, Property, PropertyId, RecordKind};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    types::{CreateNamedRequest, DeleteNamedRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for property routes.
#[derive(Clone)]
pub struct PropertyState {
    pub store: Arc<dyn CatalogStore>,
}

impl PropertyState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /property - List every property
#[utoipa::path(
    get,
    path = "/property",
    tag = "Properties",
    responses(
        (status = 200, description = "All properties in creation order", body = Vec<Property>),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn list_properties(
    State(state): State<Arc<PropertyState>>,
) -> ApiResult<Json<Vec<Property>>> {
    let properties = state.store.property_list().await?;
    Ok(Json(properties))
}

/// POST /property - Create a property
#[utoipa::path(
    post,
    path = "/property",
    tag = "Properties",
    request_body = CreateNamedRequest,
    responses(
        (status = 200, description = "Property created", body = Property),
        (status = 422, description = "Malformed body"),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn create_property(
    State(state): State<Arc<PropertyState>>,
    Json(req): Json<CreateNamedRequest>,
) -> ApiResult<Json<Property>> {
    let property = state.store.property_create(&req.name).await?;
    tracing::info!(property_id = %property.id, "Property created");
    Ok(Json(property))
}

/// DELETE /property - Delete a property by id (and name, when given)
#[utoipa::path(
    delete,
    path = "/property",
    tag = "Properties",
    request_body = DeleteNamedRequest,
    responses(
        (status = 200, description = "Deleted property", body = Property),
        (status = 404, description = "No property matched", body = ApiError),
        (status = 409, description = "Property is still linked", body = ApiError),
    ),
)]
pub async fn delete_property(
    State(state): State<Arc<PropertyState>>,
    Json(req): Json<DeleteNamedRequest>,
) -> ApiResult<Json<Property>> {
    let id = PropertyId::from(req.id);
    let deleted = state.store.property_delete(id, req.name.as_deref()).await?;
    match deleted {
        Some(property) => {
            tracing::info!(property_id = %property.id, "Property deleted");
            Ok(Json(property))
        }
        None => Err(ApiError::record_not_found(RecordKind::Property, id)),
    }
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the property routes router.
pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(PropertyState::new(store));

    Router::new()
        .route("/", get(list_properties).post(create_property).delete(delete_property))
        .with_state(state)
}
