//! Field REST API Routes
//!
//! A field is a property as seen from one entity: the named links whose
//! entity is the one in the path.

use axum::{extract::State, routing::get, Json, Router};
use linker_core::{CatalogStore, EntityId, NamedLink};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extractors::PathId,
    types::CreateFieldRequest,
};

#[derive(Clone)]
pub struct FieldState {
    pub store: Arc<dyn CatalogStore>,
}

impl FieldState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// GET /field/{entity_id} - List the fields of one entity
#[utoipa::path(
    get,
    path = "/field/{entity_id}",
    tag = "Fields",
    params(
        ("entity_id" = String, Path, description = "Entity ID")
    ),
    responses(
        (status = 200, description = "Named links of the entity; empty for unknown ids", body = Vec<NamedLink>),
        (status = 400, description = "Entity ID is not a UUID", body = ApiError),
    ),
)]
pub async fn list_fields(
    State(state): State<Arc<FieldState>>,
    PathId(entity_id): PathId<EntityId>,
) -> ApiResult<Json<Vec<NamedLink>>> {
    let fields = state.store.field_list(entity_id).await?;
    Ok(Json(fields))
}

/// POST /field/{entity_id} - Attach a property to an entity
#[utoipa::path(
    post,
    path = "/field/{entity_id}",
    tag = "Fields",
    params(
        ("entity_id" = String, Path, description = "Entity ID")
    ),
    request_body = CreateFieldRequest,
    responses(
        (status = 200, description = "Named link of the new field", body = NamedLink),
        (status = 400, description = "Entity ID is not a UUID", body = ApiError),
        (status = 409, description = "Already attached, or entity/property missing", body = ApiError),
    ),
)]
pub async fn create_field(
    State(state): State<Arc<FieldState>>,
    PathId(entity_id): PathId<EntityId>,
    Json(req): Json<CreateFieldRequest>,
) -> ApiResult<Json<NamedLink>> {
    let field = state.store.field_create(entity_id, req.property_id).await?;
    tracing::info!(
        link_id = %field.id,
        entity_id = %field.entity_id,
        property_id = %field.property_id,
        "Field attached"
    );
    Ok(Json(field))
}

pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(FieldState::new(store));

    Router::new()
        .route("/:entity_id", get(list_fields).post(create_field))
        .with_state(state)
}
