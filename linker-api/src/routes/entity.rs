//! Entity REST API Routes
//!
//! `GET`, `POST` and `DELETE` on `/entity`.

use axum::{extract::State, routing::get, Json, Router};
use linker_core::{CatalogStore, Entity, EntityId, RecordKind};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    types::{CreateNamedRequest, DeleteNamedRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for entity routes.
#[derive(Clone)]
pub struct EntityState {
    pub store: Arc<dyn CatalogStore>,
}

impl EntityState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /entity - List every entity
#[utoipa::path(
    get,
    path = "/entity",
    tag = "Entities",
    responses(
        (status = 200, description = "All entities in creation order", body = Vec<Entity>),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn list_entities(
    State(state): State<Arc<EntityState>>,
) -> ApiResult<Json<Vec<Entity>>> {
    let entities = state.store.entity_list().await?;
    Ok(Json(entities))
}

/// POST /entity - Create an entity
#[utoipa::path(
    post,
    path = "/entity",
    tag = "Entities",
    request_body = CreateNamedRequest,
    responses(
        (status = 200, description = "Entity created", body = Entity),
        (status = 422, description = "Malformed body"),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn create_entity(
    State(state): State<Arc<EntityState>>,
    Json(req): Json<CreateNamedRequest>,
) -> ApiResult<Json<Entity>> {
    let entity = state.store.entity_create(&req.name).await?;
    tracing::info!(entity_id = %entity.id, "Entity created");
    Ok(Json(entity))
}

/// DELETE /entity - Delete an entity by id (and name, when given)
#[utoipa::path(
    delete,
    path = "/entity",
    tag = "Entities",
    request_body = DeleteNamedRequest,
    responses(
        (status = 200, description = "Deleted entity", body = Entity),
        (status = 404, description = "No entity matched", body = ApiError),
        (status = 409, description = "Entity is still linked", body = ApiError),
    ),
)]
pub async fn delete_entity(
    State(state): State<Arc<EntityState>>,
    Json(req): Json<DeleteNamedRequest>,
) -> ApiResult<Json<Entity>> {
    let id = EntityId::from(req.id);
    let deleted = state.store.entity_delete(id, req.name.as_deref()).await?;
    match deleted {
        Some(entity) => {
            tracing::info!(entity_id = %entity.id, "Entity deleted");
            Ok(Json(entity))
        }
        None => Err(ApiError::record_not_found(RecordKind::Entity, id)),
    }
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the entity routes router.
pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(EntityState::new(store));

    Router::new()
        .route("/", get(list_entities).post(create_entity).delete(delete_entity))
        .with_state(state)
}
