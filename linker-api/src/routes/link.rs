//! Link REST API Routes
//!
//! A link joins one entity to one property. Both ends must exist and a pair
//! may be linked once.

use axum::{extract::State, routing::get, Json, Router};
use linker_core::{CatalogStore, Link, RecordKind};
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    types::{CreateLinkRequest, DeleteLinkRequest},
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared state for link routes.
#[derive(Clone)]
pub struct LinkState {
    pub store: Arc<dyn CatalogStore>,
}

impl LinkState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /link - List every link
#[utoipa::path(
    get,
    path = "/link",
    tag = "Links",
    responses(
        (status = 200, description = "All links in creation order", body = Vec<Link>),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn list_links(State(state): State<Arc<LinkState>>) -> ApiResult<Json<Vec<Link>>> {
    let links = state.store.link_list().await?;
    Ok(Json(links))
}

/// POST /link - Link an entity to a property
#[utoipa::path(
    post,
    path = "/link",
    tag = "Links",
    request_body = CreateLinkRequest,
    responses(
        (status = 200, description = "Link created", body = Link),
        (status = 409, description = "Pair already linked or an end is missing", body = ApiError),
        (status = 422, description = "Malformed body"),
    ),
)]
pub async fn create_link(
    State(state): State<Arc<LinkState>>,
    Json(req): Json<CreateLinkRequest>,
) -> ApiResult<Json<Link>> {
    let link = state.store.link_create(req.entity_id, req.property_id).await?;
    tracing::info!(
        link_id = %link.id,
        entity_id = %link.entity_id,
        property_id = %link.property_id,
        "Link created"
    );
    Ok(Json(link))
}

/// DELETE /link - Delete a link by id
#[utoipa::path(
    delete,
    path = "/link",
    tag = "Links",
    request_body = DeleteLinkRequest,
    responses(
        (status = 200, description = "Deleted link", body = Link),
        (status = 404, description = "No link matched", body = ApiError),
    ),
)]
pub async fn delete_link(
    State(state): State<Arc<LinkState>>,
    Json(req): Json<DeleteLinkRequest>,
) -> ApiResult<Json<Link>> {
    match state.store.link_delete(req.id).await? {
        Some(link) => {
            tracing::info!(link_id = %link.id, "Link deleted");
            Ok(Json(link))
        }
        None => Err(ApiError::record_not_found(RecordKind::Link, req.id)),
    }
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the link routes router.
pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(LinkState::new(store));

    Router::new()
        .route("/", get(list_links).post(create_link).delete(delete_link))
        .with_state(state)
}
