//! Named Link Read Model
//!
//! `GET /named_link` returns every link with the names of both ends.

use axum::{extract::State, routing::get, Json, Router};
use linker_core::{CatalogStore, NamedLink};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct NamedLinkState {
    pub store: Arc<dyn CatalogStore>,
}

impl NamedLinkState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// GET /named_link - List links with entity and property names
#[utoipa::path(
    get,
    path = "/named_link",
    tag = "Links",
    responses(
        (status = 200, description = "Named links in link creation order", body = Vec<NamedLink>),
        (status = 500, description = "Database error", body = ApiError),
    ),
)]
pub async fn list_named_links(
    State(state): State<Arc<NamedLinkState>>,
) -> ApiResult<Json<Vec<NamedLink>>> {
    let named = state.store.named_link_list().await?;
    Ok(Json(named))
}

pub fn create_router(store: Arc<dyn CatalogStore>) -> Router {
    let state = Arc::new(NamedLinkState::new(store));

    Router::new()
        .route("/", get(list_named_links))
        .with_state(state)
}
