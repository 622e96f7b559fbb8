use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use linker_api::{create_api_router, ApiConfig};
use linker_core::{CatalogStore, InMemoryCatalog};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory catalog. The catalog handle shares state
/// with the router.
pub fn test_app() -> (Router, InMemoryCatalog) {
    let catalog = InMemoryCatalog::new();
    (app_over(catalog.clone()), catalog)
}

pub fn app_over(catalog: InMemoryCatalog) -> Router {
    let store: Arc<dyn CatalogStore> = Arc::new(catalog);
    create_api_router(store, &ApiConfig::default())
}

/// Send one request and decode the body as JSON (`Value::Null` when empty
/// or not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder
        .body(body)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {}", e))?;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, value))
}
