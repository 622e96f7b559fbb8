//! HTTP-level tests for the catalog routes.
//!
//! Each test drives the real router with `oneshot` over an in-memory
//! catalog that enforces the same constraints as the SQL schema.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use linker_test_utils::assertions::{assert_error_code, assert_len};
use linker_test_utils::fixtures::vehicle_catalog;
use proptest::prelude::*;
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tower::ServiceExt;

#[path = "support/app.rs"]
mod test_app_support;
use test_app_support::{app_over, send, test_app};

type TestResult = Result<(), String>;

fn str_field<'a>(body: &'a Value, field: &str) -> Result<&'a str, String> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing '{}' in {}", field, body))
}

// ============================================================================
// ROOT / ENTITY / PROPERTY
// ============================================================================

#[tokio::test]
async fn test_root_says_hello() -> TestResult {
    let (app, _) = test_app();
    let request = Request::builder()
        .uri("/")
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    let response = app.oneshot(request).await.map_err(|e| e.to_string())?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| e.to_string())?;
    assert_eq!(&bytes[..], b"hello world");
    Ok(())
}

#[tokio::test]
async fn test_create_then_list_entity() -> TestResult {
    let (app, _) = test_app();

    let (status, created) =
        send(&app, Method::POST, "/entity", Some(json!({ "name": "car" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&created, "name")?, "car");
    let id = str_field(&created, "id")?.to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let (status, listed) = send(&app, Method::GET, "/entity", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([{ "id": id, "name": "car" }]));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_names_get_distinct_ids() -> TestResult {
    let (app, _) = test_app();
    let body = Some(json!({ "name": "colour" }));

    let (_, first) = send(&app, Method::POST, "/property", body.clone()).await?;
    let (_, second) = send(&app, Method::POST, "/property", body).await?;
    assert_ne!(str_field(&first, "id")?, str_field(&second, "id")?);

    let (_, listed) = send(&app, Method::GET, "/property", None).await?;
    assert_len(&listed, 2);
    Ok(())
}

#[tokio::test]
async fn test_delete_entity_removes_it() -> TestResult {
    let (app, _) = test_app();
    let (_, created) =
        send(&app, Method::POST, "/entity", Some(json!({ "name": "boat" }))).await?;
    let id = str_field(&created, "id")?.to_string();

    let (status, deleted) =
        send(&app, Method::DELETE, "/entity", Some(json!({ "id": id, "name": "boat" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (_, listed) = send(&app, Method::GET, "/entity", None).await?;
    assert_len(&listed, 0);

    let (status, body) = send(&app, Method::DELETE, "/entity", Some(json!({ "id": id }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_code(&body, "RECORD_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_delete_with_mismatched_name_deletes_nothing() -> TestResult {
    let (app, _) = test_app();
    let (_, created) =
        send(&app, Method::POST, "/property", Some(json!({ "name": "weight" }))).await?;
    let id = str_field(&created, "id")?.to_string();

    let (status, body) =
        send(&app, Method::DELETE, "/property", Some(json!({ "id": id, "name": "mass" }))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_code(&body, "RECORD_NOT_FOUND");

    let (_, listed) = send(&app, Method::GET, "/property", None).await?;
    assert_eq!(listed, json!([created]));
    Ok(())
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected() -> TestResult {
    let (app, _) = test_app();

    let (status, _) = send(&app, Method::POST, "/entity", Some(json!({}))).await?;
    assert!(status.is_client_error());

    let (status, _) =
        send(&app, Method::DELETE, "/entity", Some(json!({ "id": "not-a-uuid" }))).await?;
    assert!(status.is_client_error());

    let (status, body) = send(&app, Method::GET, "/field/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_code(&body, "INVALID_FORMAT");

    let (status, body) = send(
        &app,
        Method::POST,
        "/field/not-a-uuid",
        Some(json!({ "property_id": uuid::Uuid::now_v7() })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_code(&body, "INVALID_FORMAT");
    Ok(())
}

// ============================================================================
// LINK / NAMED LINK
// ============================================================================

#[tokio::test]
async fn test_link_appears_in_named_link() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (status, link) = send(
        &app,
        Method::POST,
        "/link",
        Some(json!({ "entityId": rows.boat.id, "propertyId": rows.weight.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&link, "entity_id")?, rows.boat.id.to_string());

    let (_, named) = send(&app, Method::GET, "/named_link", None).await?;
    assert_len(&named, 2);
    let added = named
        .as_array()
        .and_then(|rows| rows.iter().find(|row| row["id"] == link["id"]))
        .ok_or_else(|| format!("new link missing from {}", named))?;
    assert_eq!(added["entity_name"], "boat");
    assert_eq!(added["property_name"], "weight");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_link_pair_conflicts() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (status, body) = send(
        &app,
        Method::POST,
        "/link",
        Some(json!({ "entity_id": rows.car.id, "property_id": rows.colour.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error_code(&body, "RECORD_ALREADY_EXISTS");

    let (_, links) = send(&app, Method::GET, "/link", None).await?;
    assert_len(&links, 1);
    Ok(())
}

#[tokio::test]
async fn test_link_to_missing_row_conflicts() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (status, body) = send(
        &app,
        Method::POST,
        "/link",
        Some(json!({ "entity_id": uuid::Uuid::now_v7(), "property_id": rows.weight.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error_code(&body, "REFERENCE_VIOLATION");
    Ok(())
}

#[tokio::test]
async fn test_linked_entity_cannot_be_deleted() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (_, before) = send(&app, Method::GET, "/entity", None).await?;
    let (status, body) =
        send(&app, Method::DELETE, "/entity", Some(json!({ "id": rows.car.id }))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error_code(&body, "REFERENCE_VIOLATION");

    let (_, after) = send(&app, Method::GET, "/entity", None).await?;
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn test_delete_link_removes_it_everywhere() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (status, deleted) = send(
        &app,
        Method::DELETE,
        "/link",
        Some(json!({ "id": rows.car_colour.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&deleted, "id")?, rows.car_colour.id.to_string());

    let (_, links) = send(&app, Method::GET, "/link", None).await?;
    assert_len(&links, 0);
    let (_, named) = send(&app, Method::GET, "/named_link", None).await?;
    assert_len(&named, 0);

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/link",
        Some(json!({ "id": rows.car_colour.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // With the link gone the entity is free to go.
    let (status, _) =
        send(&app, Method::DELETE, "/entity", Some(json!({ "id": rows.car.id }))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

// ============================================================================
// FIELDS
// ============================================================================

#[tokio::test]
async fn test_field_endpoints() -> TestResult {
    let (catalog, rows) = vehicle_catalog().await.map_err(|e| e.to_string())?;
    let app = app_over(catalog);

    let (status, unknown) = send(
        &app,
        Method::GET,
        &format!("/field/{}", uuid::Uuid::now_v7()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_len(&unknown, 0);

    let uri = format!("/field/{}", rows.car.id);
    let (status, field) =
        send(&app, Method::POST, &uri, Some(json!({ "property_id": rows.weight.id }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field["entity_name"], "car");
    assert_eq!(field["property_name"], "weight");

    let (_, fields) = send(&app, Method::GET, &uri, None).await?;
    assert_len(&fields, 2);

    let (status, body) =
        send(&app, Method::POST, &uri, Some(json!({ "propertyId": rows.weight.id }))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error_code(&body, "RECORD_ALREADY_EXISTS");
    Ok(())
}

// ============================================================================
// AMBIENT ROUTES
// ============================================================================

#[tokio::test]
async fn test_health_metrics_and_openapi() -> TestResult {
    let (app, _) = test_app();

    let (status, ready) = send(&app, Method::GET, "/health/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["status"], "healthy");

    let (status, _) = send(&app, Method::GET, "/health/live", None).await?;
    assert_eq!(status, StatusCode::OK);

    // Generate at least one sample before scraping.
    send(&app, Method::GET, "/entity", None).await?;
    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    let response = app.clone().oneshot(request).await.map_err(|e| e.to_string())?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| e.to_string())?;
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("linker_http_requests_total"));

    let (status, doc) = send(&app, Method::GET, "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/named_link").is_some());
    Ok(())
}

#[tokio::test]
async fn test_cors_preflight_allows_delete() -> TestResult {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/entity")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    let response = app.oneshot(request).await.map_err(|e| e.to_string())?;

    assert!(response.status().is_success());
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok());
    assert_eq!(allow_origin, Some("*"));
    let allow_methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(allow_methods.contains("DELETE"));
    Ok(())
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Creating then deleting any set of named rows leaves the list empty,
    /// and each create echoes its name.
    #[test]
    fn prop_create_echoes_name_and_delete_empties(
        names in prop::collection::vec("\\PC{0,12}", 1..6),
    ) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let (app, _) = test_app();
            let mut ids = Vec::new();
            for name in &names {
                let (status, created) = send(&app, Method::POST, "/entity", Some(json!({ "name": name })))
                    .await
                    .map_err(|e| TestCaseError::fail(e))?;
                prop_assert_eq!(status, StatusCode::OK);
                prop_assert_eq!(created["name"].as_str(), Some(name.as_str()));
                ids.push(created["id"].clone());
            }

            let (_, listed) = send(&app, Method::GET, "/entity", None)
                .await
                .map_err(|e| TestCaseError::fail(e))?;
            prop_assert_eq!(listed.as_array().map(Vec::len), Some(names.len()));

            for id in ids {
                let (status, _) = send(&app, Method::DELETE, "/entity", Some(json!({ "id": id })))
                    .await
                    .map_err(|e| TestCaseError::fail(e))?;
                prop_assert_eq!(status, StatusCode::OK);
            }

            let (_, listed) = send(&app, Method::GET, "/entity", None)
                .await
                .map_err(|e| TestCaseError::fail(e))?;
            prop_assert_eq!(listed, json!([]));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
