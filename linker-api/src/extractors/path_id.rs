//! Typed record ids from path parameters.
//!
//! `Path<EntityId>` rejects with axum's plain-text body; `PathId<T>` turns
//! the same failure into an [`ApiError`] so clients always get
//! `{ "code", "message", "details" }`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use linker_core::RecordId;
use uuid::Uuid;

use crate::error::ApiError;

/// Extractor for a typed record id held in the single path parameter.
///
/// ```rust,ignore
/// async fn list_fields(PathId(entity_id): PathId<EntityId>) -> ApiResult<..> { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathId<T: RecordId>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathId<T>
where
    S: Send + Sync,
    T: RecordId,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(uuid): Path<Uuid> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::invalid_format(&format!("{}_id", T::NAME), "a UUID").with_details(
                    serde_json::json!({
                        "resource": T::NAME,
                        "path": parts.uri.path(),
                        "reason": e.body_text(),
                    }),
                )
            })?;

        Ok(PathId(T::new(uuid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use linker_core::EntityId;
    use tower::ServiceExt;

    async fn echo(PathId(id): PathId<EntityId>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new().route("/field/:entity_id", get(echo))
    }

    async fn call(uri: &str) -> Result<(StatusCode, Vec<u8>), String> {
        let request = Request::builder()
            .uri(uri)
            .body(axum::body::Body::empty())
            .map_err(|e| e.to_string())?;
        let response = app().oneshot(request).await.map_err(|e| e.to_string())?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| e.to_string())?;
        Ok((status, bytes.to_vec()))
    }

    #[tokio::test]
    async fn test_valid_uuid_is_extracted() -> Result<(), String> {
        let id = EntityId::generate();
        let (status, body) = call(&format!("/field/{}", id)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8_lossy(&body), id.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_uuid_rejects_with_error_envelope() -> Result<(), String> {
        let (status, body) = call("/field/not-a-uuid").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err: ApiError = serde_json::from_slice(&body).map_err(|e| e.to_string())?;
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.message.contains("entity_id"));
        let details = err.details.ok_or("missing details")?;
        assert_eq!(details["resource"], "entity");
        assert_eq!(details["path"], "/field/not-a-uuid");
        Ok(())
    }
}
