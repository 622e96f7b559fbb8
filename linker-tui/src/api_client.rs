//! REST client for the catalog API.

use crate::config::TuiConfig;
use linker_core::{Entity, EntityId, Link, LinkId, NamedLink, Property, PropertyId, RecordId};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Error body the API returns for every failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct DeleteNamedBody<'a> {
    id: uuid::Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct LinkBody {
    entity_id: EntityId,
    property_id: PropertyId,
}

#[derive(Serialize)]
struct IdBody {
    id: LinkId,
}

#[derive(Serialize)]
struct FieldBody {
    property_id: PropertyId,
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_entities(&self) -> Result<Vec<Entity>, ApiClientError> {
        self.send::<_, ()>(Method::GET, "/entity", None).await
    }

    pub async fn create_entity(&self, name: &str) -> Result<Entity, ApiClientError> {
        self.send(Method::POST, "/entity", Some(&NameBody { name })).await
    }

    /// Delete an entity; passing its name makes the server check it too.
    pub async fn delete_entity(
        &self,
        id: EntityId,
        name: Option<&str>,
    ) -> Result<Entity, ApiClientError> {
        let body = DeleteNamedBody {
            id: id.as_uuid(),
            name,
        };
        self.send(Method::DELETE, "/entity", Some(&body)).await
    }

    pub async fn list_properties(&self) -> Result<Vec<Property>, ApiClientError> {
        self.send::<_, ()>(Method::GET, "/property", None).await
    }

    pub async fn create_property(&self, name: &str) -> Result<Property, ApiClientError> {
        self.send(Method::POST, "/property", Some(&NameBody { name })).await
    }

    pub async fn delete_property(
        &self,
        id: PropertyId,
        name: Option<&str>,
    ) -> Result<Property, ApiClientError> {
        let body = DeleteNamedBody {
            id: id.as_uuid(),
            name,
        };
        self.send(Method::DELETE, "/property", Some(&body)).await
    }

    pub async fn create_link(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> Result<Link, ApiClientError> {
        let body = LinkBody {
            entity_id,
            property_id,
        };
        self.send(Method::POST, "/link", Some(&body)).await
    }

    pub async fn delete_link(&self, id: LinkId) -> Result<Link, ApiClientError> {
        self.send(Method::DELETE, "/link", Some(&IdBody { id })).await
    }

    pub async fn list_named_links(&self) -> Result<Vec<NamedLink>, ApiClientError> {
        self.send::<_, ()>(Method::GET, "/named_link", None).await
    }

    pub async fn list_fields(&self, entity_id: EntityId) -> Result<Vec<NamedLink>, ApiClientError> {
        let path = format!("/field/{}", entity_id.as_uuid());
        self.send::<_, ()>(Method::GET, &path, None).await
    }

    pub async fn create_field(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> Result<NamedLink, ApiClientError> {
        let path = format!("/field/{}", entity_id.as_uuid());
        self.send(Method::POST, &path, Some(&FieldBody { property_id }))
            .await
    }

    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }
    Err(error_from_body(status.as_u16(), &text))
}

fn error_from_body(status: u16, text: &str) -> ApiClientError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => ApiClientError::Api {
            status,
            code: body.code,
            message: body.message,
        },
        Err(_) if text.trim().is_empty() => {
            ApiClientError::InvalidResponse(format!("HTTP {}", status))
        }
        Err(_) => ApiClientError::InvalidResponse(format!("HTTP {}: {}", status, text.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_json_body() {
        let err = error_from_body(
            409,
            r#"{"code":"RECORD_ALREADY_EXISTS","message":"Link already exists"}"#,
        );
        assert!(matches!(err, ApiClientError::Api { status: 409, .. }));
        assert_eq!(err.to_string(), "RECORD_ALREADY_EXISTS: Link already exists");
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = error_from_body(422, "Failed to deserialize the JSON body");
        assert!(matches!(err, ApiClientError::InvalidResponse(_)));
        assert!(err.to_string().contains("HTTP 422"));

        let empty = error_from_body(404, "  ");
        assert_eq!(empty.to_string(), "Unexpected response: HTTP 404");
    }

    #[test]
    fn test_base_url_is_trimmed() -> Result<(), ApiClientError> {
        let config = TuiConfig {
            api_base_url: " http://localhost:3000/ ".to_string(),
            request_timeout_ms: 1_000,
            refresh_interval_ms: 1_000,
        };
        let client = RestClient::new(&config)?;
        assert_eq!(client.base_url(), "http://localhost:3000");
        Ok(())
    }

    #[test]
    fn test_delete_body_omits_missing_name() -> Result<(), serde_json::Error> {
        let id = uuid::Uuid::now_v7();
        let bare = serde_json::to_value(DeleteNamedBody { id, name: None })?;
        assert_eq!(bare, serde_json::json!({ "id": id }));
        Ok(())
    }
}
