//! Linker API - REST layer for the entity/property/link catalog
//!
//! Each HTTP route maps onto one [`CatalogStore`](linker_core::CatalogStore)
//! call. [`DbClient`] backs the store with PostgreSQL; tests use
//! [`linker_core::InMemoryCatalog`].

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod telemetry;
pub mod types;

pub use config::ApiConfig;
pub use db::{DbClient, DbConfig, CATALOG_SCHEMA};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::{build_cors_layer, create_api_router};
pub use types::*;
