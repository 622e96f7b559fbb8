//! API Configuration Module
//!
//! CORS and bind settings for the HTTP server, read from environment
//! variables with permissive development defaults.

use std::net::SocketAddr;

use crate::error::{ApiError, ApiResult};

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind.
    pub bind_host: String,

    /// TCP port to bind.
    pub port: u16,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins.
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Deployment environment name, reported at start-up.
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `LINKER_API_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `LINKER_API_PORT`: Port to bind (default: 3000)
    /// - `LINKER_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `LINKER_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `LINKER_ENVIRONMENT`: Deployment name (default: development)
    pub fn from_env() -> ApiResult<Self> {
        let defaults = Self::default();

        let bind_host = std::env::var("LINKER_API_BIND").unwrap_or(defaults.bind_host);

        let port = match std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("LINKER_API_PORT").ok())
        {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", raw)))?,
            None => defaults.port,
        };

        let cors_origins = std::env::var("LINKER_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("LINKER_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let environment =
            std::env::var("LINKER_ENVIRONMENT").unwrap_or(defaults.environment);

        Ok(Self {
            bind_host,
            port,
            cors_origins,
            cors_max_age_secs,
            environment,
        })
    }

    /// Resolve the socket address to listen on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }

    /// Whether CORS is restricted to configured origins.
    pub fn restricts_origins(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
