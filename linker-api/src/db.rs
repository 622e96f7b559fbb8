//! Database Connection Pool Module
//!
//! PostgreSQL access through a deadpool-postgres pool. [`DbClient`] is the
//! production [`CatalogStore`]: every operation runs exactly one
//! parameterized statement on one pooled connection.

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use linker_core::{
    new_record_id, CatalogError, CatalogResult, CatalogStore, Entity, EntityId, Link, LinkId,
    NamedLink, Property, PropertyId, RecordId, RecordKind,
};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio_postgres::{error::SqlState, NoTls, Row};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::telemetry::METRICS;

/// Schema applied by [`DbClient::migrate`].
pub const CATALOG_SCHEMA: &str = include_str!("../migrations/0001_catalog.sql");

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// How long a request waits for a pooled connection
    pub timeout: Duration,
    /// Apply the embedded schema at start-up
    pub migrate: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "linker".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
            migrate: true,
        }
    }
}

/// First set variable among `keys`.
fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| std::env::var(key).ok())
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    ///
    /// `LINKER_DB_*` variables win over the libpq `PG*` ones.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_first(&["LINKER_DB_HOST", "PGHOST"]).unwrap_or(defaults.host),
            port: env_first(&["LINKER_DB_PORT", "PGPORT"])
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: env_first(&["LINKER_DB_NAME", "PGDATABASE"]).unwrap_or(defaults.dbname),
            user: env_first(&["LINKER_DB_USER", "PGUSER"]).unwrap_or(defaults.user),
            password: env_first(&["LINKER_DB_PASSWORD", "PGPASSWORD"]).unwrap_or_default(),
            max_size: std::env::var("LINKER_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.max_size),
            timeout: std::env::var("LINKER_DB_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            migrate: std::env::var("LINKER_DB_MIGRATE")
                .map(|s| !matches!(s.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.migrate),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        if !self.password.is_empty() {
            cfg.password = Some(self.password.clone());
        }

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_cfg = PoolConfig::new(self.max_size);
        pool_cfg.timeouts.wait = Some(self.timeout);
        cfg.pool = Some(pool_cfg);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Map a driver error onto the catalog taxonomy.
///
/// The reason keeps the server's message for logging.
fn classify(kind: RecordKind, err: tokio_postgres::Error) -> CatalogError {
    let reason = err
        .as_db_error()
        .map(|db| db.message().to_string())
        .unwrap_or_else(|| err.to_string());

    match err.code() {
        Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
            CatalogError::AlreadyExists { kind, reason }
        }
        Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => {
            CatalogError::ReferenceViolation { kind, reason }
        }
        _ if err.is_closed() => CatalogError::Unavailable { reason },
        _ => CatalogError::Storage { reason },
    }
}

fn classify_pool(err: deadpool_postgres::PoolError) -> CatalogError {
    match err {
        deadpool_postgres::PoolError::Timeout(_) => CatalogError::PoolExhausted,
        deadpool_postgres::PoolError::Closed => CatalogError::Unavailable {
            reason: "connection pool is closed".to_string(),
        },
        deadpool_postgres::PoolError::Backend(e) => CatalogError::Unavailable {
            reason: e.to_string(),
        },
        other => CatalogError::Storage {
            reason: other.to_string(),
        },
    }
}

// ============================================================================
// ROW DECODING
// ============================================================================

fn entity_from_row(row: &Row) -> Result<Entity, tokio_postgres::Error> {
    Ok(Entity {
        id: EntityId::new(row.try_get::<_, Uuid>("id")?),
        name: row.try_get("name")?,
    })
}

fn property_from_row(row: &Row) -> Result<Property, tokio_postgres::Error> {
    Ok(Property {
        id: PropertyId::new(row.try_get::<_, Uuid>("id")?),
        name: row.try_get("name")?,
    })
}

fn link_from_row(row: &Row) -> Result<Link, tokio_postgres::Error> {
    Ok(Link {
        id: LinkId::new(row.try_get::<_, Uuid>("id")?),
        entity_id: EntityId::new(row.try_get::<_, Uuid>("entity_id")?),
        property_id: PropertyId::new(row.try_get::<_, Uuid>("property_id")?),
    })
}

fn named_link_from_row(row: &Row) -> Result<NamedLink, tokio_postgres::Error> {
    Ok(NamedLink {
        id: LinkId::new(row.try_get::<_, Uuid>("id")?),
        entity_id: EntityId::new(row.try_get::<_, Uuid>("entity_id")?),
        entity_name: row.try_get("entity_name")?,
        property_id: PropertyId::new(row.try_get::<_, Uuid>("property_id")?),
        property_name: row.try_get("property_name")?,
    })
}

fn decode_all<T>(
    kind: RecordKind,
    rows: &[Row],
    decode: fn(&Row) -> Result<T, tokio_postgres::Error>,
) -> CatalogResult<Vec<T>> {
    rows.iter()
        .map(|row| decode(row).map_err(|e| classify(kind, e)))
        .collect()
}

// ============================================================================
// SQL
// ============================================================================

const NAMED_LINK_COLUMNS: &str = "id, entity_id, entity_name, property_id, property_name";

const FIELD_CREATE_SQL: &str = "WITH inserted AS ( \
         INSERT INTO link (id, entity_id, property_id) VALUES ($1, $2, $3) \
         RETURNING id, entity_id, property_id \
     ) \
     SELECT i.id, i.entity_id, e.name AS entity_name, i.property_id, p.name AS property_name \
     FROM inserted i \
     JOIN entity e ON e.id = i.entity_id \
     JOIN property p ON p.id = i.property_id";

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get a connection from the pool.
    pub async fn get_conn(&self) -> CatalogResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(classify_pool)
    }

    /// Apply the embedded catalog schema.
    pub async fn migrate(&self) -> CatalogResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(CATALOG_SCHEMA)
            .await
            .map_err(|e| classify(RecordKind::Link, e))?;
        tracing::info!("Catalog schema applied");
        Ok(())
    }

    /// Run one storage call and record its outcome.
    async fn observed<T, F>(&self, operation: &'static str, kind: RecordKind, call: F) -> CatalogResult<T>
    where
        F: Future<Output = CatalogResult<T>>,
    {
        let start = Instant::now();
        let result = call.await;
        if let Ok(metrics) = METRICS.as_ref() {
            metrics.record_db_operation(
                operation,
                kind.table(),
                result.is_ok(),
                start.elapsed().as_secs_f64(),
            );
        }
        if let Err(err) = &result {
            tracing::debug!(operation, resource = kind.table(), error = %err, "Catalog operation failed");
        }
        result
    }

    async fn insert_link(&self, entity_id: EntityId, property_id: PropertyId) -> CatalogResult<Link> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_one(
                "INSERT INTO link (id, entity_id, property_id) VALUES ($1, $2, $3) \
                 RETURNING id, entity_id, property_id",
                &[&new_record_id(), &entity_id.as_uuid(), &property_id.as_uuid()],
            )
            .await
            .map_err(|e| classify(RecordKind::Link, e))?;
        link_from_row(&row).map_err(|e| classify(RecordKind::Link, e))
    }
}

#[async_trait]
impl CatalogStore for DbClient {
    // ========================================================================
    // ENTITY OPERATIONS
    // ========================================================================

    async fn entity_list(&self) -> CatalogResult<Vec<Entity>> {
        self.observed("list", RecordKind::Entity, async {
            let conn = self.get_conn().await?;
            let rows = conn
                .query("SELECT id, name FROM entity ORDER BY id", &[])
                .await
                .map_err(|e| classify(RecordKind::Entity, e))?;
            decode_all(RecordKind::Entity, &rows, entity_from_row)
        })
        .await
    }

    async fn entity_create(&self, name: &str) -> CatalogResult<Entity> {
        self.observed("create", RecordKind::Entity, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_one(
                    "INSERT INTO entity (id, name) VALUES ($1, $2) RETURNING id, name",
                    &[&new_record_id(), &name],
                )
                .await
                .map_err(|e| classify(RecordKind::Entity, e))?;
            entity_from_row(&row).map_err(|e| classify(RecordKind::Entity, e))
        })
        .await
    }

    async fn entity_delete(
        &self,
        id: EntityId,
        name: Option<&str>,
    ) -> CatalogResult<Option<Entity>> {
        self.observed("delete", RecordKind::Entity, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_opt(
                    "DELETE FROM entity WHERE id = $1 AND ($2::text IS NULL OR name = $2) \
                     RETURNING id, name",
                    &[&id.as_uuid(), &name],
                )
                .await
                .map_err(|e| classify(RecordKind::Entity, e))?;
            row.as_ref()
                .map(entity_from_row)
                .transpose()
                .map_err(|e| classify(RecordKind::Entity, e))
        })
        .await
    }

    // ========================================================================
    // PROPERTY OPERATIONS
    // ========================================================================

    async fn property_list(&self) -> CatalogResult<Vec<Property>> {
        self.observed("list", RecordKind::Property, async {
            let conn = self.get_conn().await?;
            let rows = conn
                .query("SELECT id, name FROM property ORDER BY id", &[])
                .await
                .map_err(|e| classify(RecordKind::Property, e))?;
            decode_all(RecordKind::Property, &rows, property_from_row)
        })
        .await
    }

    async fn property_create(&self, name: &str) -> CatalogResult<Property> {
        self.observed("create", RecordKind::Property, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_one(
                    "INSERT INTO property (id, name) VALUES ($1, $2) RETURNING id, name",
                    &[&new_record_id(), &name],
                )
                .await
                .map_err(|e| classify(RecordKind::Property, e))?;
            property_from_row(&row).map_err(|e| classify(RecordKind::Property, e))
        })
        .await
    }

    async fn property_delete(
        &self,
        id: PropertyId,
        name: Option<&str>,
    ) -> CatalogResult<Option<Property>> {
        self.observed("delete", RecordKind::Property, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_opt(
                    "DELETE FROM property WHERE id = $1 AND ($2::text IS NULL OR name = $2) \
                     RETURNING id, name",
                    &[&id.as_uuid(), &name],
                )
                .await
                .map_err(|e| classify(RecordKind::Property, e))?;
            row.as_ref()
                .map(property_from_row)
                .transpose()
                .map_err(|e| classify(RecordKind::Property, e))
        })
        .await
    }

    // ========================================================================
    // LINK OPERATIONS
    // ========================================================================

    async fn link_list(&self) -> CatalogResult<Vec<Link>> {
        self.observed("list", RecordKind::Link, async {
            let conn = self.get_conn().await?;
            let rows = conn
                .query("SELECT id, entity_id, property_id FROM link ORDER BY id", &[])
                .await
                .map_err(|e| classify(RecordKind::Link, e))?;
            decode_all(RecordKind::Link, &rows, link_from_row)
        })
        .await
    }

    async fn link_create(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> CatalogResult<Link> {
        self.observed("create", RecordKind::Link, self.insert_link(entity_id, property_id))
            .await
    }

    async fn link_delete(&self, id: LinkId) -> CatalogResult<Option<Link>> {
        self.observed("delete", RecordKind::Link, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_opt(
                    "DELETE FROM link WHERE id = $1 RETURNING id, entity_id, property_id",
                    &[&id.as_uuid()],
                )
                .await
                .map_err(|e| classify(RecordKind::Link, e))?;
            row.as_ref()
                .map(link_from_row)
                .transpose()
                .map_err(|e| classify(RecordKind::Link, e))
        })
        .await
    }

    // ========================================================================
    // NAMED LINK / FIELD OPERATIONS
    // ========================================================================

    async fn named_link_list(&self) -> CatalogResult<Vec<NamedLink>> {
        self.observed("list_named", RecordKind::Link, async {
            let conn = self.get_conn().await?;
            let sql = format!("SELECT {} FROM named_link ORDER BY id", NAMED_LINK_COLUMNS);
            let rows = conn
                .query(sql.as_str(), &[])
                .await
                .map_err(|e| classify(RecordKind::Link, e))?;
            decode_all(RecordKind::Link, &rows, named_link_from_row)
        })
        .await
    }

    async fn field_list(&self, entity_id: EntityId) -> CatalogResult<Vec<NamedLink>> {
        self.observed("list_fields", RecordKind::Link, async {
            let conn = self.get_conn().await?;
            let sql = format!(
                "SELECT {} FROM named_link WHERE entity_id = $1 ORDER BY id",
                NAMED_LINK_COLUMNS
            );
            let rows = conn
                .query(sql.as_str(), &[&entity_id.as_uuid()])
                .await
                .map_err(|e| classify(RecordKind::Link, e))?;
            decode_all(RecordKind::Link, &rows, named_link_from_row)
        })
        .await
    }

    async fn field_create(
        &self,
        entity_id: EntityId,
        property_id: PropertyId,
    ) -> CatalogResult<NamedLink> {
        self.observed("create_field", RecordKind::Link, async {
            let conn = self.get_conn().await?;
            let row = conn
                .query_one(
                    FIELD_CREATE_SQL,
                    &[&new_record_id(), &entity_id.as_uuid(), &property_id.as_uuid()],
                )
                .await
                .map_err(|e| classify(RecordKind::Link, e))?;
            named_link_from_row(&row).map_err(|e| classify(RecordKind::Link, e))
        })
        .await
    }

    // ========================================================================
    // HEALTH
    // ========================================================================

    async fn ping(&self) -> CatalogResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[])
            .await
            .map_err(|e| classify(RecordKind::Entity, e))?;
        Ok(())
    }
}
