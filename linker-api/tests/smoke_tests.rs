//! End-to-end smoke tests against a real PostgreSQL.
//!
//! Run with `--features db-tests` and the usual `LINKER_DB_*` / `PG*`
//! variables pointing at a scratch database.

#![cfg(feature = "db-tests")]

use linker_api::{ApiResult, DbClient, DbConfig};
use linker_core::{CatalogError, CatalogStore};

async fn test_db() -> ApiResult<DbClient> {
    let db = DbClient::from_config(&DbConfig::from_env())?;
    db.migrate().await?;
    Ok(db)
}

#[tokio::test]
async fn smoke_test_full_catalog_chain() -> ApiResult<()> {
    let db = test_db().await?;

    let entity = db.entity_create("smoke-entity").await?;
    let property = db.property_create("smoke-property").await?;
    assert_eq!(entity.name, "smoke-entity");

    let field = db.field_create(entity.id, property.id).await?;
    assert_eq!(field.entity_name, "smoke-entity");
    assert_eq!(field.property_name, "smoke-property");

    let fields = db.field_list(entity.id).await?;
    assert_eq!(fields, vec![field.clone()]);

    let duplicate = db.link_create(entity.id, property.id).await;
    assert!(matches!(duplicate, Err(CatalogError::AlreadyExists { .. })));

    let still_linked = db.entity_delete(entity.id, None).await;
    assert!(matches!(still_linked, Err(CatalogError::ReferenceViolation { .. })));

    assert!(db.link_delete(field.id).await?.is_some());
    assert!(db.entity_delete(entity.id, Some("wrong-name")).await?.is_none());
    assert!(db.entity_delete(entity.id, Some("smoke-entity")).await?.is_some());
    assert!(db.property_delete(property.id, None).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn smoke_test_schema_objects_exist() -> ApiResult<()> {
    let db = test_db().await?;
    db.ping().await?;

    let conn = db.get_conn().await?;
    let view = conn
        .query_opt(
            "SELECT 1 FROM information_schema.views WHERE table_name = 'named_link'",
            &[],
        )
        .await
        .map_err(|e| linker_api::ApiError::database_error(e.to_string()))?;
    assert!(view.is_some(), "named_link view must exist");
    Ok(())
}
