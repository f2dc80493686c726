//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend), schema definitions and repositories.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("market")
            .use_db("catalog")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}

/// Table and index definitions, applied on every startup (idempotent).
///
/// The unique index over (city, scope, target) is the write-side uniqueness
/// guarantee: CITY-scope rows index with target = NONE, so a city gets at
/// most one city-wide profile and at most one profile per (scope, target).
/// Concurrent creators race on the insert and the loser gets an index
/// violation, never a second row.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS city SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS city_slug ON city FIELDS slug UNIQUE;

        DEFINE TABLE IF NOT EXISTS product_category SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS product_category_slug ON product_category FIELDS slug UNIQUE;

        DEFINE TABLE IF NOT EXISTS service_category SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS service_category_slug ON service_category FIELDS slug UNIQUE;

        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS product_slug ON product FIELDS slug UNIQUE;

        DEFINE TABLE IF NOT EXISTS service SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS service_slug ON service FIELDS slug UNIQUE;

        DEFINE TABLE IF NOT EXISTS location_profile SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS location_profile_scope ON location_profile FIELDS city, scope, target UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

    tracing::info!("Database schema applied");
    Ok(())
}
