//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Location
pub mod city;

// Catalog
pub mod category;
pub mod product;
pub mod service;

// Location overrides
pub mod location_profile;

// Re-exports
pub use category::{ProductCategoryRepository, ServiceCategoryRepository};
pub use city::CityRepository;
pub use location_profile::{LocationProfileRepository, ProfileFilter};
pub use product::ProductRepository;
pub use service::ServiceRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as "index ... already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 负载和存储记录中的引用一律是 "table:id" 字符串；
// 路径参数允许省略表前缀，由 strip_table_prefix 归一化。

/// Strip a leading "table:" prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => key,
        _ => id,
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Check whether a referenced record exists
    pub async fn record_exists(&self, thing: &surrealdb::sql::Thing) -> RepoResult<bool> {
        let mut result = self
            .db
            .query("SELECT <string>id AS id FROM $record")
            .bind(("record", thing.clone()))
            .await?;
        let rows: Vec<serde_json::Value> = result.take(0)?;
        Ok(!rows.is_empty())
    }
}
