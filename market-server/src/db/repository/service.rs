//! Service Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Service;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "service";

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active services, display order
    pub async fn find_active(&self) -> RepoResult<Vec<Service>> {
        let services: Vec<Service> = self
            .base
            .db()
            .query("SELECT * FROM service WHERE is_active = true ORDER BY sort_order ASC, name ASC")
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find active services in a category
    pub async fn find_active_by_category(&self, category: &Thing) -> RepoResult<Vec<Service>> {
        let category_ref = category.to_string();
        let services: Vec<Service> = self
            .base
            .db()
            .query(
                "SELECT * FROM service WHERE is_active = true AND category = $category \
                 ORDER BY sort_order ASC, name ASC",
            )
            .bind(("category", category_ref))
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find service by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let service: Option<Service> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(service)
    }

    /// Create a new service
    pub async fn create(&self, service: Service) -> RepoResult<Service> {
        let created: Option<Service> = self.base.db().create(TABLE).content(service).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }
}
