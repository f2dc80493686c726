//! Catalog Category Repositories

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ProductCategory, ServiceCategory};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ProductCategoryRepository {
    base: BaseRepository,
}

impl ProductCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an active category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<ProductCategory>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product_category WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<ProductCategory> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new product category
    pub async fn create(&self, category: ProductCategory) -> RepoResult<ProductCategory> {
        let created: Option<ProductCategory> = self
            .base
            .db()
            .create("product_category")
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product category".to_string()))
    }
}

#[derive(Clone)]
pub struct ServiceCategoryRepository {
    base: BaseRepository,
}

impl ServiceCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an active category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<ServiceCategory>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM service_category WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<ServiceCategory> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new service category
    pub async fn create(&self, category: ServiceCategory) -> RepoResult<ServiceCategory> {
        let created: Option<ServiceCategory> = self
            .base
            .db()
            .create("service_category")
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service category".to_string()))
    }
}
