//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Product;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products, display order
    pub async fn find_active(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE is_active = true ORDER BY sort_order ASC, name ASC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find active products in a category
    pub async fn find_active_by_category(&self, category: &Thing) -> RepoResult<Vec<Product>> {
        let category_ref = category.to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT * FROM product WHERE is_active = true AND category = $category \
                 ORDER BY sort_order ASC, name ASC",
            )
            .bind(("category", category_ref))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, product: Product) -> RepoResult<Product> {
        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }
}
