//! City Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::City;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "city";

#[derive(Clone)]
pub struct CityRepository {
    base: BaseRepository,
}

impl CityRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active cities, alphabetical
    pub async fn find_all(&self) -> RepoResult<Vec<City>> {
        let cities: Vec<City> = self
            .base
            .db()
            .query("SELECT * FROM city WHERE is_active = true ORDER BY name ASC")
            .await?
            .take(0)?;
        Ok(cities)
    }

    /// Find a city by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<City>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let city: Option<City> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(city)
    }

    /// Find a city by public identifier: slug ("goa") or record id ("city:xxx")
    pub async fn find_by_identifier(&self, ident: &str) -> RepoResult<Option<City>> {
        if ident.contains(':') {
            return self.find_by_id(ident).await;
        }
        let ident_owned = ident.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM city WHERE slug = $slug LIMIT 1")
            .bind(("slug", ident_owned))
            .await?;
        let cities: Vec<City> = result.take(0)?;
        Ok(cities.into_iter().next())
    }

    /// Create a new city
    pub async fn create(&self, city: City) -> RepoResult<City> {
        let created: Option<City> = self.base.db().create(TABLE).content(city).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create city".to_string()))
    }
}
