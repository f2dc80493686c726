//! Shared conversion helpers for API handlers

use serde::Serialize;
use surrealdb::sql::Thing;

use crate::core::ServerState;
use crate::db::models::City;
use crate::db::repository::CityRepository;
use crate::utils::{AppError, AppResult};

/// City block embedded in catalog responses
#[derive(Debug, Clone, Serialize)]
pub struct CitySummary {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl CitySummary {
    pub fn from_city(city: &City) -> Self {
        Self {
            id: city.id.as_ref().map(Thing::to_string).unwrap_or_default(),
            name: city.name.clone(),
            slug: city.slug.clone(),
        }
    }
}

/// Resolve a city identifier (slug or "city:id") to an active city.
///
/// Catalog paths treat a missing or inactive city as not found.
pub async fn resolve_active_city(state: &ServerState, ident: &str) -> AppResult<City> {
    CityRepository::new(state.db.clone())
        .find_by_identifier(ident)
        .await?
        .filter(|city| city.is_active)
        .ok_or_else(|| AppError::not_found(format!("City {ident} not found")))
}

/// Record id of a fetched entity; absence is a store bug, not client error
pub fn record_id(id: &Option<Thing>, entity: &str) -> AppResult<Thing> {
    id.clone()
        .ok_or_else(|| AppError::internal(format!("{entity} record missing id")))
}
