//! Location Profile Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{
    LocationProfile, LocationProfileCreate, LocationProfileUpdate, ScopeKind, parse_ref,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

const TABLE: &str = "location_profile";

const DUPLICATE_MSG: &str = "A profile already exists for this city, scope and target";

/// List filters; all optional and combinable
#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    pub city: Option<Thing>,
    pub scope: Option<ScopeKind>,
    pub product: Option<Thing>,
    pub service: Option<Thing>,
}

#[derive(Clone)]
pub struct LocationProfileRepository {
    base: BaseRepository,
}

impl LocationProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find profile by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<LocationProfile>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let profile: Option<LocationProfile> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(profile)
    }

    /// List profiles with optional filters, newest first
    pub async fn list(
        &self,
        filter: &ProfileFilter,
        page: usize,
        limit: usize,
    ) -> RepoResult<(Vec<LocationProfile>, usize)> {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.city.is_some() {
            conditions.push("city = $city");
        }
        if filter.scope.is_some() {
            conditions.push("scope = $scope");
        }
        if filter.product.is_some() {
            conditions.push("scope = 'PRODUCT' AND target = $product");
        }
        if filter.service.is_some() {
            conditions.push("scope = 'SERVICE' AND target = $service");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let start = page.saturating_sub(1) * limit;
        let select = format!(
            "SELECT * FROM location_profile{where_clause} \
             ORDER BY created_at DESC LIMIT $limit START $start"
        );
        let count = format!("SELECT count() AS total FROM location_profile{where_clause} GROUP ALL");

        let mut query = self
            .base
            .db()
            .query(select)
            .query(count)
            .bind(("limit", limit as i64))
            .bind(("start", start as i64));
        if let Some(city) = &filter.city {
            query = query.bind(("city", city.to_string()));
        }
        if let Some(scope) = &filter.scope {
            query = query.bind(("scope", scope.as_str().to_string()));
        }
        if let Some(product) = &filter.product {
            query = query.bind(("product", product.to_string()));
        }
        if let Some(service) = &filter.service {
            query = query.bind(("service", service.to_string()));
        }

        let mut result = query.await?;
        let profiles: Vec<LocationProfile> = result.take(0)?;

        #[derive(serde::Deserialize)]
        struct CountRow {
            total: usize,
        }
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.into_iter().next().map(|c| c.total).unwrap_or(0);

        Ok((profiles, total))
    }

    /// Fetch every profile applicable to one (city, scope, candidate set) in
    /// a single query: scope-matching profiles naming a candidate target,
    /// plus the city-wide profile if present.
    pub async fn resolve_for_city(
        &self,
        city: &Thing,
        kind: ScopeKind,
        targets: &[Thing],
    ) -> RepoResult<Vec<LocationProfile>> {
        let city_ref = city.to_string();
        let target_refs: Vec<String> = targets.iter().map(Thing::to_string).collect();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM location_profile WHERE city = $city AND \
                 (scope = 'CITY' OR (scope = $scope AND target IN $targets))",
            )
            .bind(("city", city_ref))
            .bind(("scope", kind.as_str().to_string()))
            .bind(("targets", target_refs))
            .await?;
        Ok(result.take(0)?)
    }

    /// Create a new location profile
    ///
    /// Uniqueness (one city-wide profile per city, one profile per
    /// (city, scope, target)) is enforced by the unique index at insert
    /// time - deliberately no read-then-write check, so concurrent creators
    /// cannot both succeed.
    pub async fn create(&self, data: LocationProfileCreate) -> RepoResult<LocationProfile> {
        let city = parse_ref("city", "city", &data.city)
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        let scope = data
            .build_scope()
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        validate_multiplier(data.price_multiplier)?;

        self.assert_reference(&city).await?;
        if let Some(target) = scope.target() {
            self.assert_reference(target).await?;
        }

        let now = chrono::Utc::now().timestamp_millis();
        let profile = LocationProfile {
            id: None,
            city,
            scope,
            price_multiplier: data.price_multiplier.unwrap_or(1.0),
            demand_level: data.demand_level.unwrap_or_default(),
            custom_intro: data.custom_intro,
            seasonal_note: data.seasonal_note,
            delivery_note: data.delivery_note,
            trending_text: data.trending_text,
            express_available: data.express_available.unwrap_or(false),
            seo_title_override: data.seo_title_override,
            seo_description_override: data.seo_description_override,
            additional_content: data.additional_content,
            created_at: now,
            updated_at: now,
        };

        let created: Option<LocationProfile> = self
            .base
            .db()
            .create(TABLE)
            .content(profile)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(_) => RepoError::Duplicate(DUPLICATE_MSG.to_string()),
                other => other,
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create location profile".to_string()))
    }

    /// Update a location profile
    ///
    /// Persists with a full-content UPDATE (not a merge): when the scope
    /// changes, the previous target is replaced in the same write.
    pub async fn update(
        &self,
        id: &str,
        data: LocationProfileUpdate,
    ) -> RepoResult<LocationProfile> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let existing = self
            .find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Location profile {id} not found")))?;

        let mut updated = data
            .apply_to(&existing)
            .map_err(|e| RepoError::Validation(e.to_string()))?;
        validate_multiplier(data.price_multiplier)?;

        if updated.city != existing.city {
            self.assert_reference(&updated.city).await?;
        }
        if updated.scope != existing.scope
            && let Some(target) = updated.scope.target()
        {
            self.assert_reference(target).await?;
        }

        updated.updated_at = chrono::Utc::now().timestamp_millis();

        let result: Option<LocationProfile> = self
            .base
            .db()
            .update((TABLE, pure_id.as_str()))
            .content(updated)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(_) => RepoError::Duplicate(DUPLICATE_MSG.to_string()),
                other => other,
            })?;
        result.ok_or_else(|| RepoError::NotFound(format!("Location profile {id} not found")))
    }

    /// Delete a location profile (hard delete)
    ///
    /// There is no resolution cache, so the deletion is visible to the very
    /// next resolve call.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let deleted: Option<LocationProfile> =
            self.base.db().delete((TABLE, pure_id.as_str())).await?;
        Ok(deleted.is_some())
    }

    /// Referenced records must exist in the live store
    async fn assert_reference(&self, thing: &Thing) -> RepoResult<()> {
        if self.base.record_exists(thing).await? {
            Ok(())
        } else {
            Err(RepoError::Validation(format!(
                "Referenced {} {} does not exist",
                thing.tb, thing
            )))
        }
    }
}

fn validate_multiplier(value: Option<f64>) -> RepoResult<()> {
    if let Some(m) = value
        && (!m.is_finite() || m < 0.0)
    {
        return Err(RepoError::Validation(
            "price_multiplier must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
