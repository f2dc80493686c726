//! Profile Resolver
//!
//! Maps (city, scope, candidate entity ids) to the applicable override
//! profiles. Entity-specific profiles always beat the city-wide profile;
//! the city-wide profile is a fallback for PRODUCT-scoped resolution only.

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use crate::db::models::{LocationProfile, ScopeKind};
use crate::db::repository::{LocationProfileRepository, RepoResult};

/// Applicable profiles for one catalog query
///
/// Built from a single store read; holds no references back to the store, so
/// adjustment runs without further lookups.
#[derive(Debug, Clone, Default)]
pub struct ResolvedProfiles {
    per_target: HashMap<String, LocationProfile>,
    city_wide: Option<LocationProfile>,
}

impl ResolvedProfiles {
    /// Split fetched profiles into the per-target map and the city-wide slot.
    /// At most one city-wide profile can exist per city (unique index), so a
    /// plain overwrite is fine here.
    pub fn from_profiles(profiles: Vec<LocationProfile>) -> Self {
        let mut resolved = Self::default();
        for profile in profiles {
            match profile.scope.target() {
                Some(target) => {
                    resolved.per_target.insert(target.to_string(), profile);
                }
                None => resolved.city_wide = Some(profile),
            }
        }
        resolved
    }

    pub fn is_empty(&self) -> bool {
        self.per_target.is_empty() && self.city_wide.is_none()
    }

    pub fn city_wide(&self) -> Option<&LocationProfile> {
        self.city_wide.as_ref()
    }

    pub fn for_target(&self, id: &Thing) -> Option<&LocationProfile> {
        self.per_target.get(&id.to_string())
    }

    /// Winning profile for a product: product-specific, else city-wide
    pub fn effective_for_product(&self, id: &Thing) -> Option<&LocationProfile> {
        self.for_target(id).or(self.city_wide.as_ref())
    }

    /// Winning profile for a service: service-specific only.
    /// Services deliberately do not fall back to the city-wide profile.
    pub fn effective_for_service(&self, id: &Thing) -> Option<&LocationProfile> {
        self.for_target(id)
    }

    /// Effective multiplier for a product (1 when nothing applies)
    pub fn product_multiplier(&self, id: &Thing) -> f64 {
        self.effective_for_product(id)
            .map(|p| p.price_multiplier)
            .unwrap_or(1.0)
    }

    /// Effective multiplier for a service (1 when nothing applies)
    pub fn service_multiplier(&self, id: &Thing) -> f64 {
        self.effective_for_service(id)
            .map(|p| p.price_multiplier)
            .unwrap_or(1.0)
    }
}

/// Profile Resolver - one store read per catalog request, no caching.
/// Every resolve sees the current store state, so deletes are visible to the
/// very next call.
#[derive(Clone)]
pub struct ProfileResolver {
    repo: LocationProfileRepository,
}

impl ProfileResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: LocationProfileRepository::new(db),
        }
    }

    /// Resolve the applicable profiles for a batch of candidate targets.
    /// No applicable profile is the normal case, not an error.
    pub async fn resolve(
        &self,
        city: &Thing,
        scope: ScopeKind,
        targets: &[Thing],
    ) -> RepoResult<ResolvedProfiles> {
        let profiles = self.repo.resolve_for_city(city, scope, targets).await?;
        Ok(ResolvedProfiles::from_profiles(profiles))
    }
}
