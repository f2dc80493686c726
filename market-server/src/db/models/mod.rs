//! Database Models

// Serde helpers
pub mod serde_helpers;
pub mod serde_thing;

// Location
pub mod city;

// Catalog
pub mod category;
pub mod product;
pub mod service;

// Location overrides
pub mod location_profile;

// Re-exports
pub use category::{ProductCategory, ServiceCategory};
pub use city::{City, CityId};
pub use location_profile::{
    DemandLevel, LocationProfile, LocationProfileCreate, LocationProfileId, LocationProfileUpdate,
    ProfileScope, ScopeError, ScopeKind, parse_ref, scope_from_fields,
};
pub use product::{Product, ProductId};
pub use service::{Service, ServiceId, ServicePricing};
