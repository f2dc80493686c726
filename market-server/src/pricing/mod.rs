//! Location Pricing Engine
//!
//! Resolves city-scoped override profiles and applies them to catalog
//! entities at read time:
//!
//! - [`resolver`] - which profiles apply to a (city, scope, candidate set)
//! - [`adjuster`] - multiplies pricing fields and rebuilds display labels
//! - [`content`] - effective descriptive/SEO content from the winning profile

pub mod adjuster;
pub mod content;
pub mod resolver;

pub use adjuster::{adjust_product, adjust_products, adjust_service, adjust_services, format_inr};
pub use content::EffectiveContent;
pub use resolver::{ProfileResolver, ResolvedProfiles};
