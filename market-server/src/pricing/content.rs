//! Effective Content
//!
//! Descriptive/SEO content for an (entity, city) pair, taken wholesale from
//! the winning profile (same precedence as pricing - no per-field merge
//! across profiles).

use serde::Serialize;

use crate::db::models::{DemandLevel, LocationProfile};

/// Resolved content block for catalog responses and SEO rendering
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EffectiveContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_text: Option<String>,
    pub express_available: bool,
    pub demand_level: DemandLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_content: Option<String>,
}

impl EffectiveContent {
    pub fn from_profile(profile: &LocationProfile) -> Self {
        Self {
            custom_intro: profile.custom_intro.clone(),
            seasonal_note: profile.seasonal_note.clone(),
            delivery_note: profile.delivery_note.clone(),
            trending_text: profile.trending_text.clone(),
            express_available: profile.express_available,
            demand_level: profile.demand_level,
            seo_title: profile.seo_title_override.clone(),
            seo_description: profile.seo_description_override.clone(),
            additional_content: profile.additional_content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ProfileScope;
    use surrealdb::sql::Thing;

    #[test]
    fn content_mirrors_winning_profile() {
        let profile = LocationProfile {
            id: None,
            city: Thing::from(("city", "pune")),
            scope: ProfileScope::City,
            price_multiplier: 1.1,
            demand_level: DemandLevel::High,
            custom_intro: Some("Rent furniture in Pune".to_string()),
            seasonal_note: None,
            delivery_note: Some("Delivery within 72 hours".to_string()),
            trending_text: None,
            express_available: true,
            seo_title_override: Some("Furniture on Rent in Pune".to_string()),
            seo_description_override: None,
            additional_content: None,
            created_at: 0,
            updated_at: 0,
        };

        let content = EffectiveContent::from_profile(&profile);
        assert_eq!(content.custom_intro.as_deref(), Some("Rent furniture in Pune"));
        assert_eq!(content.delivery_note.as_deref(), Some("Delivery within 72 hours"));
        assert_eq!(content.seo_title.as_deref(), Some("Furniture on Rent in Pune"));
        assert_eq!(content.seo_description, None);
        assert_eq!(content.demand_level, DemandLevel::High);
        assert!(content.express_available);
    }
}
