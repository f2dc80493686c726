//! Service Model

use super::serde_helpers;
use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ServiceId = Thing;

/// Embedded pricing record for a service
///
/// `label` is a display string ("Starting from ₹2,999") regenerated whenever
/// the amount is adjusted for a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServicePricing {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Bookable service entity (上门服务)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<ServiceId>,
    pub name: String,
    pub slug: String,
    #[serde(with = "serde_thing")]
    pub category: Thing,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pricing: Option<ServicePricing>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Service {
    pub fn new(name: impl Into<String>, slug: impl Into<String>, category: Thing) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
            category,
            description: None,
            pricing: None,
            sort_order: 0,
            is_active: true,
        }
    }

    pub fn with_amount(mut self, amount: i64, label: impl Into<String>) -> Self {
        self.pricing = Some(ServicePricing {
            amount: Some(amount),
            label: Some(label.into()),
        });
        self
    }
}
