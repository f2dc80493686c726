//! Product Model
//!
//! Rental products are city-agnostic; city pricing is derived at read time
//! by the location pricing engine.

use super::serde_helpers;
use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type ProductId = Thing;

/// Rental product entity (出租商品)
///
/// All price fields are whole rupee amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    pub slug: String,
    #[serde(with = "serde_thing")]
    pub category: Thing,
    #[serde(default)]
    pub description: Option<String>,
    /// Lowest monthly rent across tenure plans
    pub min_price: i64,
    /// Highest monthly rent across tenure plans
    pub max_price: i64,
    /// Promotional price, shown instead of min_price when present
    #[serde(default)]
    pub discounted_price: Option<i64>,
    /// Refundable deposit (0 when absent)
    #[serde(default)]
    pub security_deposit: Option<i64>,
    /// One-time delivery/setup charge (0 when absent)
    #[serde(default)]
    pub service_charge: Option<i64>,
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

impl Product {
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        category: Thing,
        min_price: i64,
        max_price: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
            category,
            description: None,
            min_price,
            max_price,
            discounted_price: None,
            security_deposit: None,
            service_charge: None,
            sort_order: 0,
            is_active: true,
        }
    }
}
