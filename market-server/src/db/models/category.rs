//! Catalog Category Models
//!
//! Product and service categories are independent tables with the same shape;
//! a location profile targets one or the other, never both.

use super::serde_helpers;
use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Product category model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductCategory {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

impl ProductCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
            sort_order: 0,
            is_active: true,
        }
    }
}

/// Service category model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceCategory {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<Thing>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

impl ServiceCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
            sort_order: 0,
            is_active: true,
        }
    }
}

fn default_true() -> bool {
    true
}
