//! City Model

use super::serde_helpers;
use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

pub type CityId = Thing;

/// City model
///
/// Catalog reads address cities by slug ("goa") or full record id ("city:xxx").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct City {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<CityId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl City {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            slug: slug.into(),
            state: None,
            is_active: true,
        }
    }
}
