//! Location Profile Model
//!
//! 城市维度的覆盖记录：价格乘数 + 文案/SEO 覆盖。
//! 作用域建模为带目标的和类型，目标由枚举变体携带，
//! 不存在"目标缺失/目标错配"的可表示状态。

use super::serde_helpers;
use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use thiserror::Error;

pub type LocationProfileId = Thing;

/// Demand level shown on city landing pages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Scope/target shape errors (client-correctable)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("unknown scope: {0}")]
    UnknownScope(String),

    #[error("{field} is required when scope is {scope}")]
    MissingTarget {
        field: &'static str,
        scope: &'static str,
    },

    #[error("{field} must not be set when scope is {scope}")]
    ExtraneousTarget {
        field: &'static str,
        scope: &'static str,
    },

    #[error("invalid {field} reference: {value}")]
    InvalidReference { field: &'static str, value: String },
}

/// Scope tag without target payload - used for queries and API filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    City,
    Product,
    Service,
    ProductCategory,
    ServiceCategory,
}

impl ScopeKind {
    /// Persisted tag value (matches the serialized `scope` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::City => "CITY",
            ScopeKind::Product => "PRODUCT",
            ScopeKind::Service => "SERVICE",
            ScopeKind::ProductCategory => "PRODUCT_CATEGORY",
            ScopeKind::ServiceCategory => "SERVICE_CATEGORY",
        }
    }

    /// Parse a scope string from the API; the scope set is closed.
    pub fn parse(s: &str) -> Result<Self, ScopeError> {
        match s.to_uppercase().as_str() {
            "CITY" => Ok(ScopeKind::City),
            "PRODUCT" => Ok(ScopeKind::Product),
            "SERVICE" => Ok(ScopeKind::Service),
            "PRODUCT_CATEGORY" => Ok(ScopeKind::ProductCategory),
            "SERVICE_CATEGORY" => Ok(ScopeKind::ServiceCategory),
            other => Err(ScopeError::UnknownScope(other.to_string())),
        }
    }

    /// Table the target of this scope must live in (None for CITY)
    pub fn target_table(&self) -> Option<&'static str> {
        match self {
            ScopeKind::City => None,
            ScopeKind::Product => Some("product"),
            ScopeKind::Service => Some("service"),
            ScopeKind::ProductCategory => Some("product_category"),
            ScopeKind::ServiceCategory => Some("service_category"),
        }
    }

    /// API payload field carrying the target for this scope (None for CITY)
    fn target_field(&self) -> Option<&'static str> {
        match self {
            ScopeKind::City => None,
            ScopeKind::Product => Some("product"),
            ScopeKind::Service => Some("service"),
            ScopeKind::ProductCategory => Some("product_category"),
            ScopeKind::ServiceCategory => Some("service_category"),
        }
    }
}

/// Profile scope as a tagged union
///
/// Persisted adjacently tagged: `scope` holds the tag, `target` holds the
/// record reference (absent for CITY). The `(city, scope, target)` unique
/// index keys off exactly these two fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "scope", content = "target", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileScope {
    City,
    Product(#[serde(with = "super::serde_thing")] Thing),
    Service(#[serde(with = "super::serde_thing")] Thing),
    ProductCategory(#[serde(with = "super::serde_thing")] Thing),
    ServiceCategory(#[serde(with = "super::serde_thing")] Thing),
}

impl ProfileScope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            ProfileScope::City => ScopeKind::City,
            ProfileScope::Product(_) => ScopeKind::Product,
            ProfileScope::Service(_) => ScopeKind::Service,
            ProfileScope::ProductCategory(_) => ScopeKind::ProductCategory,
            ProfileScope::ServiceCategory(_) => ScopeKind::ServiceCategory,
        }
    }

    pub fn target(&self) -> Option<&Thing> {
        match self {
            ProfileScope::City => None,
            ProfileScope::Product(t)
            | ProfileScope::Service(t)
            | ProfileScope::ProductCategory(t)
            | ProfileScope::ServiceCategory(t) => Some(t),
        }
    }
}

/// Parse a record reference from the API ("table:id" or bare id).
///
/// A prefix naming a different table is a mismatched reference and rejected.
pub fn parse_ref(field: &'static str, table: &str, raw: &str) -> Result<Thing, ScopeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ScopeError::InvalidReference {
            field,
            value: raw.to_string(),
        });
    }
    match raw.split_once(':') {
        Some((tb, id)) if tb == table && !id.is_empty() => {
            Ok(Thing::from((tb.to_string(), id.to_string())))
        }
        Some(_) => Err(ScopeError::InvalidReference {
            field,
            value: raw.to_string(),
        }),
        None => Ok(Thing::from((table.to_string(), raw.to_string()))),
    }
}

/// Build a [`ProfileScope`] from the API shape (scope string + one-of-four
/// optional target fields). Exactly the matching target must be set.
pub fn scope_from_fields(
    kind: ScopeKind,
    product: Option<&str>,
    service: Option<&str>,
    product_category: Option<&str>,
    service_category: Option<&str>,
) -> Result<ProfileScope, ScopeError> {
    let fields = [
        ("product", product),
        ("service", service),
        ("product_category", product_category),
        ("service_category", service_category),
    ];
    let required = kind.target_field();

    for (name, value) in fields {
        if Some(name) != required && value.is_some() {
            return Err(ScopeError::ExtraneousTarget {
                field: name,
                scope: kind.as_str(),
            });
        }
    }

    let target_of = |field: &'static str, value: Option<&str>| -> Result<Thing, ScopeError> {
        let table = kind.target_table().unwrap_or_default();
        let raw = value.ok_or(ScopeError::MissingTarget {
            field,
            scope: kind.as_str(),
        })?;
        parse_ref(field, table, raw)
    };

    match kind {
        ScopeKind::City => Ok(ProfileScope::City),
        ScopeKind::Product => Ok(ProfileScope::Product(target_of("product", product)?)),
        ScopeKind::Service => Ok(ProfileScope::Service(target_of("service", service)?)),
        ScopeKind::ProductCategory => Ok(ProfileScope::ProductCategory(target_of(
            "product_category",
            product_category,
        )?)),
        ScopeKind::ServiceCategory => Ok(ProfileScope::ServiceCategory(target_of(
            "service_category",
            service_category,
        )?)),
    }
}

/// Location profile entity (城市覆盖档案)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationProfile {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_thing::option"
    )]
    pub id: Option<LocationProfileId>,
    #[serde(with = "serde_thing")]
    pub city: Thing,
    #[serde(flatten)]
    pub scope: ProfileScope,
    /// Scalar applied to base price fields at read time (1 = no adjustment)
    #[serde(default = "default_multiplier")]
    pub price_multiplier: f64,
    #[serde(default)]
    pub demand_level: DemandLevel,
    // Content overrides
    #[serde(default)]
    pub custom_intro: Option<String>,
    #[serde(default)]
    pub seasonal_note: Option<String>,
    #[serde(default)]
    pub delivery_note: Option<String>,
    #[serde(default)]
    pub trending_text: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub express_available: bool,
    // SEO overrides
    #[serde(default)]
    pub seo_title_override: Option<String>,
    #[serde(default)]
    pub seo_description_override: Option<String>,
    #[serde(default)]
    pub additional_content: Option<String>,
    /// Created timestamp (milliseconds since epoch)
    #[serde(default)]
    pub created_at: i64,
    /// Updated timestamp (milliseconds since epoch)
    #[serde(default)]
    pub updated_at: i64,
}

fn default_multiplier() -> f64 {
    1.0
}

/// Create location profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationProfileCreate {
    /// City ID as string (e.g., "city:xxx")
    pub city: String,
    /// Scope tag: CITY | PRODUCT | SERVICE | PRODUCT_CATEGORY | SERVICE_CATEGORY
    pub scope: String,
    /// Target ID for PRODUCT scope (e.g., "product:xxx")
    #[serde(default)]
    pub product: Option<String>,
    /// Target ID for SERVICE scope
    #[serde(default)]
    pub service: Option<String>,
    /// Target ID for PRODUCT_CATEGORY scope
    #[serde(default)]
    pub product_category: Option<String>,
    /// Target ID for SERVICE_CATEGORY scope
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub price_multiplier: Option<f64>,
    #[serde(default)]
    pub demand_level: Option<DemandLevel>,
    #[serde(default)]
    pub custom_intro: Option<String>,
    #[serde(default)]
    pub seasonal_note: Option<String>,
    #[serde(default)]
    pub delivery_note: Option<String>,
    #[serde(default)]
    pub trending_text: Option<String>,
    #[serde(default)]
    pub express_available: Option<bool>,
    #[serde(default)]
    pub seo_title_override: Option<String>,
    #[serde(default)]
    pub seo_description_override: Option<String>,
    #[serde(default)]
    pub additional_content: Option<String>,
}

impl LocationProfileCreate {
    /// Build the scope sum type from the payload fields
    pub fn build_scope(&self) -> Result<ProfileScope, ScopeError> {
        let kind = ScopeKind::parse(&self.scope)?;
        scope_from_fields(
            kind,
            self.product.as_deref(),
            self.service.as_deref(),
            self.product_category.as_deref(),
            self.service_category.as_deref(),
        )
    }
}

/// Update location profile payload
///
/// Absent fields are left unchanged. A scope change must carry the new
/// scope's target and replaces the previous target wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationProfileUpdate {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub service_category: Option<String>,
    #[serde(default)]
    pub price_multiplier: Option<f64>,
    #[serde(default)]
    pub demand_level: Option<DemandLevel>,
    #[serde(default)]
    pub custom_intro: Option<String>,
    #[serde(default)]
    pub seasonal_note: Option<String>,
    #[serde(default)]
    pub delivery_note: Option<String>,
    #[serde(default)]
    pub trending_text: Option<String>,
    #[serde(default)]
    pub express_available: Option<bool>,
    #[serde(default)]
    pub seo_title_override: Option<String>,
    #[serde(default)]
    pub seo_description_override: Option<String>,
    #[serde(default)]
    pub additional_content: Option<String>,
}

impl LocationProfileUpdate {
    fn has_target_field(&self) -> bool {
        self.product.is_some()
            || self.service.is_some()
            || self.product_category.is_some()
            || self.service_category.is_some()
    }

    /// Apply this update to an existing profile, producing the full record to
    /// persist. The scope is rebuilt from the payload whenever the payload
    /// touches scope or any target field, so stale targets cannot survive a
    /// scope change.
    pub fn apply_to(&self, existing: &LocationProfile) -> Result<LocationProfile, ScopeError> {
        let city = match &self.city {
            Some(raw) => parse_ref("city", "city", raw)?,
            None => existing.city.clone(),
        };

        let scope = if self.scope.is_some() || self.has_target_field() {
            let kind = match &self.scope {
                Some(s) => ScopeKind::parse(s)?,
                None => existing.scope.kind(),
            };
            scope_from_fields(
                kind,
                self.product.as_deref(),
                self.service.as_deref(),
                self.product_category.as_deref(),
                self.service_category.as_deref(),
            )?
        } else {
            existing.scope.clone()
        };

        Ok(LocationProfile {
            id: existing.id.clone(),
            city,
            scope,
            price_multiplier: self.price_multiplier.unwrap_or(existing.price_multiplier),
            demand_level: self.demand_level.unwrap_or(existing.demand_level),
            custom_intro: self
                .custom_intro
                .clone()
                .or_else(|| existing.custom_intro.clone()),
            seasonal_note: self
                .seasonal_note
                .clone()
                .or_else(|| existing.seasonal_note.clone()),
            delivery_note: self
                .delivery_note
                .clone()
                .or_else(|| existing.delivery_note.clone()),
            trending_text: self
                .trending_text
                .clone()
                .or_else(|| existing.trending_text.clone()),
            express_available: self.express_available.unwrap_or(existing.express_available),
            seo_title_override: self
                .seo_title_override
                .clone()
                .or_else(|| existing.seo_title_override.clone()),
            seo_description_override: self
                .seo_description_override
                .clone()
                .or_else(|| existing.seo_description_override.clone()),
            additional_content: self
                .additional_content
                .clone()
                .or_else(|| existing.additional_content.clone()),
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload(scope: &str) -> LocationProfileCreate {
        LocationProfileCreate {
            city: "city:goa".to_string(),
            scope: scope.to_string(),
            product: None,
            service: None,
            product_category: None,
            service_category: None,
            price_multiplier: None,
            demand_level: None,
            custom_intro: None,
            seasonal_note: None,
            delivery_note: None,
            trending_text: None,
            express_available: None,
            seo_title_override: None,
            seo_description_override: None,
            additional_content: None,
        }
    }

    fn profile(scope: ProfileScope) -> LocationProfile {
        LocationProfile {
            id: None,
            city: Thing::from(("city", "goa")),
            scope,
            price_multiplier: 1.0,
            demand_level: DemandLevel::Medium,
            custom_intro: None,
            seasonal_note: None,
            delivery_note: None,
            trending_text: None,
            express_available: false,
            seo_title_override: None,
            seo_description_override: None,
            additional_content: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn city_scope_requires_no_target() {
        let payload = create_payload("CITY");
        assert_eq!(payload.build_scope(), Ok(ProfileScope::City));
    }

    #[test]
    fn product_scope_requires_product_target() {
        let payload = create_payload("PRODUCT");
        assert_eq!(
            payload.build_scope(),
            Err(ScopeError::MissingTarget {
                field: "product",
                scope: "PRODUCT",
            })
        );

        let mut payload = create_payload("PRODUCT");
        payload.product = Some("product:sofa".to_string());
        assert_eq!(
            payload.build_scope(),
            Ok(ProfileScope::Product(Thing::from(("product", "sofa"))))
        );
    }

    #[test]
    fn extraneous_target_rejected() {
        let mut payload = create_payload("CITY");
        payload.service = Some("service:cleaning".to_string());
        assert_eq!(
            payload.build_scope(),
            Err(ScopeError::ExtraneousTarget {
                field: "service",
                scope: "CITY",
            })
        );

        let mut payload = create_payload("SERVICE");
        payload.service = Some("service:cleaning".to_string());
        payload.product = Some("product:sofa".to_string());
        assert_eq!(
            payload.build_scope(),
            Err(ScopeError::ExtraneousTarget {
                field: "product",
                scope: "SERVICE",
            })
        );
    }

    #[test]
    fn unknown_scope_rejected() {
        let payload = create_payload("NEIGHBOURHOOD");
        assert_eq!(
            payload.build_scope(),
            Err(ScopeError::UnknownScope("NEIGHBOURHOOD".to_string()))
        );
    }

    #[test]
    fn mismatched_table_reference_rejected() {
        let mut payload = create_payload("PRODUCT");
        payload.product = Some("service:cleaning".to_string());
        assert_eq!(
            payload.build_scope(),
            Err(ScopeError::InvalidReference {
                field: "product",
                value: "service:cleaning".to_string(),
            })
        );
    }

    #[test]
    fn bare_target_id_gets_table_prefix() {
        let mut payload = create_payload("SERVICE_CATEGORY");
        payload.service_category = Some("appliances".to_string());
        assert_eq!(
            payload.build_scope(),
            Ok(ProfileScope::ServiceCategory(Thing::from((
                "service_category",
                "appliances"
            ))))
        );
    }

    #[test]
    fn city_scope_serializes_without_target_key() {
        let p = profile(ProfileScope::City);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["scope"], "CITY");
        assert!(json.get("target").is_none());

        let p = profile(ProfileScope::Product(Thing::from(("product", "sofa"))));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["scope"], "PRODUCT");
        assert_eq!(json["target"], "product:sofa");
    }

    #[test]
    fn profile_roundtrips_through_json() {
        let mut p = profile(ProfileScope::Product(Thing::from(("product", "sofa"))));
        p.price_multiplier = 1.25;
        p.express_available = true;
        p.seasonal_note = Some("Monsoon surcharge applies".to_string());
        let json = serde_json::to_string(&p).unwrap();
        let back: LocationProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn scope_change_replaces_target() {
        let existing = profile(ProfileScope::Product(Thing::from(("product", "sofa"))));

        // PRODUCT -> CITY drops the target entirely
        let update = LocationProfileUpdate {
            scope: Some("CITY".to_string()),
            ..empty_update()
        };
        let updated = update.apply_to(&existing).unwrap();
        assert_eq!(updated.scope, ProfileScope::City);
        assert_eq!(updated.scope.target(), None);

        // PRODUCT -> SERVICE must carry the service target
        let update = LocationProfileUpdate {
            scope: Some("SERVICE".to_string()),
            ..empty_update()
        };
        assert_eq!(
            update.apply_to(&existing),
            Err(ScopeError::MissingTarget {
                field: "service",
                scope: "SERVICE",
            })
        );
    }

    #[test]
    fn target_only_update_keeps_scope_kind() {
        let existing = profile(ProfileScope::Product(Thing::from(("product", "sofa"))));
        let update = LocationProfileUpdate {
            product: Some("product:bed".to_string()),
            ..empty_update()
        };
        let updated = update.apply_to(&existing).unwrap();
        assert_eq!(
            updated.scope,
            ProfileScope::Product(Thing::from(("product", "bed")))
        );
    }

    #[test]
    fn untouched_fields_survive_update() {
        let mut existing = profile(ProfileScope::City);
        existing.custom_intro = Some("Rent in Goa".to_string());
        existing.price_multiplier = 1.4;

        let update = LocationProfileUpdate {
            price_multiplier: Some(1.2),
            ..empty_update()
        };
        let updated = update.apply_to(&existing).unwrap();
        assert_eq!(updated.price_multiplier, 1.2);
        assert_eq!(updated.custom_intro.as_deref(), Some("Rent in Goa"));
        assert_eq!(updated.scope, ProfileScope::City);
    }

    fn empty_update() -> LocationProfileUpdate {
        LocationProfileUpdate {
            city: None,
            scope: None,
            product: None,
            service: None,
            product_category: None,
            service_category: None,
            price_multiplier: None,
            demand_level: None,
            custom_intro: None,
            seasonal_note: None,
            delivery_note: None,
            trending_text: None,
            express_available: None,
            seo_title_override: None,
            seo_description_override: None,
            additional_content: None,
        }
    }
}
