//! Pricing Adjuster
//!
//! Applies a resolved multiplier to an entity's pricing fields.
//! Uses rust_decimal for the multiplication, stores whole rupee amounts.
//!
//! Each field is multiplied and rounded independently (half-up). Rounded
//! min/max can therefore drift from the exact multiplier ratio; that drift
//! is accepted, reproducible behavior and must not be "corrected".

use rust_decimal::prelude::*;

use crate::db::models::{Product, Service};

use super::resolver::ResolvedProfiles;

/// Convert f64 multiplier to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Multiply a rupee amount, rounding half-up to the nearest whole rupee
fn apply_multiplier(amount: i64, multiplier: f64) -> i64 {
    (Decimal::from(amount) * to_decimal(multiplier))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Format a rupee amount with en-IN digit grouping (12,34,567)
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();

    if digits.len() > 3 {
        let (head, tail) = digits.split_at(digits.len() - 3);
        // head in groups of two, right to left
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        grouped.push_str(&groups.join(","));
        grouped.push(',');
        grouped.push_str(tail);
    } else {
        grouped.push_str(&digits);
    }

    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Adjust a single product for an effective multiplier.
///
/// Multiplier 1 is an identity fast path: the product is returned unchanged.
/// Deposit and service charge count as 0 when absent.
pub fn adjust_product(product: Product, multiplier: f64) -> Product {
    if multiplier == 1.0 {
        return product;
    }

    let mut adjusted = product;
    adjusted.min_price = apply_multiplier(adjusted.min_price, multiplier);
    adjusted.max_price = apply_multiplier(adjusted.max_price, multiplier);
    if let Some(discounted) = adjusted.discounted_price {
        adjusted.discounted_price = Some(apply_multiplier(discounted, multiplier));
    }
    adjusted.security_deposit = Some(apply_multiplier(
        adjusted.security_deposit.unwrap_or(0),
        multiplier,
    ));
    adjusted.service_charge = Some(apply_multiplier(
        adjusted.service_charge.unwrap_or(0),
        multiplier,
    ));
    adjusted
}

/// Adjust a single service for an effective multiplier.
///
/// The display label is regenerated only when the pricing record carries an
/// amount; a missing pricing record passes through untouched.
pub fn adjust_service(service: Service, multiplier: f64) -> Service {
    if multiplier == 1.0 {
        return service;
    }

    let mut adjusted = service;
    if let Some(pricing) = adjusted.pricing.as_mut()
        && let Some(amount) = pricing.amount
    {
        let new_amount = apply_multiplier(amount, multiplier);
        pricing.amount = Some(new_amount);
        pricing.label = Some(format!("Starting from ₹{}", format_inr(new_amount)));
    }
    adjusted
}

/// Adjust a batch of products against a resolution
pub fn adjust_products(products: Vec<Product>, resolution: &ResolvedProfiles) -> Vec<Product> {
    products
        .into_iter()
        .map(|product| {
            let multiplier = product
                .id
                .as_ref()
                .map(|id| resolution.product_multiplier(id))
                .unwrap_or(1.0);
            adjust_product(product, multiplier)
        })
        .collect()
}

/// Adjust a batch of services against a resolution
pub fn adjust_services(services: Vec<Service>, resolution: &ResolvedProfiles) -> Vec<Service> {
    services
        .into_iter()
        .map(|service| {
            let multiplier = service
                .id
                .as_ref()
                .map(|id| resolution.service_multiplier(id))
                .unwrap_or(1.0);
            adjust_service(service, multiplier)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ServicePricing;
    use surrealdb::sql::Thing;

    fn make_product(min_price: i64, max_price: i64) -> Product {
        Product::new(
            "Queen Bed",
            "queen-bed",
            Thing::from(("product_category", "furniture")),
            min_price,
            max_price,
        )
    }

    fn make_service(amount: Option<i64>) -> Service {
        let mut service = Service::new(
            "Deep Cleaning",
            "deep-cleaning",
            Thing::from(("service_category", "cleaning")),
        );
        service.pricing = Some(ServicePricing {
            amount,
            label: amount.map(|a| format!("Starting from ₹{}", format_inr(a))),
        });
        service
    }

    #[test]
    fn multiplier_one_is_identity() {
        let product = make_product(100, 333);
        let adjusted = adjust_product(product.clone(), 1.0);
        assert_eq!(adjusted, product);

        let service = make_service(Some(999));
        let adjusted = adjust_service(service.clone(), 1.0);
        assert_eq!(adjusted, service);
    }

    #[test]
    fn fields_round_independently_half_up() {
        // 100 * 1.15 = 115 exactly; 333 * 1.15 = 382.95 -> 383
        let adjusted = adjust_product(make_product(100, 333), 1.15);
        assert_eq!(adjusted.min_price, 115);
        assert_eq!(adjusted.max_price, 383);
    }

    #[test]
    fn midpoint_rounds_up() {
        // 50 * 1.05 = 52.5 -> 53
        let adjusted = adjust_product(make_product(50, 50), 1.05);
        assert_eq!(adjusted.min_price, 53);
    }

    #[test]
    fn discounted_price_adjusted_only_when_present() {
        let mut product = make_product(1000, 2000);
        product.discounted_price = None;
        let adjusted = adjust_product(product, 1.2);
        assert_eq!(adjusted.discounted_price, None);

        let mut product = make_product(1000, 2000);
        product.discounted_price = Some(900);
        let adjusted = adjust_product(product, 1.2);
        assert_eq!(adjusted.discounted_price, Some(1080));
    }

    #[test]
    fn absent_deposit_and_charge_count_as_zero() {
        let adjusted = adjust_product(make_product(1000, 2000), 2.0);
        assert_eq!(adjusted.security_deposit, Some(0));
        assert_eq!(adjusted.service_charge, Some(0));

        let mut product = make_product(1000, 2000);
        product.security_deposit = Some(2500);
        product.service_charge = Some(149);
        let adjusted = adjust_product(product, 1.1);
        assert_eq!(adjusted.security_deposit, Some(2750));
        // 149 * 1.1 = 163.9 -> 164
        assert_eq!(adjusted.service_charge, Some(164));
    }

    #[test]
    fn service_amount_and_label_regenerated() {
        let adjusted = adjust_service(make_service(Some(1500)), 2.0);
        let pricing = adjusted.pricing.unwrap();
        assert_eq!(pricing.amount, Some(3000));
        assert_eq!(pricing.label.as_deref(), Some("Starting from ₹3,000"));
    }

    #[test]
    fn service_without_amount_keeps_label() {
        let mut service = make_service(None);
        service.pricing.as_mut().unwrap().label = Some("Price on request".to_string());
        let adjusted = adjust_service(service, 2.0);
        let pricing = adjusted.pricing.unwrap();
        assert_eq!(pricing.amount, None);
        assert_eq!(pricing.label.as_deref(), Some("Price on request"));
    }

    #[test]
    fn service_without_pricing_record_passes_through() {
        let mut service = make_service(None);
        service.pricing = None;
        let adjusted = adjust_service(service.clone(), 1.5);
        assert_eq!(adjusted, service);
    }

    #[test]
    fn inr_grouping() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(1234), "1,234");
        assert_eq!(format_inr(12345), "12,345");
        assert_eq!(format_inr(123456), "1,23,456");
        assert_eq!(format_inr(1234567), "12,34,567");
        assert_eq!(format_inr(123456789), "12,34,56,789");
        assert_eq!(format_inr(-54321), "-54,321");
    }

    #[test]
    fn batch_adjustment_uses_per_entity_multiplier() {
        use crate::db::models::{DemandLevel, LocationProfile, ProfileScope};

        let mut sofa = make_product(1000, 3000);
        sofa.id = Some(Thing::from(("product", "sofa")));
        let mut bed = make_product(2000, 4000);
        bed.id = Some(Thing::from(("product", "bed")));

        let profile = |scope, multiplier| LocationProfile {
            id: None,
            city: Thing::from(("city", "goa")),
            scope,
            price_multiplier: multiplier,
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
        };

        let resolution = ResolvedProfiles::from_profiles(vec![
            profile(ProfileScope::City, 2.0),
            profile(ProfileScope::Product(Thing::from(("product", "sofa"))), 1.5),
        ]);

        let adjusted = adjust_products(vec![sofa, bed], &resolution);
        // sofa gets its own 1.5, bed falls back to the city-wide 2.0
        assert_eq!(adjusted[0].min_price, 1500);
        assert_eq!(adjusted[1].min_price, 4000);
    }
}
