//! Product Catalog Handlers
//!
//! 每个请求按顺序执行：校验城市 → 解析档案 → 调整价格。
//! 解析和调整是纯读操作，请求之间无共享可变状态。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{CitySummary, record_id, resolve_active_city};
use crate::core::ServerState;
use crate::db::models::{Product, ScopeKind};
use crate::db::repository::{ProductCategoryRepository, ProductRepository};
use crate::pricing::{EffectiveContent, ProfileResolver, adjust_product, adjust_products};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// City identifier: slug ("goa") or record id ("city:xxx")
    pub city: String,
    /// Optional category slug filter
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub city: CitySummary,
    /// City-wide content block for the listing page, absent without a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<EffectiveContent>,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub city: CitySummary,
    pub product: Product,
    /// Effective content for this (product, city) pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<EffectiveContent>,
}

/// GET /api/catalog/products?city=..&category=.. - 城市调价后的商品列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<AppResponse<ProductListResponse>>> {
    let city = resolve_active_city(&state, &query.city).await?;
    let city_id = record_id(&city.id, "city")?;

    let repo = ProductRepository::new(state.db.clone());
    let products = match &query.category {
        Some(slug) => {
            let category = ProductCategoryRepository::new(state.db.clone())
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Product category {slug} not found")))?;
            let category_id = record_id(&category.id, "product_category")?;
            repo.find_active_by_category(&category_id).await?
        }
        None => repo.find_active().await?,
    };

    let targets: Vec<_> = products.iter().filter_map(|p| p.id.clone()).collect();
    let resolution = ProfileResolver::new(state.db.clone())
        .resolve(&city_id, ScopeKind::Product, &targets)
        .await?;

    let content = resolution.city_wide().map(EffectiveContent::from_profile);
    let products = adjust_products(products, &resolution);

    Ok(ok(ProductListResponse {
        city: CitySummary::from_city(&city),
        content,
        products,
    }))
}

/// GET /api/catalog/products/:id?city=.. - 单个商品的城市调价视图
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<AppResponse<ProductDetailResponse>>> {
    let city = resolve_active_city(&state, &query.city).await?;
    let city_id = record_id(&city.id, "city")?;

    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| AppError::not_found(format!("Product {id} not found")))?;
    let product_id = record_id(&product.id, "product")?;

    let resolution = ProfileResolver::new(state.db.clone())
        .resolve(&city_id, ScopeKind::Product, std::slice::from_ref(&product_id))
        .await?;

    let content = resolution
        .effective_for_product(&product_id)
        .map(EffectiveContent::from_profile);
    let multiplier = resolution.product_multiplier(&product_id);
    let product = adjust_product(product, multiplier);

    Ok(ok(ProductDetailResponse {
        city: CitySummary::from_city(&city),
        product,
        content,
    }))
}
