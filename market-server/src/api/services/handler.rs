//! Service Catalog Handlers
//!
//! 服务与商品走同一个 解析 → 调整 流程，但服务的价格只在
//! SERVICE 作用域档案直接命名它时才调整，不回退到城市级乘数。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{CitySummary, record_id, resolve_active_city};
use crate::core::ServerState;
use crate::db::models::{ScopeKind, Service};
use crate::db::repository::{ServiceCategoryRepository, ServiceRepository};
use crate::pricing::{EffectiveContent, ProfileResolver, adjust_service, adjust_services};
use crate::utils::{AppError, AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// City identifier: slug ("goa") or record id ("city:xxx")
    pub city: String,
    /// Optional category slug filter
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    pub city: CitySummary,
    /// City-wide content block for the listing page, absent without a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<EffectiveContent>,
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
pub struct ServiceDetailResponse {
    pub city: CitySummary,
    pub service: Service,
    /// Effective content; only a SERVICE-scope profile naming this service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<EffectiveContent>,
}

/// GET /api/catalog/services?city=..&category=.. - 城市调价后的服务列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<AppResponse<ServiceListResponse>>> {
    let city = resolve_active_city(&state, &query.city).await?;
    let city_id = record_id(&city.id, "city")?;

    let repo = ServiceRepository::new(state.db.clone());
    let services = match &query.category {
        Some(slug) => {
            let category = ServiceCategoryRepository::new(state.db.clone())
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Service category {slug} not found")))?;
            let category_id = record_id(&category.id, "service_category")?;
            repo.find_active_by_category(&category_id).await?
        }
        None => repo.find_active().await?,
    };

    let targets: Vec<_> = services.iter().filter_map(|s| s.id.clone()).collect();
    let resolution = ProfileResolver::new(state.db.clone())
        .resolve(&city_id, ScopeKind::Service, &targets)
        .await?;

    let content = resolution.city_wide().map(EffectiveContent::from_profile);
    let services = adjust_services(services, &resolution);

    Ok(ok(ServiceListResponse {
        city: CitySummary::from_city(&city),
        content,
        services,
    }))
}

/// GET /api/catalog/services/:id?city=.. - 单个服务的城市调价视图
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<AppResponse<ServiceDetailResponse>>> {
    let city = resolve_active_city(&state, &query.city).await?;
    let city_id = record_id(&city.id, "city")?;

    let service = ServiceRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))?;
    let service_id = record_id(&service.id, "service")?;

    let resolution = ProfileResolver::new(state.db.clone())
        .resolve(&city_id, ScopeKind::Service, std::slice::from_ref(&service_id))
        .await?;

    let content = resolution
        .effective_for_service(&service_id)
        .map(EffectiveContent::from_profile);
    let multiplier = resolution.service_multiplier(&service_id);
    let service = adjust_service(service, multiplier);

    Ok(ok(ServiceDetailResponse {
        city: CitySummary::from_city(&city),
        service,
        content,
    }))
}
