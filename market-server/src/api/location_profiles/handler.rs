//! Location Profile API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{
    LocationProfile, LocationProfileCreate, LocationProfileUpdate, ScopeKind, parse_ref,
};
use crate::db::repository::{LocationProfileRepository, ProfileFilter};
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_NOTE_LEN, MAX_SEO_DESCRIPTION_LEN, MAX_SEO_TITLE_LEN,
    validate_multiplier, validate_optional_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// List query: all filters optional and combinable
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// City record id ("city:xxx")
    pub city: Option<String>,
    /// Scope tag: CITY | PRODUCT | SERVICE | PRODUCT_CATEGORY | SERVICE_CATEGORY
    pub scope: Option<String>,
    /// Product record id, implies scope = PRODUCT
    pub product: Option<String>,
    /// Service record id, implies scope = SERVICE
    pub service: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Paginated list response
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<LocationProfile>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// GET /api/location-profiles - 档案列表，支持过滤和分页
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<ProfileListResponse>>> {
    let mut filter = ProfileFilter::default();
    if let Some(city) = &query.city {
        filter.city = Some(parse_ref("city", "city", city)?);
    }
    if let Some(scope) = &query.scope {
        filter.scope = Some(ScopeKind::parse(scope)?);
    }
    if let Some(product) = &query.product {
        filter.product = Some(parse_ref("product", "product", product)?);
    }
    if let Some(service) = &query.service {
        filter.service = Some(parse_ref("service", "service", service)?);
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let repo = LocationProfileRepository::new(state.db.clone());
    let (profiles, total) = repo.list(&filter, page, limit).await?;

    Ok(ok(ProfileListResponse {
        profiles,
        total,
        page,
        limit,
    }))
}

/// GET /api/location-profiles/:id - 获取单个档案
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<LocationProfile>> {
    let repo = LocationProfileRepository::new(state.db.clone());
    let profile = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location profile {id} not found")))?;
    Ok(Json(profile))
}

/// POST /api/location-profiles - 创建档案
///
/// 授权是上游前置条件。唯一性由存储层唯一索引保证，
/// 冲突以 409 返回，客户端应改为编辑已有档案。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LocationProfileCreate>,
) -> AppResult<Json<LocationProfile>> {
    validate_multiplier(payload.price_multiplier)?;
    validate_content_fields(
        &payload.custom_intro,
        &payload.seasonal_note,
        &payload.delivery_note,
        &payload.trending_text,
        &payload.seo_title_override,
        &payload.seo_description_override,
        &payload.additional_content,
    )?;

    let repo = LocationProfileRepository::new(state.db.clone());
    let profile = repo.create(payload).await?;

    tracing::info!(
        target: "location_profile",
        id = %profile.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        city = %profile.city,
        scope = profile.scope.kind().as_str(),
        "Location profile created"
    );

    Ok(Json(profile))
}

/// PUT /api/location-profiles/:id - 更新档案
///
/// 作用域变更整体替换目标（和类型让旧目标无处残留）。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LocationProfileUpdate>,
) -> AppResult<Json<LocationProfile>> {
    validate_multiplier(payload.price_multiplier)?;
    validate_content_fields(
        &payload.custom_intro,
        &payload.seasonal_note,
        &payload.delivery_note,
        &payload.trending_text,
        &payload.seo_title_override,
        &payload.seo_description_override,
        &payload.additional_content,
    )?;

    let repo = LocationProfileRepository::new(state.db.clone());
    let profile = repo.update(&id, payload).await?;

    tracing::info!(
        target: "location_profile",
        id = %id,
        scope = profile.scope.kind().as_str(),
        "Location profile updated"
    );

    Ok(Json(profile))
}

/// DELETE /api/location-profiles/:id - 删除档案 (硬删除)
///
/// 没有解析缓存，删除对下一次目录读取立即可见。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = LocationProfileRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;

    if deleted {
        tracing::info!(target: "location_profile", id = %id, "Location profile deleted");
    }

    Ok(Json(deleted))
}

/// Field-level length checks shared by create and update
#[allow(clippy::too_many_arguments)]
fn validate_content_fields(
    custom_intro: &Option<String>,
    seasonal_note: &Option<String>,
    delivery_note: &Option<String>,
    trending_text: &Option<String>,
    seo_title: &Option<String>,
    seo_description: &Option<String>,
    additional_content: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(custom_intro, "custom_intro", MAX_CONTENT_LEN)?;
    validate_optional_text(seasonal_note, "seasonal_note", MAX_NOTE_LEN)?;
    validate_optional_text(delivery_note, "delivery_note", MAX_NOTE_LEN)?;
    validate_optional_text(trending_text, "trending_text", MAX_NOTE_LEN)?;
    validate_optional_text(seo_title, "seo_title_override", MAX_SEO_TITLE_LEN)?;
    validate_optional_text(
        seo_description,
        "seo_description_override",
        MAX_SEO_DESCRIPTION_LEN,
    )?;
    validate_optional_text(additional_content, "additional_content", MAX_CONTENT_LEN)?;
    Ok(())
}
