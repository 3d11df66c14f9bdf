use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::regions::dtos::{RegionDetailDto, RegionInfoDto, RegionResponseDto};
use crate::features::regions::models::Level;
use crate::features::regions::services::RegionService;
use crate::shared::types::{ErrorResponse, ListQuery};

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid id '{}'", raw)))
}

async fn list(
    service: &RegionService,
    level: Level,
    query: &ListQuery,
) -> Result<Json<Vec<RegionResponseDto>>> {
    let items = service
        .list(level, query.search(), query.limit(), query.offset())
        .await?;
    Ok(Json(items))
}

async fn detail(
    service: &RegionService,
    level: Level,
    raw_id: &str,
) -> Result<Json<RegionDetailDto>> {
    // Detail lookups report every failure as a query error, including a malformed id
    let id = raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Query(format!("invalid id '{}' for {}", raw_id, level)))?;
    Ok(Json(service.get_detail(level, id).await?))
}

async fn children(
    service: &RegionService,
    parent: Level,
    raw_id: &str,
) -> Result<Json<Vec<RegionResponseDto>>> {
    let id = parse_id(raw_id)?;
    Ok(Json(service.list_children(parent, id).await?))
}

// ==================== Info Handler ====================

/// Number of regions on every level
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Row counts of every level", body = RegionInfoDto),
        (status = 500, description = "A count failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn get_info(State(service): State<Arc<RegionService>>) -> Result<Json<RegionInfoDto>> {
    Ok(Json(service.info().await?))
}

// ==================== Province Handlers ====================

/// List provinces
#[utoipa::path(
    get,
    path = "/provinsi",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of provinces", body = Vec<RegionResponseDto>),
        (status = 500, description = "Query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_provinces(
    State(service): State<Arc<RegionService>>,
    query: ListQuery,
) -> Result<Json<Vec<RegionResponseDto>>> {
    list(&service, Level::Province, &query).await
}

/// Get a province with its regency, district and village counts
#[utoipa::path(
    get,
    path = "/provinsi/{id}",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Province details", body = RegionDetailDto),
        (status = 500, description = "Unknown or malformed id, or query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn get_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<RegionDetailDto>> {
    detail(&service, Level::Province, &id).await
}

/// List regencies/cities in a province
#[utoipa::path(
    get,
    path = "/provinsi/{id}/kota",
    params(
        ("id" = i64, Path, description = "Province id")
    ),
    responses(
        (status = 200, description = "Regencies in the province", body = Vec<RegionResponseDto>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_regencies_by_province(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RegionResponseDto>>> {
    children(&service, Level::Province, &id).await
}

// ==================== Regency Handlers ====================

/// List regencies/cities
#[utoipa::path(
    get,
    path = "/kota",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of regencies", body = Vec<RegionResponseDto>),
        (status = 500, description = "Query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_regencies(
    State(service): State<Arc<RegionService>>,
    query: ListQuery,
) -> Result<Json<Vec<RegionResponseDto>>> {
    list(&service, Level::Regency, &query).await
}

/// Get a regency/city with its district and village counts
#[utoipa::path(
    get,
    path = "/kota/{id}",
    params(
        ("id" = i64, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Regency details", body = RegionDetailDto),
        (status = 500, description = "Unknown or malformed id, or query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn get_regency(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<RegionDetailDto>> {
    detail(&service, Level::Regency, &id).await
}

/// List districts in a regency/city
#[utoipa::path(
    get,
    path = "/kota/{id}/kecamatan",
    params(
        ("id" = i64, Path, description = "Regency id")
    ),
    responses(
        (status = 200, description = "Districts in the regency", body = Vec<RegionResponseDto>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_districts_by_regency(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RegionResponseDto>>> {
    children(&service, Level::Regency, &id).await
}

// ==================== District Handlers ====================

/// List districts
#[utoipa::path(
    get,
    path = "/kecamatan",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of districts", body = Vec<RegionResponseDto>),
        (status = 500, description = "Query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_districts(
    State(service): State<Arc<RegionService>>,
    query: ListQuery,
) -> Result<Json<Vec<RegionResponseDto>>> {
    list(&service, Level::District, &query).await
}

/// Get a district with its village count
#[utoipa::path(
    get,
    path = "/kecamatan/{id}",
    params(
        ("id" = i64, Path, description = "District id")
    ),
    responses(
        (status = 200, description = "District details", body = RegionDetailDto),
        (status = 500, description = "Unknown or malformed id, or query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn get_district(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<RegionDetailDto>> {
    detail(&service, Level::District, &id).await
}

/// List villages in a district
#[utoipa::path(
    get,
    path = "/kecamatan/{id}/kelurahan",
    params(
        ("id" = i64, Path, description = "District id")
    ),
    responses(
        (status = 200, description = "Villages in the district", body = Vec<RegionResponseDto>),
        (status = 400, description = "Invalid id", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_villages_by_district(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RegionResponseDto>>> {
    children(&service, Level::District, &id).await
}

// ==================== Village Handlers ====================

/// List villages
#[utoipa::path(
    get,
    path = "/kelurahan",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of villages", body = Vec<RegionResponseDto>),
        (status = 500, description = "Query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn list_villages(
    State(service): State<Arc<RegionService>>,
    query: ListQuery,
) -> Result<Json<Vec<RegionResponseDto>>> {
    list(&service, Level::Village, &query).await
}

/// Get a village
#[utoipa::path(
    get,
    path = "/kelurahan/{id}",
    params(
        ("id" = i64, Path, description = "Village id")
    ),
    responses(
        (status = 200, description = "Village details", body = RegionDetailDto),
        (status = 500, description = "Unknown or malformed id, or query failed", body = ErrorResponse)
    ),
    tag = "regions"
)]
pub async fn get_village(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<RegionDetailDto>> {
    detail(&service, Level::Village, &id).await
}
