use crate::helpers::parse::{parse_include_toggle, parse_scenario_tag, scenario_condition};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use compute::ScenarioFilter;
use model::entities::asset;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating an asset
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateAssetRequest {
    /// Planner this asset belongs to
    pub planner_id: i32,
    /// Name of the asset (e.g., "House")
    pub name: String,
    /// Include toggle: "on" or "off" (default "on")
    pub include_toggle: Option<String>,
    /// Scenario tag: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
    /// Total value realized when the asset is sold
    pub sale_value: Decimal,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Request body for updating an asset
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub include_toggle: Option<String>,
    pub scenario: Option<String>,
    pub sale_value: Option<Decimal>,
    pub notes: Option<String>,
}

/// Asset response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetResponse {
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: String,
    pub scenario: String,
    pub sale_value: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<asset::Model> for AssetResponse {
    fn from(model: asset::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            name: model.name,
            include_toggle: model.include_toggle.to_string(),
            scenario: model.scenario,
            sale_value: model.sale_value,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing assets
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListAssetsQuery {
    /// Planner to list assets for
    pub planner_id: i32,
    /// Scenario filter: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
}

/// Create a new asset
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    request_body = CreateAssetRequest,
    responses(
        (status = 201, description = "Asset created successfully", body = AssetResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "assets"
)]
#[instrument(skip(state))]
pub async fn create_asset(
    State(state): State<AppState>,
    Json(request): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssetResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_asset function");
    debug!("Creating asset: {:?}", request);

    let db = &state.db;

    let include_toggle = parse_include_toggle(request.include_toggle).map_err(|e| {
        warn!("Invalid include toggle: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e,
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    let scenario = parse_scenario_tag(request.scenario).map_err(|e| {
        warn!("Invalid scenario tag: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e,
                code: "VALIDATION_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    let now = chrono::Utc::now().naive_utc();
    let asset = asset::ActiveModel {
        planner_id: Set(request.planner_id),
        name: Set(request.name),
        include_toggle: Set(include_toggle),
        scenario: Set(scenario),
        sale_value: Set(request.sale_value),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = asset.insert(db).await.map_err(|e| {
        error!("Failed to create asset: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create asset: {}", e),
                code: "ASSET_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    state.cache.invalidate_all();

    info!("Asset created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Asset created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all assets for a planner
///
/// A scenario filter keeps assets tagged with that code or with `ALL`.
/// Toggled-off assets are returned too; only the totals skip them.
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    params(ListAssetsQuery),
    responses(
        (status = 200, description = "List of assets", body = Vec<AssetResponse>),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "assets"
)]
#[instrument(skip(state))]
pub async fn get_assets(
    State(state): State<AppState>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<ApiResponse<Vec<AssetResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_assets function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| {
            warn!("Invalid scenario filter: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    let mut condition = Condition::all().add(asset::Column::PlannerId.eq(query.planner_id));
    if let Some(scenario_cond) = scenario_condition(asset::Column::Scenario, &filter) {
        condition = condition.add(scenario_cond);
    }

    let assets = asset::Entity::find()
        .filter(condition)
        .order_by_asc(asset::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch assets: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch assets: {}", e),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    let responses: Vec<AssetResponse> = assets.into_iter().map(|a| a.into()).collect();

    info!("Fetched {} assets", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Assets retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific asset by ID
#[utoipa::path(
    get,
    path = "/api/v1/assets/{asset_id}",
    params(
        ("asset_id" = i32, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Asset details", body = AssetResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "assets"
)]
#[instrument(skip(state))]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<i32>,
) -> Result<Json<ApiResponse<AssetResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_asset function");
    debug!("Fetching asset with id: {}", asset_id);

    let db = &state.db;

    let asset = asset::Entity::find_by_id(asset_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch asset: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch asset: {}", e),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            warn!("Asset not found: id={}", asset_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Asset with id {} not found", asset_id),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    info!("Asset fetched successfully: id={}", asset_id);
    Ok(Json(ApiResponse {
        data: asset.into(),
        message: "Asset retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/api/v1/assets/{asset_id}",
    params(
        ("asset_id" = i32, Path, description = "Asset ID")
    ),
    request_body = UpdateAssetRequest,
    responses(
        (status = 200, description = "Asset updated successfully", body = AssetResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "assets"
)]
#[instrument(skip(state))]
pub async fn update_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<i32>,
    Json(request): Json<UpdateAssetRequest>,
) -> Result<Json<ApiResponse<AssetResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_asset function");
    debug!("Updating asset {}: {:?}", asset_id, request);

    let db = &state.db;

    let asset = asset::Entity::find_by_id(asset_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch asset: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch asset: {}", e),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            warn!("Asset not found: id={}", asset_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Asset with id {} not found", asset_id),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    let mut active_model: asset::ActiveModel = asset.into();
    if let Some(name) = request.name {
        active_model.name = Set(name);
    }
    if request.include_toggle.is_some() {
        let toggle = parse_include_toggle(request.include_toggle).map_err(|e| {
            warn!("Invalid include toggle: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e,
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;
        active_model.include_toggle = Set(toggle);
    }
    if request.scenario.is_some() {
        let scenario = parse_scenario_tag(request.scenario).map_err(|e| {
            warn!("Invalid scenario tag: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e,
                    code: "VALIDATION_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;
        active_model.scenario = Set(scenario);
    }
    if let Some(sale_value) = request.sale_value {
        active_model.sale_value = Set(sale_value);
    }
    if let Some(notes) = request.notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update asset: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to update asset: {}", e),
                code: "ASSET_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    state.cache.invalidate_all();

    info!("Asset updated successfully: id={}", asset_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Asset updated successfully".to_string(),
        success: true,
    }))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{asset_id}",
    params(
        ("asset_id" = i32, Path, description = "Asset ID")
    ),
    responses(
        (status = 204, description = "Asset deleted successfully"),
        (status = 404, description = "Asset not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "assets"
)]
#[instrument(skip(state))]
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_asset function");
    debug!("Deleting asset: id={}", asset_id);

    let db = &state.db;

    let asset = asset::Entity::find_by_id(asset_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch asset: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch asset: {}", e),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            warn!("Asset not found: id={}", asset_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Asset with id {} not found", asset_id),
                    code: "ASSET_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    asset.delete(db).await.map_err(|e| {
        error!("Failed to delete asset: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete asset: {}", e),
                code: "ASSET_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    state.cache.invalidate_all();

    info!("Asset deleted successfully: id={}", asset_id);
    Ok(StatusCode::NO_CONTENT)
}
