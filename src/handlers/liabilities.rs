use crate::helpers::parse::{parse_include_toggle, parse_scenario_tag, scenario_condition};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use compute::ScenarioFilter;
use model::entities::liability;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating a liability
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLiabilityRequest {
    /// Planner this liability belongs to
    pub planner_id: i32,
    /// Name of the liability (e.g., "Mortgage")
    pub name: String,
    /// Include toggle: "on" or "off" (default "on")
    pub include_toggle: Option<String>,
    /// Scenario tag: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
    /// Monthly cost of servicing the liability
    pub monthly_cost: Decimal,
    /// Outstanding principal (treated as 0 when absent)
    pub principal: Option<Decimal>,
    /// Asset this liability is attached to (e.g., the mortgaged house)
    pub linked_asset_id: Option<i32>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Request body for updating a liability
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLiabilityRequest {
    pub name: Option<String>,
    pub include_toggle: Option<String>,
    pub scenario: Option<String>,
    pub monthly_cost: Option<Decimal>,
    pub principal: Option<Decimal>,
    pub linked_asset_id: Option<i32>,
    pub notes: Option<String>,
}

/// Liability response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LiabilityResponse {
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: String,
    pub scenario: String,
    pub monthly_cost: Decimal,
    pub principal: Option<Decimal>,
    pub linked_asset_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<liability::Model> for LiabilityResponse {
    fn from(model: liability::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            name: model.name,
            include_toggle: model.include_toggle.to_string(),
            scenario: model.scenario,
            monthly_cost: model.monthly_cost,
            principal: model.principal,
            linked_asset_id: model.linked_asset_id,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing liabilities
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListLiabilitiesQuery {
    /// Planner to list liabilities for
    pub planner_id: i32,
    /// Scenario filter: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
}

fn validation_error(message: String) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Validation failed: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

fn liability_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "LIABILITY_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new liability
#[utoipa::path(
    post,
    path = "/api/v1/liabilities",
    request_body = CreateLiabilityRequest,
    responses(
        (status = 201, description = "Liability created successfully", body = LiabilityResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "liabilities"
)]
#[instrument(skip(state))]
pub async fn create_liability(
    State(state): State<AppState>,
    Json(request): Json<CreateLiabilityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LiabilityResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_liability function");
    debug!("Creating liability: {:?}", request);

    let db = &state.db;

    let include_toggle = parse_include_toggle(request.include_toggle).map_err(validation_error)?;
    let scenario = parse_scenario_tag(request.scenario).map_err(validation_error)?;

    let now = chrono::Utc::now().naive_utc();
    let liability = liability::ActiveModel {
        planner_id: Set(request.planner_id),
        name: Set(request.name),
        include_toggle: Set(include_toggle),
        scenario: Set(scenario),
        monthly_cost: Set(request.monthly_cost),
        principal: Set(request.principal),
        linked_asset_id: Set(request.linked_asset_id),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = liability.insert(db).await.map_err(|e| {
        error!("Failed to create liability: {}", e);
        liability_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create liability: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Liability created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Liability created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all liabilities for a planner
#[utoipa::path(
    get,
    path = "/api/v1/liabilities",
    params(ListLiabilitiesQuery),
    responses(
        (status = 200, description = "List of liabilities", body = Vec<LiabilityResponse>),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "liabilities"
)]
#[instrument(skip(state))]
pub async fn get_liabilities(
    State(state): State<AppState>,
    Query(query): Query<ListLiabilitiesQuery>,
) -> Result<Json<ApiResponse<Vec<LiabilityResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_liabilities function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| validation_error(e.to_string()))?;

    let mut condition = Condition::all().add(liability::Column::PlannerId.eq(query.planner_id));
    if let Some(scenario_cond) = scenario_condition(liability::Column::Scenario, &filter) {
        condition = condition.add(scenario_cond);
    }

    let liabilities = liability::Entity::find()
        .filter(condition)
        .order_by_asc(liability::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch liabilities: {}", e);
            liability_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch liabilities: {}", e),
            )
        })?;

    let responses: Vec<LiabilityResponse> = liabilities.into_iter().map(|l| l.into()).collect();

    info!("Fetched {} liabilities", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Liabilities retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific liability by ID
#[utoipa::path(
    get,
    path = "/api/v1/liabilities/{liability_id}",
    params(
        ("liability_id" = i32, Path, description = "Liability ID")
    ),
    responses(
        (status = 200, description = "Liability details", body = LiabilityResponse),
        (status = 404, description = "Liability not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "liabilities"
)]
#[instrument(skip(state))]
pub async fn get_liability(
    State(state): State<AppState>,
    Path(liability_id): Path<i32>,
) -> Result<Json<ApiResponse<LiabilityResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_liability function");
    debug!("Fetching liability with id: {}", liability_id);

    let db = &state.db;

    let liability = liability::Entity::find_by_id(liability_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch liability: {}", e);
            liability_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch liability: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Liability not found: id={}", liability_id);
            liability_error(
                StatusCode::NOT_FOUND,
                format!("Liability with id {} not found", liability_id),
            )
        })?;

    info!("Liability fetched successfully: id={}", liability_id);
    Ok(Json(ApiResponse {
        data: liability.into(),
        message: "Liability retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update a liability
#[utoipa::path(
    put,
    path = "/api/v1/liabilities/{liability_id}",
    params(
        ("liability_id" = i32, Path, description = "Liability ID")
    ),
    request_body = UpdateLiabilityRequest,
    responses(
        (status = 200, description = "Liability updated successfully", body = LiabilityResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Liability not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "liabilities"
)]
#[instrument(skip(state))]
pub async fn update_liability(
    State(state): State<AppState>,
    Path(liability_id): Path<i32>,
    Json(request): Json<UpdateLiabilityRequest>,
) -> Result<Json<ApiResponse<LiabilityResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_liability function");
    debug!("Updating liability {}: {:?}", liability_id, request);

    let db = &state.db;

    let liability = liability::Entity::find_by_id(liability_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch liability: {}", e);
            liability_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch liability: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Liability not found: id={}", liability_id);
            liability_error(
                StatusCode::NOT_FOUND,
                format!("Liability with id {} not found", liability_id),
            )
        })?;

    let mut active_model: liability::ActiveModel = liability.into();
    if let Some(name) = request.name {
        active_model.name = Set(name);
    }
    if request.include_toggle.is_some() {
        let toggle = parse_include_toggle(request.include_toggle).map_err(validation_error)?;
        active_model.include_toggle = Set(toggle);
    }
    if request.scenario.is_some() {
        let scenario = parse_scenario_tag(request.scenario).map_err(validation_error)?;
        active_model.scenario = Set(scenario);
    }
    if let Some(monthly_cost) = request.monthly_cost {
        active_model.monthly_cost = Set(monthly_cost);
    }
    if let Some(principal) = request.principal {
        active_model.principal = Set(Some(principal));
    }
    if let Some(linked_asset_id) = request.linked_asset_id {
        active_model.linked_asset_id = Set(Some(linked_asset_id));
    }
    if let Some(notes) = request.notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update liability: {}", e);
        liability_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update liability: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Liability updated successfully: id={}", liability_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Liability updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a liability
#[utoipa::path(
    delete,
    path = "/api/v1/liabilities/{liability_id}",
    params(
        ("liability_id" = i32, Path, description = "Liability ID")
    ),
    responses(
        (status = 204, description = "Liability deleted successfully"),
        (status = 404, description = "Liability not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "liabilities"
)]
#[instrument(skip(state))]
pub async fn delete_liability(
    State(state): State<AppState>,
    Path(liability_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_liability function");
    debug!("Deleting liability: id={}", liability_id);

    let db = &state.db;

    let liability = liability::Entity::find_by_id(liability_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch liability: {}", e);
            liability_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch liability: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Liability not found: id={}", liability_id);
            liability_error(
                StatusCode::NOT_FOUND,
                format!("Liability with id {} not found", liability_id),
            )
        })?;

    liability.delete(db).await.map_err(|e| {
        error!("Failed to delete liability: {}", e);
        liability_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete liability: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Liability deleted successfully: id={}", liability_id);
    Ok(StatusCode::NO_CONTENT)
}
