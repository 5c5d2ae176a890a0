use crate::helpers::parse::{parse_include_toggle, parse_scenario_tag, scenario_condition};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use compute::ScenarioFilter;
use model::entities::income;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating an income record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateIncomeRequest {
    /// Planner this income belongs to
    pub planner_id: i32,
    /// Name of the income source (e.g., "Salary")
    pub name: String,
    /// Include toggle: "on" or "off" (default "on")
    pub include_toggle: Option<String>,
    /// Scenario tag: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
    /// Monthly amount received
    pub monthly_amount: Decimal,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Request body for updating an income record
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateIncomeRequest {
    pub name: Option<String>,
    pub include_toggle: Option<String>,
    pub scenario: Option<String>,
    pub monthly_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Income response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncomeResponse {
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: String,
    pub scenario: String,
    pub monthly_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<income::Model> for IncomeResponse {
    fn from(model: income::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            name: model.name,
            include_toggle: model.include_toggle.to_string(),
            scenario: model.scenario,
            monthly_amount: model.monthly_amount,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing income records
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListIncomeQuery {
    /// Planner to list income for
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

fn income_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "INCOME_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new income record
#[utoipa::path(
    post,
    path = "/api/v1/income",
    request_body = CreateIncomeRequest,
    responses(
        (status = 201, description = "Income created successfully", body = IncomeResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state))]
pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncomeResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_income function");
    debug!("Creating income: {:?}", request);

    let db = &state.db;

    let include_toggle = parse_include_toggle(request.include_toggle).map_err(validation_error)?;
    let scenario = parse_scenario_tag(request.scenario).map_err(validation_error)?;

    let now = chrono::Utc::now().naive_utc();
    let income = income::ActiveModel {
        planner_id: Set(request.planner_id),
        name: Set(request.name),
        include_toggle: Set(include_toggle),
        scenario: Set(scenario),
        monthly_amount: Set(request.monthly_amount),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = income.insert(db).await.map_err(|e| {
        error!("Failed to create income: {}", e);
        income_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create income: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Income created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Income created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all income records for a planner
#[utoipa::path(
    get,
    path = "/api/v1/income",
    params(ListIncomeQuery),
    responses(
        (status = 200, description = "List of income records", body = Vec<IncomeResponse>),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state))]
pub async fn get_incomes(
    State(state): State<AppState>,
    Query(query): Query<ListIncomeQuery>,
) -> Result<Json<ApiResponse<Vec<IncomeResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_incomes function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| validation_error(e.to_string()))?;

    let mut condition = Condition::all().add(income::Column::PlannerId.eq(query.planner_id));
    if let Some(scenario_cond) = scenario_condition(income::Column::Scenario, &filter) {
        condition = condition.add(scenario_cond);
    }

    let incomes = income::Entity::find()
        .filter(condition)
        .order_by_asc(income::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch income records: {}", e);
            income_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch income records: {}", e),
            )
        })?;

    let responses: Vec<IncomeResponse> = incomes.into_iter().map(|i| i.into()).collect();

    info!("Fetched {} income records", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Income records retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific income record by ID
#[utoipa::path(
    get,
    path = "/api/v1/income/{income_id}",
    params(
        ("income_id" = i32, Path, description = "Income ID")
    ),
    responses(
        (status = 200, description = "Income details", body = IncomeResponse),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state))]
pub async fn get_income(
    State(state): State<AppState>,
    Path(income_id): Path<i32>,
) -> Result<Json<ApiResponse<IncomeResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_income function");
    debug!("Fetching income with id: {}", income_id);

    let db = &state.db;

    let income = income::Entity::find_by_id(income_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch income: {}", e);
            income_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch income: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Income not found: id={}", income_id);
            income_error(
                StatusCode::NOT_FOUND,
                format!("Income with id {} not found", income_id),
            )
        })?;

    info!("Income fetched successfully: id={}", income_id);
    Ok(Json(ApiResponse {
        data: income.into(),
        message: "Income retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update an income record
#[utoipa::path(
    put,
    path = "/api/v1/income/{income_id}",
    params(
        ("income_id" = i32, Path, description = "Income ID")
    ),
    request_body = UpdateIncomeRequest,
    responses(
        (status = 200, description = "Income updated successfully", body = IncomeResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state))]
pub async fn update_income(
    State(state): State<AppState>,
    Path(income_id): Path<i32>,
    Json(request): Json<UpdateIncomeRequest>,
) -> Result<Json<ApiResponse<IncomeResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_income function");
    debug!("Updating income {}: {:?}", income_id, request);

    let db = &state.db;

    let income = income::Entity::find_by_id(income_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch income: {}", e);
            income_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch income: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Income not found: id={}", income_id);
            income_error(
                StatusCode::NOT_FOUND,
                format!("Income with id {} not found", income_id),
            )
        })?;

    let mut active_model: income::ActiveModel = income.into();
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
    if let Some(monthly_amount) = request.monthly_amount {
        active_model.monthly_amount = Set(monthly_amount);
    }
    if let Some(notes) = request.notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update income: {}", e);
        income_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update income: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Income updated successfully: id={}", income_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Income updated successfully".to_string(),
        success: true,
    }))
}

/// Delete an income record
#[utoipa::path(
    delete,
    path = "/api/v1/income/{income_id}",
    params(
        ("income_id" = i32, Path, description = "Income ID")
    ),
    responses(
        (status = 204, description = "Income deleted successfully"),
        (status = 404, description = "Income not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "income"
)]
#[instrument(skip(state))]
pub async fn delete_income(
    State(state): State<AppState>,
    Path(income_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_income function");
    debug!("Deleting income: id={}", income_id);

    let db = &state.db;

    let income = income::Entity::find_by_id(income_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch income: {}", e);
            income_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch income: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Income not found: id={}", income_id);
            income_error(
                StatusCode::NOT_FOUND,
                format!("Income with id {} not found", income_id),
            )
        })?;

    income.delete(db).await.map_err(|e| {
        error!("Failed to delete income: {}", e);
        income_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete income: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Income deleted successfully: id={}", income_id);
    Ok(StatusCode::NO_CONTENT)
}
