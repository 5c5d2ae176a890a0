use crate::helpers::parse::{parse_include_toggle, parse_scenario_tag, scenario_condition};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use compute::ScenarioFilter;
use model::entities::expense;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating an expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// Planner this expense belongs to
    pub planner_id: i32,
    /// Name of the expense (e.g., "Groceries")
    pub name: String,
    /// Include toggle: "on" or "off" (default "on")
    pub include_toggle: Option<String>,
    /// Scenario tag: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
    /// Monthly amount spent
    pub monthly_amount: Decimal,
    /// Optional expense category
    pub category_id: Option<i32>,
    /// Asset this expense is tied to (silenced when the asset is off)
    pub linked_asset_id: Option<i32>,
    /// Liability this expense is tied to (silenced when the liability is off)
    pub linked_liability_id: Option<i32>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Request body for updating an expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub include_toggle: Option<String>,
    pub scenario: Option<String>,
    pub monthly_amount: Option<Decimal>,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
}

/// Expense response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: String,
    pub scenario: String,
    pub monthly_amount: Decimal,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            name: model.name,
            include_toggle: model.include_toggle.to_string(),
            scenario: model.scenario,
            monthly_amount: model.monthly_amount,
            category_id: model.category_id,
            linked_asset_id: model.linked_asset_id,
            linked_liability_id: model.linked_liability_id,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing expenses
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListExpensesQuery {
    /// Planner to list expenses for
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

fn expense_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "EXPENSE_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created successfully", body = ExpenseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_expense function");
    debug!("Creating expense: {:?}", request);

    let db = &state.db;

    let include_toggle = parse_include_toggle(request.include_toggle).map_err(validation_error)?;
    let scenario = parse_scenario_tag(request.scenario).map_err(validation_error)?;

    let now = chrono::Utc::now().naive_utc();
    let expense = expense::ActiveModel {
        planner_id: Set(request.planner_id),
        name: Set(request.name),
        include_toggle: Set(include_toggle),
        scenario: Set(scenario),
        monthly_amount: Set(request.monthly_amount),
        category_id: Set(request.category_id),
        linked_asset_id: Set(request.linked_asset_id),
        linked_liability_id: Set(request.linked_liability_id),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = expense.insert(db).await.map_err(|e| {
        error!("Failed to create expense: {}", e);
        expense_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create expense: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Expense created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Expense created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all expenses for a planner
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    params(ListExpensesQuery),
    responses(
        (status = 200, description = "List of expenses", body = Vec<ExpenseResponse>),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_expenses function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| validation_error(e.to_string()))?;

    let mut condition = Condition::all().add(expense::Column::PlannerId.eq(query.planner_id));
    if let Some(scenario_cond) = scenario_condition(expense::Column::Scenario, &filter) {
        condition = condition.add(scenario_cond);
    }

    let expenses = expense::Entity::find()
        .filter(condition)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expenses: {}", e);
            expense_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch expenses: {}", e),
            )
        })?;

    let responses: Vec<ExpenseResponse> = expenses.into_iter().map(|e| e.into()).collect();

    info!("Fetched {} expenses", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Expenses retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific expense by ID
#[utoipa::path(
    get,
    path = "/api/v1/expenses/{expense_id}",
    params(
        ("expense_id" = i32, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense details", body = ExpenseResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i32>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_expense function");
    debug!("Fetching expense with id: {}", expense_id);

    let db = &state.db;

    let expense = expense::Entity::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expense: {}", e);
            expense_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch expense: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Expense not found: id={}", expense_id);
            expense_error(
                StatusCode::NOT_FOUND,
                format!("Expense with id {} not found", expense_id),
            )
        })?;

    info!("Expense fetched successfully: id={}", expense_id);
    Ok(Json(ApiResponse {
        data: expense.into(),
        message: "Expense retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update an expense
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{expense_id}",
    params(
        ("expense_id" = i32, Path, description = "Expense ID")
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated successfully", body = ExpenseResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i32>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_expense function");
    debug!("Updating expense {}: {:?}", expense_id, request);

    let db = &state.db;

    let expense = expense::Entity::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expense: {}", e);
            expense_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch expense: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Expense not found: id={}", expense_id);
            expense_error(
                StatusCode::NOT_FOUND,
                format!("Expense with id {} not found", expense_id),
            )
        })?;

    let mut active_model: expense::ActiveModel = expense.into();
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
    if let Some(category_id) = request.category_id {
        active_model.category_id = Set(Some(category_id));
    }
    if let Some(linked_asset_id) = request.linked_asset_id {
        active_model.linked_asset_id = Set(Some(linked_asset_id));
    }
    if let Some(linked_liability_id) = request.linked_liability_id {
        active_model.linked_liability_id = Set(Some(linked_liability_id));
    }
    if let Some(notes) = request.notes {
        active_model.notes = Set(Some(notes));
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update expense: {}", e);
        expense_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update expense: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Expense updated successfully: id={}", expense_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Expense updated successfully".to_string(),
        success: true,
    }))
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{expense_id}",
    params(
        ("expense_id" = i32, Path, description = "Expense ID")
    ),
    responses(
        (status = 204, description = "Expense deleted successfully"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_expense function");
    debug!("Deleting expense: id={}", expense_id);

    let db = &state.db;

    let expense = expense::Entity::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expense: {}", e);
            expense_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch expense: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Expense not found: id={}", expense_id);
            expense_error(
                StatusCode::NOT_FOUND,
                format!("Expense with id {} not found", expense_id),
            )
        })?;

    expense.delete(db).await.map_err(|e| {
        error!("Failed to delete expense: {}", e);
        expense_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete expense: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Expense deleted successfully: id={}", expense_id);
    Ok(StatusCode::NO_CONTENT)
}
