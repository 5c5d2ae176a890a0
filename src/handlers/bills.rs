use crate::helpers::parse::{parse_include_toggle, parse_scenario_tag, scenario_condition};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDateTime;
use compute::ScenarioFilter;
use model::entities::bill;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a bill
///
/// `interval_months` must be at least 1; the stored amount is divided by it
/// to get the monthly average on every read.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateBillRequest {
    /// Planner this bill belongs to
    pub planner_id: i32,
    /// Name of the bill (e.g., "Home insurance")
    pub name: String,
    /// Include toggle: "on" or "off" (default "on")
    pub include_toggle: Option<String>,
    /// Scenario tag: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
    /// Amount charged each billing interval
    pub bill_amount: Decimal,
    /// Billing interval in months (>= 1)
    #[validate(range(min = 1, message = "interval_months must be at least 1"))]
    pub interval_months: i32,
    /// Optional bill category
    pub category_id: Option<i32>,
    /// Asset this bill is tied to (silenced when the asset is off)
    pub linked_asset_id: Option<i32>,
    /// Liability this bill is tied to (silenced when the liability is off)
    pub linked_liability_id: Option<i32>,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Request body for updating a bill
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateBillRequest {
    pub name: Option<String>,
    pub include_toggle: Option<String>,
    pub scenario: Option<String>,
    pub bill_amount: Option<Decimal>,
    #[validate(range(min = 1, message = "interval_months must be at least 1"))]
    pub interval_months: Option<i32>,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
}

/// Bill response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BillResponse {
    pub id: i32,
    pub planner_id: i32,
    pub name: String,
    pub include_toggle: String,
    pub scenario: String,
    pub bill_amount: Decimal,
    pub interval_months: i32,
    /// Derived on every read, never stored
    pub monthly_average: Decimal,
    pub category_id: Option<i32>,
    pub linked_asset_id: Option<i32>,
    pub linked_liability_id: Option<i32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<bill::Model> for BillResponse {
    fn from(model: bill::Model) -> Self {
        let monthly_average = model.monthly_average();
        Self {
            id: model.id,
            planner_id: model.planner_id,
            name: model.name,
            include_toggle: model.include_toggle.to_string(),
            scenario: model.scenario,
            bill_amount: model.bill_amount,
            interval_months: model.interval_months,
            monthly_average,
            category_id: model.category_id,
            linked_asset_id: model.linked_asset_id,
            linked_liability_id: model.linked_liability_id,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing bills
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListBillsQuery {
    /// Planner to list bills for
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

fn bill_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "BILL_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new bill
#[utoipa::path(
    post,
    path = "/api/v1/bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill created successfully", body = BillResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bills"
)]
#[instrument(skip(state))]
pub async fn create_bill(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateBillRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BillResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_bill function");
    debug!("Creating bill: {:?}", request);

    let db = &state.db;

    let include_toggle = parse_include_toggle(request.include_toggle).map_err(validation_error)?;
    let scenario = parse_scenario_tag(request.scenario).map_err(validation_error)?;

    let now = chrono::Utc::now().naive_utc();
    let bill = bill::ActiveModel {
        planner_id: Set(request.planner_id),
        name: Set(request.name),
        include_toggle: Set(include_toggle),
        scenario: Set(scenario),
        bill_amount: Set(request.bill_amount),
        interval_months: Set(request.interval_months),
        category_id: Set(request.category_id),
        linked_asset_id: Set(request.linked_asset_id),
        linked_liability_id: Set(request.linked_liability_id),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = bill.insert(db).await.map_err(|e| {
        error!("Failed to create bill: {}", e);
        bill_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create bill: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Bill created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Bill created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all bills for a planner
#[utoipa::path(
    get,
    path = "/api/v1/bills",
    params(ListBillsQuery),
    responses(
        (status = 200, description = "List of bills", body = Vec<BillResponse>),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bills"
)]
#[instrument(skip(state))]
pub async fn get_bills(
    State(state): State<AppState>,
    Query(query): Query<ListBillsQuery>,
) -> Result<Json<ApiResponse<Vec<BillResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_bills function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| validation_error(e.to_string()))?;

    let mut condition = Condition::all().add(bill::Column::PlannerId.eq(query.planner_id));
    if let Some(scenario_cond) = scenario_condition(bill::Column::Scenario, &filter) {
        condition = condition.add(scenario_cond);
    }

    let bills = bill::Entity::find()
        .filter(condition)
        .order_by_asc(bill::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bills: {}", e);
            bill_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch bills: {}", e),
            )
        })?;

    let responses: Vec<BillResponse> = bills.into_iter().map(|b| b.into()).collect();

    info!("Fetched {} bills", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Bills retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific bill by ID
#[utoipa::path(
    get,
    path = "/api/v1/bills/{bill_id}",
    params(
        ("bill_id" = i32, Path, description = "Bill ID")
    ),
    responses(
        (status = 200, description = "Bill details", body = BillResponse),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bills"
)]
#[instrument(skip(state))]
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<i32>,
) -> Result<Json<ApiResponse<BillResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_bill function");
    debug!("Fetching bill with id: {}", bill_id);

    let db = &state.db;

    let bill = bill::Entity::find_by_id(bill_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bill: {}", e);
            bill_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch bill: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Bill not found: id={}", bill_id);
            bill_error(
                StatusCode::NOT_FOUND,
                format!("Bill with id {} not found", bill_id),
            )
        })?;

    info!("Bill fetched successfully: id={}", bill_id);
    Ok(Json(ApiResponse {
        data: bill.into(),
        message: "Bill retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update a bill
#[utoipa::path(
    put,
    path = "/api/v1/bills/{bill_id}",
    params(
        ("bill_id" = i32, Path, description = "Bill ID")
    ),
    request_body = UpdateBillRequest,
    responses(
        (status = 200, description = "Bill updated successfully", body = BillResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bills"
)]
#[instrument(skip(state))]
pub async fn update_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateBillRequest>>,
) -> Result<Json<ApiResponse<BillResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_bill function");
    debug!("Updating bill {}: {:?}", bill_id, request);

    let db = &state.db;

    let bill = bill::Entity::find_by_id(bill_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bill: {}", e);
            bill_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch bill: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Bill not found: id={}", bill_id);
            bill_error(
                StatusCode::NOT_FOUND,
                format!("Bill with id {} not found", bill_id),
            )
        })?;

    let mut active_model: bill::ActiveModel = bill.into();
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
    if let Some(bill_amount) = request.bill_amount {
        active_model.bill_amount = Set(bill_amount);
    }
    if let Some(interval_months) = request.interval_months {
        active_model.interval_months = Set(interval_months);
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
        error!("Failed to update bill: {}", e);
        bill_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update bill: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Bill updated successfully: id={}", bill_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Bill updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a bill
#[utoipa::path(
    delete,
    path = "/api/v1/bills/{bill_id}",
    params(
        ("bill_id" = i32, Path, description = "Bill ID")
    ),
    responses(
        (status = 204, description = "Bill deleted successfully"),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "bills"
)]
#[instrument(skip(state))]
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_bill function");
    debug!("Deleting bill: id={}", bill_id);

    let db = &state.db;

    let bill = bill::Entity::find_by_id(bill_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bill: {}", e);
            bill_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch bill: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Bill not found: id={}", bill_id);
            bill_error(
                StatusCode::NOT_FOUND,
                format!("Bill with id {} not found", bill_id),
            )
        })?;

    bill.delete(db).await.map_err(|e| {
        error!("Failed to delete bill: {}", e);
        bill_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete bill: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Bill deleted successfully: id={}", bill_id);
    Ok(StatusCode::NO_CONTENT)
}
