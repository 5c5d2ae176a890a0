use crate::handlers::bills::BillResponse;
use crate::handlers::expenses::ExpenseResponse;
use crate::handlers::liabilities::LiabilityResponse;
use crate::schemas::{ApiResponse, AppState, CachedData, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::MonthlyTotals;
use compute::{monthly_totals, ScenarioFilter, ToggleIndex};
use model::entities::{asset, bill, expense, income, liability};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the monthly totals endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MonthlyTotalsQuery {
    /// Planner to aggregate
    pub planner_id: i32,
    /// Scenario filter: "ALL" or a scenario code (default "ALL")
    pub scenario: Option<String>,
}

/// Query parameters for the effective status endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EffectiveStatusQuery {
    /// Planner to inspect
    pub planner_id: i32,
}

/// Monthly totals response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyTotalsResponse {
    pub planner_id: i32,
    /// The filter the totals were computed under
    pub scenario: String,
    pub totals: MonthlyTotals,
}

/// A liability annotated with its cascaded include status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EffectiveLiability {
    pub liability: LiabilityResponse,
    /// "on" or "off" after folding in the linked asset's toggle
    pub effective_status: String,
}

/// An expense annotated with its cascaded include status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EffectiveExpense {
    pub expense: ExpenseResponse,
    /// "on" or "off" after folding in the linked records' toggles
    pub effective_status: String,
}

/// A bill annotated with its cascaded include status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EffectiveBill {
    pub bill: BillResponse,
    /// "on" or "off" after folding in the linked records' toggles
    pub effective_status: String,
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

fn kpi_error(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message,
            code: "KPI_ERROR".to_string(),
            success: false,
        }),
    )
}

fn status_label(on: bool) -> String {
    if on { "on" } else { "off" }.to_string()
}

async fn load_assets(db: &DatabaseConnection, planner_id: i32) -> Result<Vec<asset::Model>, DbErr> {
    asset::Entity::find()
        .filter(asset::Column::PlannerId.eq(planner_id))
        .all(db)
        .await
}

async fn load_liabilities(
    db: &DatabaseConnection,
    planner_id: i32,
) -> Result<Vec<liability::Model>, DbErr> {
    liability::Entity::find()
        .filter(liability::Column::PlannerId.eq(planner_id))
        .all(db)
        .await
}

/// Get the monthly totals for a planner under a scenario filter
///
/// Results are cached for five minutes; any mutation to the planner's
/// records invalidates the cache.
#[utoipa::path(
    get,
    path = "/api/v1/kpis/monthly-totals",
    params(MonthlyTotalsQuery),
    responses(
        (status = 200, description = "Monthly totals", body = MonthlyTotalsResponse),
        (status = 400, description = "Invalid scenario filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "kpis"
)]
#[instrument(skip(state))]
pub async fn get_monthly_totals(
    State(state): State<AppState>,
    Query(query): Query<MonthlyTotalsQuery>,
) -> Result<Json<ApiResponse<MonthlyTotalsResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_monthly_totals function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let filter = ScenarioFilter::parse(query.scenario.as_deref().unwrap_or(compute::ALL_TAG))
        .map_err(|e| validation_error(e.to_string()))?;

    // Check cache first
    let cache_key = format!("totals_{}_{}", query.planner_id, filter);
    if let Some(CachedData::Totals(totals)) = state.cache.get(&cache_key).await {
        debug!("Monthly totals served from cache: key={}", cache_key);
        return Ok(Json(ApiResponse {
            data: MonthlyTotalsResponse {
                planner_id: query.planner_id,
                scenario: filter.to_string(),
                totals,
            },
            message: "Monthly totals retrieved from cache".to_string(),
            success: true,
        }));
    }

    let assets = load_assets(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch assets: {}", e);
        kpi_error(format!("Failed to fetch assets: {}", e))
    })?;
    let liabilities = load_liabilities(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch liabilities: {}", e);
        kpi_error(format!("Failed to fetch liabilities: {}", e))
    })?;
    let incomes = income::Entity::find()
        .filter(income::Column::PlannerId.eq(query.planner_id))
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch income records: {}", e);
            kpi_error(format!("Failed to fetch income records: {}", e))
        })?;
    let expenses = expense::Entity::find()
        .filter(expense::Column::PlannerId.eq(query.planner_id))
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expenses: {}", e);
            kpi_error(format!("Failed to fetch expenses: {}", e))
        })?;
    let bills = bill::Entity::find()
        .filter(bill::Column::PlannerId.eq(query.planner_id))
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bills: {}", e);
            kpi_error(format!("Failed to fetch bills: {}", e))
        })?;

    let totals = monthly_totals(&assets, &liabilities, &incomes, &expenses, &bills, &filter);

    state
        .cache
        .insert(cache_key, CachedData::Totals(totals.clone()))
        .await;

    info!(
        "Monthly totals computed: planner={}, scenario={}",
        query.planner_id, filter
    );
    Ok(Json(ApiResponse {
        data: MonthlyTotalsResponse {
            planner_id: query.planner_id,
            scenario: filter.to_string(),
            totals,
        },
        message: "Monthly totals retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get all liabilities with their cascaded include status
#[utoipa::path(
    get,
    path = "/api/v1/kpis/effective-liabilities",
    params(EffectiveStatusQuery),
    responses(
        (status = 200, description = "Liabilities with effective status", body = Vec<EffectiveLiability>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "kpis"
)]
#[instrument(skip(state))]
pub async fn get_effective_liabilities(
    State(state): State<AppState>,
    Query(query): Query<EffectiveStatusQuery>,
) -> Result<Json<ApiResponse<Vec<EffectiveLiability>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_effective_liabilities function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let assets = load_assets(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch assets: {}", e);
        kpi_error(format!("Failed to fetch assets: {}", e))
    })?;
    let liabilities = load_liabilities(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch liabilities: {}", e);
        kpi_error(format!("Failed to fetch liabilities: {}", e))
    })?;

    let index = ToggleIndex::new(&assets, &liabilities);
    let responses: Vec<EffectiveLiability> = liabilities
        .into_iter()
        .map(|l| {
            let effective = index.effective_liability(&l);
            EffectiveLiability {
                liability: l.into(),
                effective_status: status_label(effective),
            }
        })
        .collect();

    info!("Fetched {} liabilities with effective status", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Effective liabilities retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get all expenses with their cascaded include status
#[utoipa::path(
    get,
    path = "/api/v1/kpis/effective-expenses",
    params(EffectiveStatusQuery),
    responses(
        (status = 200, description = "Expenses with effective status", body = Vec<EffectiveExpense>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "kpis"
)]
#[instrument(skip(state))]
pub async fn get_effective_expenses(
    State(state): State<AppState>,
    Query(query): Query<EffectiveStatusQuery>,
) -> Result<Json<ApiResponse<Vec<EffectiveExpense>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_effective_expenses function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let assets = load_assets(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch assets: {}", e);
        kpi_error(format!("Failed to fetch assets: {}", e))
    })?;
    let liabilities = load_liabilities(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch liabilities: {}", e);
        kpi_error(format!("Failed to fetch liabilities: {}", e))
    })?;
    let expenses = expense::Entity::find()
        .filter(expense::Column::PlannerId.eq(query.planner_id))
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch expenses: {}", e);
            kpi_error(format!("Failed to fetch expenses: {}", e))
        })?;

    let index = ToggleIndex::new(&assets, &liabilities);
    let responses: Vec<EffectiveExpense> = expenses
        .into_iter()
        .map(|e| {
            let effective = index.effective_expense(&e);
            EffectiveExpense {
                expense: e.into(),
                effective_status: status_label(effective),
            }
        })
        .collect();

    info!("Fetched {} expenses with effective status", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Effective expenses retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get all bills with their cascaded include status
#[utoipa::path(
    get,
    path = "/api/v1/kpis/effective-bills",
    params(EffectiveStatusQuery),
    responses(
        (status = 200, description = "Bills with effective status", body = Vec<EffectiveBill>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "kpis"
)]
#[instrument(skip(state))]
pub async fn get_effective_bills(
    State(state): State<AppState>,
    Query(query): Query<EffectiveStatusQuery>,
) -> Result<Json<ApiResponse<Vec<EffectiveBill>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_effective_bills function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let assets = load_assets(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch assets: {}", e);
        kpi_error(format!("Failed to fetch assets: {}", e))
    })?;
    let liabilities = load_liabilities(db, query.planner_id).await.map_err(|e| {
        error!("Failed to fetch liabilities: {}", e);
        kpi_error(format!("Failed to fetch liabilities: {}", e))
    })?;
    let bills = bill::Entity::find()
        .filter(bill::Column::PlannerId.eq(query.planner_id))
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch bills: {}", e);
            kpi_error(format!("Failed to fetch bills: {}", e))
        })?;

    let index = ToggleIndex::new(&assets, &liabilities);
    let responses: Vec<EffectiveBill> = bills
        .into_iter()
        .map(|b| {
            let effective = index.effective_bill(&b);
            EffectiveBill {
                bill: b.into(),
                effective_status: status_label(effective),
            }
        })
        .collect();

    info!("Fetched {} bills with effective status", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Effective bills retrieved successfully".to_string(),
        success: true,
    }))
}
