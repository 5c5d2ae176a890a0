use common::MonthlyTotals;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for computed totals
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Totals(MonthlyTotals),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::planners::create_planner,
        crate::handlers::planners::get_planners,
        crate::handlers::planners::get_planner,
        crate::handlers::planners::delete_planner,
        crate::handlers::assets::create_asset,
        crate::handlers::assets::get_assets,
        crate::handlers::assets::get_asset,
        crate::handlers::assets::update_asset,
        crate::handlers::assets::delete_asset,
        crate::handlers::liabilities::create_liability,
        crate::handlers::liabilities::get_liabilities,
        crate::handlers::liabilities::get_liability,
        crate::handlers::liabilities::update_liability,
        crate::handlers::liabilities::delete_liability,
        crate::handlers::income::create_income,
        crate::handlers::income::get_incomes,
        crate::handlers::income::get_income,
        crate::handlers::income::update_income,
        crate::handlers::income::delete_income,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expenses,
        crate::handlers::expenses::get_expense,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::bills::create_bill,
        crate::handlers::bills::get_bills,
        crate::handlers::bills::get_bill,
        crate::handlers::bills::update_bill,
        crate::handlers::bills::delete_bill,
        crate::handlers::categories::create_category,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,
        crate::handlers::scenarios::create_scenario,
        crate::handlers::scenarios::get_scenarios,
        crate::handlers::scenarios::get_scenario,
        crate::handlers::scenarios::update_scenario,
        crate::handlers::scenarios::delete_scenario,
        crate::handlers::scenarios::get_scenario_items,
        crate::handlers::scenarios::add_scenario_item,
        crate::handlers::scenarios::remove_scenario_item,
        crate::handlers::kpis::get_monthly_totals,
        crate::handlers::kpis::get_effective_liabilities,
        crate::handlers::kpis::get_effective_expenses,
        crate::handlers::kpis::get_effective_bills,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            MonthlyTotals,
            crate::handlers::planners::CreatePlannerRequest,
            crate::handlers::planners::PlannerResponse,
            crate::handlers::assets::CreateAssetRequest,
            crate::handlers::assets::UpdateAssetRequest,
            crate::handlers::assets::AssetResponse,
            crate::handlers::liabilities::CreateLiabilityRequest,
            crate::handlers::liabilities::UpdateLiabilityRequest,
            crate::handlers::liabilities::LiabilityResponse,
            crate::handlers::income::CreateIncomeRequest,
            crate::handlers::income::UpdateIncomeRequest,
            crate::handlers::income::IncomeResponse,
            crate::handlers::expenses::CreateExpenseRequest,
            crate::handlers::expenses::UpdateExpenseRequest,
            crate::handlers::expenses::ExpenseResponse,
            crate::handlers::bills::CreateBillRequest,
            crate::handlers::bills::UpdateBillRequest,
            crate::handlers::bills::BillResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::UpdateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::scenarios::CreateScenarioRequest,
            crate::handlers::scenarios::UpdateScenarioRequest,
            crate::handlers::scenarios::ScenarioResponse,
            crate::handlers::scenarios::AddScenarioItemRequest,
            crate::handlers::scenarios::ScenarioItemResponse,
            crate::handlers::kpis::MonthlyTotalsResponse,
            crate::handlers::kpis::EffectiveLiability,
            crate::handlers::kpis::EffectiveExpense,
            crate::handlers::kpis::EffectiveBill,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "planners", description = "Planner CRUD endpoints"),
        (name = "assets", description = "Asset CRUD endpoints"),
        (name = "liabilities", description = "Liability CRUD endpoints"),
        (name = "income", description = "Income CRUD endpoints"),
        (name = "expenses", description = "Expense CRUD endpoints"),
        (name = "bills", description = "Bill CRUD endpoints"),
        (name = "categories", description = "Category CRUD endpoints"),
        (name = "scenarios", description = "Scenario settings and item endpoints"),
        (name = "kpis", description = "Aggregated totals and effective status endpoints"),
    ),
    info(
        title = "Budget Planner API",
        description = "Personal budget planning API - scenario-tagged records with monthly aggregation",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
