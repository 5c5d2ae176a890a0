use crate::handlers::{
    assets::{create_asset, delete_asset, get_asset, get_assets, update_asset},
    bills::{create_bill, delete_bill, get_bill, get_bills, update_bill},
    categories::{create_category, delete_category, get_categories, get_category, update_category},
    expenses::{create_expense, delete_expense, get_expense, get_expenses, update_expense},
    health::health_check,
    income::{create_income, delete_income, get_income, get_incomes, update_income},
    kpis::{
        get_effective_bills, get_effective_expenses, get_effective_liabilities,
        get_monthly_totals,
    },
    liabilities::{
        create_liability, delete_liability, get_liabilities, get_liability, update_liability,
    },
    planners::{create_planner, delete_planner, get_planner, get_planners},
    scenarios::{
        add_scenario_item, create_scenario, delete_scenario, get_scenario, get_scenario_items,
        get_scenarios, remove_scenario_item, update_scenario,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Planner CRUD routes
        .route("/api/v1/planners", post(create_planner))
        .route("/api/v1/planners", get(get_planners))
        .route("/api/v1/planners/:planner_id", get(get_planner))
        .route("/api/v1/planners/:planner_id", delete(delete_planner))
        // Asset CRUD routes
        .route("/api/v1/assets", post(create_asset))
        .route("/api/v1/assets", get(get_assets))
        .route("/api/v1/assets/:asset_id", get(get_asset))
        .route("/api/v1/assets/:asset_id", put(update_asset))
        .route("/api/v1/assets/:asset_id", delete(delete_asset))
        // Liability CRUD routes
        .route("/api/v1/liabilities", post(create_liability))
        .route("/api/v1/liabilities", get(get_liabilities))
        .route("/api/v1/liabilities/:liability_id", get(get_liability))
        .route("/api/v1/liabilities/:liability_id", put(update_liability))
        .route("/api/v1/liabilities/:liability_id", delete(delete_liability))
        // Income CRUD routes
        .route("/api/v1/income", post(create_income))
        .route("/api/v1/income", get(get_incomes))
        .route("/api/v1/income/:income_id", get(get_income))
        .route("/api/v1/income/:income_id", put(update_income))
        .route("/api/v1/income/:income_id", delete(delete_income))
        // Expense CRUD routes
        .route("/api/v1/expenses", post(create_expense))
        .route("/api/v1/expenses", get(get_expenses))
        .route("/api/v1/expenses/:expense_id", get(get_expense))
        .route("/api/v1/expenses/:expense_id", put(update_expense))
        .route("/api/v1/expenses/:expense_id", delete(delete_expense))
        // Bill CRUD routes
        .route("/api/v1/bills", post(create_bill))
        .route("/api/v1/bills", get(get_bills))
        .route("/api/v1/bills/:bill_id", get(get_bill))
        .route("/api/v1/bills/:bill_id", put(update_bill))
        .route("/api/v1/bills/:bill_id", delete(delete_bill))
        // Category CRUD routes
        .route("/api/v1/categories", post(create_category))
        .route("/api/v1/categories", get(get_categories))
        .route("/api/v1/categories/:category_id", get(get_category))
        .route("/api/v1/categories/:category_id", put(update_category))
        .route("/api/v1/categories/:category_id", delete(delete_category))
        // Scenario settings and items
        .route("/api/v1/scenarios", post(create_scenario))
        .route("/api/v1/scenarios", get(get_scenarios))
        .route("/api/v1/scenarios/:scenario_id", get(get_scenario))
        .route("/api/v1/scenarios/:scenario_id", put(update_scenario))
        .route("/api/v1/scenarios/:scenario_id", delete(delete_scenario))
        .route("/api/v1/scenarios/:scenario_id/items", get(get_scenario_items))
        .route("/api/v1/scenarios/:scenario_id/items", post(add_scenario_item))
        .route(
            "/api/v1/scenarios/:scenario_id/items/:item_id",
            delete(remove_scenario_item),
        )
        // KPI routes
        .route("/api/v1/kpis/monthly-totals", get(get_monthly_totals))
        .route(
            "/api/v1/kpis/effective-liabilities",
            get(get_effective_liabilities),
        )
        .route(
            "/api/v1/kpis/effective-expenses",
            get(get_effective_expenses),
        )
        .route("/api/v1/kpis/effective-bills", get(get_effective_bills))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
