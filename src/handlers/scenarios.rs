use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::NaiveDateTime;
use model::entities::{scenario, scenario_item};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating a scenario
///
/// The code is a short upper-case alphanumeric tag like "A" or "B2"; "ALL"
/// is reserved for records that belong to every scenario and can never name
/// a scenario itself.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateScenarioRequest {
    /// Planner this scenario belongs to
    pub planner_id: i32,
    /// Scenario code, unique per planner
    pub scenario: String,
    /// Human-readable name (e.g., "Sell House")
    pub display_name: Option<String>,
    /// Month assets are assumed sold in, 1-12; 0 means never
    #[validate(range(min = 0, max = 12, message = "sale_month must be between 0 and 12"))]
    pub sale_month: Option<i32>,
}

/// Request body for updating a scenario
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateScenarioRequest {
    pub display_name: Option<String>,
    #[validate(range(min = 0, max = 12, message = "sale_month must be between 0 and 12"))]
    pub sale_month: Option<i32>,
}

/// Scenario response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScenarioResponse {
    pub id: i32,
    pub planner_id: i32,
    pub scenario: String,
    pub display_name: String,
    pub sale_month: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<scenario::Model> for ScenarioResponse {
    fn from(model: scenario::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            scenario: model.scenario,
            display_name: model.display_name,
            sale_month: model.sale_month,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Request body for attaching a record to a scenario
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddScenarioItemRequest {
    /// ID of the record being attached
    pub item_id: i32,
    /// Record type: "asset", "liability", "income", "expense" or "bill"
    pub item_type: String,
}

/// Scenario item response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScenarioItemResponse {
    pub id: i32,
    pub scenario_id: i32,
    pub item_id: i32,
    pub item_type: String,
    pub created_at: NaiveDateTime,
}

impl From<scenario_item::Model> for ScenarioItemResponse {
    fn from(model: scenario_item::Model) -> Self {
        Self {
            id: model.id,
            scenario_id: model.scenario_id,
            item_id: model.item_id,
            item_type: model.item_type.to_string(),
            created_at: model.created_at,
        }
    }
}

/// Query parameters for listing scenarios
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListScenariosQuery {
    /// Planner to list scenarios for
    pub planner_id: i32,
}

/// Query parameters for removing a scenario item
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RemoveScenarioItemQuery {
    /// Record type of the item being detached
    pub item_type: String,
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

fn scenario_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "SCENARIO_ERROR".to_string(),
            success: false,
        }),
    )
}

async fn find_scenario(
    state: &AppState,
    scenario_id: i32,
) -> Result<scenario::Model, (StatusCode, Json<ErrorResponse>)> {
    scenario::Entity::find_by_id(scenario_id)
        .one(&state.db)
        .await
        .map_err(|e| {
            error!("Failed to fetch scenario: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch scenario: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Scenario not found: id={}", scenario_id);
            scenario_error(
                StatusCode::NOT_FOUND,
                format!("Scenario with id {} not found", scenario_id),
            )
        })
}

/// Create a new scenario
#[utoipa::path(
    post,
    path = "/api/v1/scenarios",
    request_body = CreateScenarioRequest,
    responses(
        (status = 201, description = "Scenario created successfully", body = ScenarioResponse),
        (status = 400, description = "Invalid or duplicate scenario code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn create_scenario(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateScenarioRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ScenarioResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_scenario function");
    debug!("Creating scenario: {:?}", request);

    let db = &state.db;

    compute::filter::validate_code(&request.scenario)
        .map_err(|e| validation_error(e.to_string()))?;

    // Codes are unique within one planner
    let existing = scenario::Entity::find()
        .filter(scenario::Column::PlannerId.eq(request.planner_id))
        .filter(scenario::Column::Scenario.eq(request.scenario.as_str()))
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to check for existing scenario: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to check for existing scenario: {}", e),
            )
        })?;
    if existing.is_some() {
        return Err(validation_error(format!(
            "Scenario '{}' already exists for this planner",
            request.scenario
        )));
    }

    let now = chrono::Utc::now().naive_utc();
    let scenario = scenario::ActiveModel {
        planner_id: Set(request.planner_id),
        scenario: Set(request.scenario),
        display_name: Set(request.display_name.unwrap_or_default()),
        sale_month: Set(request.sale_month.unwrap_or(0)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = scenario.insert(db).await.map_err(|e| {
        error!("Failed to create scenario: {}", e);
        scenario_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create scenario: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Scenario created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Scenario created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all scenarios for a planner
#[utoipa::path(
    get,
    path = "/api/v1/scenarios",
    params(ListScenariosQuery),
    responses(
        (status = 200, description = "List of scenarios", body = Vec<ScenarioResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn get_scenarios(
    State(state): State<AppState>,
    Query(query): Query<ListScenariosQuery>,
) -> Result<Json<ApiResponse<Vec<ScenarioResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_scenarios function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let scenarios = scenario::Entity::find()
        .filter(scenario::Column::PlannerId.eq(query.planner_id))
        .order_by_asc(scenario::Column::Scenario)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch scenarios: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch scenarios: {}", e),
            )
        })?;

    let responses: Vec<ScenarioResponse> = scenarios.into_iter().map(|s| s.into()).collect();

    info!("Fetched {} scenarios", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Scenarios retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific scenario by ID
#[utoipa::path(
    get,
    path = "/api/v1/scenarios/{scenario_id}",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID")
    ),
    responses(
        (status = 200, description = "Scenario details", body = ScenarioResponse),
        (status = 404, description = "Scenario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<i32>,
) -> Result<Json<ApiResponse<ScenarioResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_scenario function");
    debug!("Fetching scenario with id: {}", scenario_id);

    let scenario = find_scenario(&state, scenario_id).await?;

    info!("Scenario fetched successfully: id={}", scenario_id);
    Ok(Json(ApiResponse {
        data: scenario.into(),
        message: "Scenario retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update a scenario
///
/// The code itself is immutable; records reference it by value, so renaming
/// a code would silently orphan them.
#[utoipa::path(
    put,
    path = "/api/v1/scenarios/{scenario_id}",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID")
    ),
    request_body = UpdateScenarioRequest,
    responses(
        (status = 200, description = "Scenario updated successfully", body = ScenarioResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Scenario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn update_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<i32>,
    Valid(Json(request)): Valid<Json<UpdateScenarioRequest>>,
) -> Result<Json<ApiResponse<ScenarioResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_scenario function");
    debug!("Updating scenario {}: {:?}", scenario_id, request);

    let db = &state.db;

    let scenario = find_scenario(&state, scenario_id).await?;

    let mut active_model: scenario::ActiveModel = scenario.into();
    if let Some(display_name) = request.display_name {
        active_model.display_name = Set(display_name);
    }
    if let Some(sale_month) = request.sale_month {
        active_model.sale_month = Set(sale_month);
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update scenario: {}", e);
        scenario_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update scenario: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Scenario updated successfully: id={}", scenario_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Scenario updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a scenario
///
/// Deletes the scenario and all its item attachments. Records keep their
/// scenario tag; they simply stop matching any configured scenario.
#[utoipa::path(
    delete,
    path = "/api/v1/scenarios/{scenario_id}",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID")
    ),
    responses(
        (status = 204, description = "Scenario deleted successfully"),
        (status = 404, description = "Scenario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn delete_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_scenario function");
    debug!("Deleting scenario: id={}", scenario_id);

    let db = &state.db;

    let scenario = find_scenario(&state, scenario_id).await?;

    // Delete the attachments first; the FK cascade backstops this for
    // databases where foreign keys are enforced.
    scenario_item::Entity::delete_many()
        .filter(scenario_item::Column::ScenarioId.eq(scenario_id))
        .exec(db)
        .await
        .map_err(|e| {
            error!("Failed to delete scenario items: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete scenario items: {}", e),
            )
        })?;

    scenario.delete(db).await.map_err(|e| {
        error!("Failed to delete scenario: {}", e);
        scenario_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete scenario: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Scenario deleted successfully: id={}", scenario_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Get the items attached to a scenario
#[utoipa::path(
    get,
    path = "/api/v1/scenarios/{scenario_id}/items",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID")
    ),
    responses(
        (status = 200, description = "List of scenario items", body = Vec<ScenarioItemResponse>),
        (status = 404, description = "Scenario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn get_scenario_items(
    State(state): State<AppState>,
    Path(scenario_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ScenarioItemResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_scenario_items function");
    debug!("Fetching items for scenario: id={}", scenario_id);

    let db = &state.db;

    find_scenario(&state, scenario_id).await?;

    let items = scenario_item::Entity::find()
        .filter(scenario_item::Column::ScenarioId.eq(scenario_id))
        .order_by_asc(scenario_item::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch scenario items: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch scenario items: {}", e),
            )
        })?;

    let responses: Vec<ScenarioItemResponse> = items.into_iter().map(|i| i.into()).collect();

    info!("Fetched {} scenario items", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Scenario items retrieved successfully".to_string(),
        success: true,
    }))
}

/// Attach a record to a scenario
#[utoipa::path(
    post,
    path = "/api/v1/scenarios/{scenario_id}/items",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID")
    ),
    request_body = AddScenarioItemRequest,
    responses(
        (status = 201, description = "Item attached successfully", body = ScenarioItemResponse),
        (status = 400, description = "Invalid item type or duplicate item", body = ErrorResponse),
        (status = 404, description = "Scenario not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn add_scenario_item(
    State(state): State<AppState>,
    Path(scenario_id): Path<i32>,
    Json(request): Json<AddScenarioItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScenarioItemResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering add_scenario_item function");
    debug!("Attaching item to scenario {}: {:?}", scenario_id, request);

    let db = &state.db;

    find_scenario(&state, scenario_id).await?;

    let item_type = scenario_item::ItemType::from_str(&request.item_type)
        .map_err(validation_error)?;

    // One attachment per (scenario, record)
    let existing = scenario_item::Entity::find()
        .filter(scenario_item::Column::ScenarioId.eq(scenario_id))
        .filter(scenario_item::Column::ItemId.eq(request.item_id))
        .filter(scenario_item::Column::ItemType.eq(item_type))
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to check for existing scenario item: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to check for existing scenario item: {}", e),
            )
        })?;
    if existing.is_some() {
        return Err(validation_error(format!(
            "Item {} of type '{}' is already attached to scenario {}",
            request.item_id, request.item_type, scenario_id
        )));
    }

    let item = scenario_item::ActiveModel {
        scenario_id: Set(scenario_id),
        item_id: Set(request.item_id),
        item_type: Set(item_type),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let result = item.insert(db).await.map_err(|e| {
        error!("Failed to attach scenario item: {}", e);
        scenario_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to attach scenario item: {}", e),
        )
    })?;

    state.cache.invalidate_all();

    info!("Scenario item attached successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Scenario item attached successfully".to_string(),
            success: true,
        }),
    ))
}

/// Detach a record from a scenario
#[utoipa::path(
    delete,
    path = "/api/v1/scenarios/{scenario_id}/items/{item_id}",
    params(
        ("scenario_id" = i32, Path, description = "Scenario ID"),
        ("item_id" = i32, Path, description = "ID of the attached record"),
        RemoveScenarioItemQuery,
    ),
    responses(
        (status = 204, description = "Item detached successfully"),
        (status = 400, description = "Invalid item type", body = ErrorResponse),
        (status = 404, description = "Scenario or item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "scenarios"
)]
#[instrument(skip(state))]
pub async fn remove_scenario_item(
    State(state): State<AppState>,
    Path((scenario_id, item_id)): Path<(i32, i32)>,
    Query(query): Query<RemoveScenarioItemQuery>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering remove_scenario_item function");
    debug!(
        "Detaching item {} ({}) from scenario {}",
        item_id, query.item_type, scenario_id
    );

    let db = &state.db;

    find_scenario(&state, scenario_id).await?;

    let item_type =
        scenario_item::ItemType::from_str(&query.item_type).map_err(validation_error)?;

    let result = scenario_item::Entity::delete_many()
        .filter(scenario_item::Column::ScenarioId.eq(scenario_id))
        .filter(scenario_item::Column::ItemId.eq(item_id))
        .filter(scenario_item::Column::ItemType.eq(item_type))
        .exec(db)
        .await
        .map_err(|e| {
            error!("Failed to detach scenario item: {}", e);
            scenario_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to detach scenario item: {}", e),
            )
        })?;

    if result.rows_affected == 0 {
        warn!(
            "Scenario item not found: scenario={}, item={}, type={}",
            scenario_id, item_id, query.item_type
        );
        return Err(scenario_error(
            StatusCode::NOT_FOUND,
            format!(
                "Item {} of type '{}' is not attached to scenario {}",
                item_id, query.item_type, scenario_id
            ),
        ));
    }

    state.cache.invalidate_all();

    info!("Scenario item detached successfully");
    Ok(StatusCode::NO_CONTENT)
}
