use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use model::entities::planner;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a planner
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePlannerRequest {
    /// Name of the plan (e.g., "Household 2026")
    pub name: String,
}

/// Planner response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlannerResponse {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<planner::Model> for PlannerResponse {
    fn from(model: planner::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Create a new planner
///
/// Every record belongs to exactly one planner; there is no implicit default.
#[utoipa::path(
    post,
    path = "/api/v1/planners",
    request_body = CreatePlannerRequest,
    responses(
        (status = 201, description = "Planner created successfully", body = PlannerResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "planners"
)]
#[instrument(skip(state))]
pub async fn create_planner(
    State(state): State<AppState>,
    Json(request): Json<CreatePlannerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlannerResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_planner function");
    debug!("Creating planner: {:?}", request);

    let db = &state.db;
    let now = chrono::Utc::now().naive_utc();

    let planner = planner::ActiveModel {
        name: Set(request.name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = planner.insert(db).await.map_err(|e| {
        error!("Failed to create planner: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to create planner: {}", e),
                code: "PLANNER_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    state.cache.invalidate_all();

    info!("Planner created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Planner created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all planners
#[utoipa::path(
    get,
    path = "/api/v1/planners",
    responses(
        (status = 200, description = "List of planners", body = Vec<PlannerResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "planners"
)]
#[instrument(skip(state))]
pub async fn get_planners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PlannerResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_planners function");

    let db = &state.db;

    let planners = planner::Entity::find()
        .order_by_asc(planner::Column::Id)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch planners: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch planners: {}", e),
                    code: "PLANNER_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    let responses: Vec<PlannerResponse> = planners.into_iter().map(|p| p.into()).collect();

    info!("Fetched {} planners", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Planners retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific planner by ID
#[utoipa::path(
    get,
    path = "/api/v1/planners/{planner_id}",
    params(
        ("planner_id" = i32, Path, description = "Planner ID")
    ),
    responses(
        (status = 200, description = "Planner details", body = PlannerResponse),
        (status = 404, description = "Planner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "planners"
)]
#[instrument(skip(state))]
pub async fn get_planner(
    State(state): State<AppState>,
    Path(planner_id): Path<i32>,
) -> Result<Json<ApiResponse<PlannerResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_planner function");
    debug!("Fetching planner with id: {}", planner_id);

    let db = &state.db;

    let planner = planner::Entity::find_by_id(planner_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch planner: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch planner: {}", e),
                    code: "PLANNER_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            warn!("Planner not found: id={}", planner_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Planner with id {} not found", planner_id),
                    code: "PLANNER_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    info!("Planner fetched successfully: id={}", planner_id);
    Ok(Json(ApiResponse {
        data: planner.into(),
        message: "Planner retrieved successfully".to_string(),
        success: true,
    }))
}

/// Delete a planner
///
/// Deletes the planner and, through foreign key cascades, every record that
/// belongs to it.
#[utoipa::path(
    delete,
    path = "/api/v1/planners/{planner_id}",
    params(
        ("planner_id" = i32, Path, description = "Planner ID")
    ),
    responses(
        (status = 204, description = "Planner deleted successfully"),
        (status = 404, description = "Planner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "planners"
)]
#[instrument(skip(state))]
pub async fn delete_planner(
    State(state): State<AppState>,
    Path(planner_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_planner function");
    debug!("Deleting planner: id={}", planner_id);

    let db = &state.db;

    let planner = planner::Entity::find_by_id(planner_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch planner: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch planner: {}", e),
                    code: "PLANNER_ERROR".to_string(),
                    success: false,
                }),
            )
        })?
        .ok_or_else(|| {
            warn!("Planner not found: id={}", planner_id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Planner with id {} not found", planner_id),
                    code: "PLANNER_ERROR".to_string(),
                    success: false,
                }),
            )
        })?;

    planner.delete(db).await.map_err(|e| {
        error!("Failed to delete planner: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to delete planner: {}", e),
                code: "PLANNER_ERROR".to_string(),
                success: false,
            }),
        )
    })?;

    state.cache.invalidate_all();

    info!("Planner deleted successfully: id={}", planner_id);
    Ok(StatusCode::NO_CONTENT)
}
