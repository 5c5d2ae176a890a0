use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use model::entities::category::{self, CategoryKind};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating a category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Planner this category belongs to
    pub planner_id: i32,
    /// Category kind: "expense" or "bill"
    pub kind: String,
    /// Name of the category, unique per planner and kind
    pub name: String,
}

/// Request body for updating a category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

/// Category response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub planner_id: i32,
    pub kind: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            planner_id: model.planner_id,
            kind: model.kind.to_string(),
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Query parameters for listing categories
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListCategoriesQuery {
    /// Planner to list categories for
    pub planner_id: i32,
    /// Restrict to one kind: "expense" or "bill"
    pub kind: Option<String>,
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

fn category_error(status: StatusCode, message: String) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: "CATEGORY_ERROR".to_string(),
            success: false,
        }),
    )
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Invalid input or duplicate name", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_category function");
    debug!("Creating category: {:?}", request);

    let db = &state.db;

    let kind = CategoryKind::from_str(&request.kind).map_err(validation_error)?;

    // Names are unique per planner and kind
    let existing = category::Entity::find()
        .filter(category::Column::PlannerId.eq(request.planner_id))
        .filter(category::Column::Kind.eq(kind))
        .filter(category::Column::Name.eq(request.name.as_str()))
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to check for existing category: {}", e);
            category_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to check for existing category: {}", e),
            )
        })?;
    if existing.is_some() {
        return Err(validation_error(format!(
            "Category '{}' already exists for this planner and kind",
            request.name
        )));
    }

    let now = chrono::Utc::now().naive_utc();
    let category = category::ActiveModel {
        planner_id: Set(request.planner_id),
        kind: Set(kind),
        name: Set(request.name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = category.insert(db).await.map_err(|e| {
        error!("Failed to create category: {}", e);
        category_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create category: {}", e),
        )
    })?;

    info!("Category created successfully: id={}", result.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: result.into(),
            message: "Category created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Get all categories for a planner
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
        (status = 400, description = "Invalid kind", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_categories function");
    debug!("Query parameters: {:?}", query);

    let db = &state.db;

    let mut find = category::Entity::find()
        .filter(category::Column::PlannerId.eq(query.planner_id));
    if let Some(raw_kind) = query.kind {
        let kind = CategoryKind::from_str(&raw_kind).map_err(validation_error)?;
        find = find.filter(category::Column::Kind.eq(kind));
    }

    let categories = find
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch categories: {}", e);
            category_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch categories: {}", e),
            )
        })?;

    let responses: Vec<CategoryResponse> = categories.into_iter().map(|c| c.into()).collect();

    info!("Fetched {} categories", responses.len());
    Ok(Json(ApiResponse {
        data: responses,
        message: "Categories retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific category by ID
#[utoipa::path(
    get,
    path = "/api/v1/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_category function");
    debug!("Fetching category with id: {}", category_id);

    let db = &state.db;

    let category = category::Entity::find_by_id(category_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch category: {}", e);
            category_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch category: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Category not found: id={}", category_id);
            category_error(
                StatusCode::NOT_FOUND,
                format!("Category with id {} not found", category_id),
            )
        })?;

    info!("Category fetched successfully: id={}", category_id);
    Ok(Json(ApiResponse {
        data: category.into(),
        message: "Category retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_category function");
    debug!("Updating category {}: {:?}", category_id, request);

    let db = &state.db;

    let category = category::Entity::find_by_id(category_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch category: {}", e);
            category_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch category: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Category not found: id={}", category_id);
            category_error(
                StatusCode::NOT_FOUND,
                format!("Category with id {} not found", category_id),
            )
        })?;

    let mut active_model: category::ActiveModel = category.into();
    if let Some(name) = request.name {
        active_model.name = Set(name);
    }
    active_model.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active_model.update(db).await.map_err(|e| {
        error!("Failed to update category: {}", e);
        category_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to update category: {}", e),
        )
    })?;

    info!("Category updated successfully: id={}", category_id);
    Ok(Json(ApiResponse {
        data: updated.into(),
        message: "Category updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a category
///
/// Records pointing at the category keep working; their category link is
/// cleared by the foreign key.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{category_id}",
    params(
        ("category_id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categories"
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_category function");
    debug!("Deleting category: id={}", category_id);

    let db = &state.db;

    let category = category::Entity::find_by_id(category_id)
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch category: {}", e);
            category_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch category: {}", e),
            )
        })?
        .ok_or_else(|| {
            warn!("Category not found: id={}", category_id);
            category_error(
                StatusCode::NOT_FOUND,
                format!("Category with id {} not found", category_id),
            )
        })?;

    category.delete(db).await.map_err(|e| {
        error!("Failed to delete category: {}", e);
        category_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to delete category: {}", e),
        )
    })?;

    info!("Category deleted successfully: id={}", category_id);
    Ok(StatusCode::NO_CONTENT)
}
