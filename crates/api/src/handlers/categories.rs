//! Handlers for the category resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskboard_core::category::CategoryInput;
use taskboard_core::error::CoreError;
use taskboard_core::validation::validate_id;
use taskboard_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Category";

/// GET /api/categories
///
/// All categories ordered by name, each with its `taskCount`.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::list(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    let category = CategoryRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    Ok(Json(DataResponse::new(category)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        category_id = %category.id,
        name = %category.name,
        "Category created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(category).with_message("Category created successfully")),
    ))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    let category = CategoryRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    tracing::info!(
        category_id = %category.id,
        name = %category.name,
        "Category updated",
    );

    Ok(Json(
        DataResponse::new(category).with_message("Category updated successfully"),
    ))
}

/// DELETE /api/categories/{id}
///
/// Refused while any task still references the category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    let category = CategoryRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    if !category.is_deletable() {
        tracing::warn!(
            category_id = %id,
            task_count = category.task_count,
            "Category delete blocked by referencing tasks",
        );
        return Err(CoreError::Integrity(category.deletion_blocked_message()).into());
    }

    // A task created between the count and the delete trips the foreign
    // key, which the error layer maps to the same 400.
    if !CategoryRepo::delete(&state.pool, &id).await? {
        return Err(CoreError::not_found(ENTITY, &id).into());
    }

    tracing::info!(category_id = %id, "Category deleted");

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
