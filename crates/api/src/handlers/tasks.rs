//! Handlers for the task resource.
//!
//! Writes that reference a category check that it exists first so the
//! client gets a field-level `categoryId` error instead of a raw foreign
//! key failure.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgPool;
use taskboard_core::error::CoreError;
use taskboard_core::query::{TaskListParams, TaskQuery};
use taskboard_core::task::{CreateTask, UpdateTask};
use taskboard_core::validation::validate_id;
use taskboard_db::repositories::{CategoryRepo, TaskRepo};

use crate::error::AppResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Task";

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Reject a write whose `categoryId` does not name an existing category.
async fn ensure_category_exists(pool: &PgPool, category_id: Option<&str>) -> AppResult<()> {
    if let Some(id) = category_id {
        if !CategoryRepo::exists(pool, id).await? {
            return Err(CoreError::invalid("categoryId", "Category not found").into());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/tasks
///
/// List tasks with optional `category`, `status`, `priority` and `search`
/// filters, sorted by `sortBy`/`order`.
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let query = TaskQuery::from_params(&params)?;
    let tasks = TaskRepo::list(&state.pool, &query).await?;

    tracing::debug!(count = tasks.len(), ?query, "Listed tasks");

    Ok(Json(DataResponse::list(tasks)))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    let task = TaskRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    Ok(Json(DataResponse::new(task)))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateTask>,
) -> AppResult<impl IntoResponse> {
    let write = input.to_write();
    ensure_category_exists(&state.pool, write.category_id.as_deref()).await?;

    let task = TaskRepo::create(&state.pool, &write).await?;

    tracing::info!(
        task_id = %task.id,
        title = %task.title,
        priority = %task.priority,
        category_id = ?task.category_id,
        "Task created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(task).with_message("Task created successfully")),
    ))
}

/// PUT /api/tasks/{id}
///
/// Fields missing from the body keep their stored values, except `dueDate`
/// which is cleared.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    let existing = TaskRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    let write = input.apply_to(&existing);
    if write.category_id != existing.category_id {
        ensure_category_exists(&state.pool, write.category_id.as_deref()).await?;
    }

    let task = TaskRepo::update(&state.pool, &id, &write)
        .await?
        .ok_or_else(|| CoreError::not_found(ENTITY, &id))?;

    tracing::info!(
        task_id = %task.id,
        completed = task.completed,
        category_id = ?task.category_id,
        "Task updated",
    );

    Ok(Json(
        DataResponse::new(task).with_message("Task updated successfully"),
    ))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_id(&id)?;

    if !TaskRepo::delete(&state.pool, &id).await? {
        return Err(CoreError::not_found(ENTITY, &id).into());
    }

    tracing::info!(task_id = %id, "Task deleted");

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
