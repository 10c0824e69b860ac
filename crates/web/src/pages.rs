//! Page handlers for the task board and category management.
//!
//! Every request loads the authoritative lists from the backend. Form posts
//! send the mutation first and merge only the record the backend returns;
//! a failed mutation leaves the loaded state untouched and shows a notice.

use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use taskboard_core::board::{FilterState, TaskBoard};

use crate::error::WebError;
use crate::forms::{BoardParams, CategoryForm, TaskForm};
use crate::render::{self, Notice};
use crate::state::WebState;

/// Page routes.
///
/// ```text
/// GET  /                        task board (?search&status&category&priority&sortBy&order&edit)
/// POST /tasks                   create task
/// POST /tasks/{id}              update task
/// POST /tasks/{id}/toggle       flip completed
/// POST /tasks/{id}/delete       delete task
/// GET  /categories              category management (?edit)
/// POST /categories              create category
/// POST /categories/{id}         update category
/// POST /categories/{id}/delete  delete category
/// ```
pub fn router() -> Router<WebState> {
    Router::new()
        .route("/", get(board))
        .route("/tasks", post(create_task))
        .route("/tasks/{id}", post(update_task))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/tasks/{id}/delete", post(delete_task))
        .route("/categories", get(categories).post(create_category))
        .route("/categories/{id}", post(update_category))
        .route("/categories/{id}/delete", post(delete_category))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn fetch_board(state: &WebState, filter: FilterState) -> Result<TaskBoard, WebError> {
    let (tasks, categories) = tokio::try_join!(
        state.backend.list_tasks(),
        state.backend.list_categories()
    )?;
    Ok(TaskBoard::new(tasks, categories, filter))
}

/// Load the board, or an empty one plus an error notice when the backend
/// cannot be read.
async fn load_board(state: &WebState, filter: FilterState) -> Result<TaskBoard, Notice> {
    fetch_board(state, filter).await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to load task board");
        Notice::Error(e.user_message())
    })
}

fn failed(action: &'static str, err: WebError) -> Notice {
    tracing::warn!(action, error = %err, "Backend mutation failed");
    Notice::Error(err.user_message())
}

fn render_board(board: &TaskBoard, edit: Option<&str>, notice: Option<Notice>) -> Html<String> {
    let editing = edit.and_then(|id| board.task(id));
    Html(render::board_page(board, editing, notice.as_ref()))
}

fn render_unavailable(filter: FilterState, notice: Notice) -> Html<String> {
    let board = TaskBoard {
        filter,
        ..Default::default()
    };
    render_board(&board, None, Some(notice))
}

/// Load the board, apply `mutate` to it, and render the result.
macro_rules! with_board {
    ($state:expr, $params:expr, |$board:ident| $mutate:expr) => {{
        let filter = $params.filter_state();
        match load_board(&$state, filter.clone()).await {
            Ok(mut $board) => {
                let notice: Notice = $mutate;
                render_board(&$board, None, Some(notice))
            }
            Err(notice) => render_unavailable(filter, notice),
        }
    }};
}

// ---------------------------------------------------------------------------
// Task board
// ---------------------------------------------------------------------------

/// GET /
async fn board(State(state): State<WebState>, Query(params): Query<BoardParams>) -> Html<String> {
    let filter = params.filter_state();
    match load_board(&state, filter.clone()).await {
        Ok(board) => render_board(&board, params.edit.as_deref(), None),
        Err(notice) => render_unavailable(filter, notice),
    }
}

/// POST /tasks
async fn create_task(
    State(state): State<WebState>,
    Query(params): Query<BoardParams>,
    Form(form): Form<TaskForm>,
) -> Html<String> {
    with_board!(state, params, |board| {
        match state.backend.create_task(&form.to_create()).await {
            Ok(task) => {
                tracing::info!(task_id = %task.id, "Task created");
                board.upsert_task(task);
                Notice::Success("Task created".into())
            }
            Err(e) => failed("create_task", e),
        }
    })
}

/// POST /tasks/{id}
async fn update_task(
    State(state): State<WebState>,
    Path(id): Path<String>,
    Query(params): Query<BoardParams>,
    Form(form): Form<TaskForm>,
) -> Html<String> {
    with_board!(state, params, |board| {
        match state.backend.update_task(&id, &form.to_update()).await {
            Ok(task) => {
                tracing::info!(task_id = %task.id, "Task updated");
                board.upsert_task(task);
                Notice::Success("Task updated".into())
            }
            Err(e) => failed("update_task", e),
        }
    })
}

/// POST /tasks/{id}/toggle
async fn toggle_task(
    State(state): State<WebState>,
    Path(id): Path<String>,
    Query(params): Query<BoardParams>,
) -> Html<String> {
    with_board!(state, params, |board| {
        match board.task(&id).map(taskboard_core::task::UpdateTask::toggle) {
            None => Notice::Error("Task not found".into()),
            Some(update) => match state.backend.update_task(&id, &update).await {
                Ok(task) => {
                    let message = if task.completed {
                        "Task completed"
                    } else {
                        "Task reopened"
                    };
                    board.upsert_task(task);
                    Notice::Success(message.into())
                }
                Err(e) => failed("toggle_task", e),
            },
        }
    })
}

/// POST /tasks/{id}/delete
async fn delete_task(
    State(state): State<WebState>,
    Path(id): Path<String>,
    Query(params): Query<BoardParams>,
) -> Html<String> {
    with_board!(state, params, |board| {
        match state.backend.delete_task(&id).await {
            Ok(()) => {
                tracing::info!(task_id = %id, "Task deleted");
                board.remove_task(&id);
                Notice::Success("Task deleted".into())
            }
            Err(e) => failed("delete_task", e),
        }
    })
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct CategoryParams {
    #[serde(default)]
    edit: Option<String>,
}

async fn load_categories(state: &WebState) -> Result<TaskBoard, Notice> {
    match state.backend.list_categories().await {
        Ok(categories) => Ok(TaskBoard {
            categories,
            ..Default::default()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load categories");
            Err(Notice::Error(e.user_message()))
        }
    }
}

fn render_categories(board: &TaskBoard, edit: Option<&str>, notice: Option<Notice>) -> Html<String> {
    let editing = edit.and_then(|id| board.category(id));
    Html(render::categories_page(
        &board.categories,
        editing,
        notice.as_ref(),
    ))
}

/// Load categories, apply `mutate`, and render the category page.
macro_rules! with_categories {
    ($state:expr, |$board:ident| $mutate:expr) => {{
        match load_categories(&$state).await {
            Ok(mut $board) => {
                let notice: Notice = $mutate;
                render_categories(&$board, None, Some(notice))
            }
            Err(notice) => render_categories(&TaskBoard::default(), None, Some(notice)),
        }
    }};
}

/// GET /categories
async fn categories(
    State(state): State<WebState>,
    Query(params): Query<CategoryParams>,
) -> Html<String> {
    match load_categories(&state).await {
        Ok(board) => render_categories(&board, params.edit.as_deref(), None),
        Err(notice) => render_categories(&TaskBoard::default(), None, Some(notice)),
    }
}

/// POST /categories
async fn create_category(
    State(state): State<WebState>,
    Form(form): Form<CategoryForm>,
) -> Html<String> {
    with_categories!(state, |board| {
        match state.backend.create_category(&form.to_input()).await {
            Ok(category) => {
                tracing::info!(category_id = %category.id, "Category created");
                board.upsert_category(category);
                Notice::Success("Category created".into())
            }
            Err(e) => failed("create_category", e),
        }
    })
}

/// POST /categories/{id}
async fn update_category(
    State(state): State<WebState>,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> Html<String> {
    with_categories!(state, |board| {
        match state.backend.update_category(&id, &form.to_input()).await {
            Ok(category) => {
                tracing::info!(category_id = %category.id, "Category updated");
                board.upsert_category(category);
                Notice::Success("Category updated".into())
            }
            Err(e) => failed("update_category", e),
        }
    })
}

/// POST /categories/{id}/delete
async fn delete_category(
    State(state): State<WebState>,
    Path(id): Path<String>,
) -> Html<String> {
    with_categories!(state, |board| {
        match state.backend.delete_category(&id).await {
            Ok(()) => {
                tracing::info!(category_id = %id, "Category deleted");
                board.remove_category(&id);
                Notice::Success("Category deleted".into())
            }
            Err(e) => failed("delete_category", e),
        }
    })
}
