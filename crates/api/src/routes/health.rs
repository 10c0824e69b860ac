use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    pub database: StoreStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_count: Option<i64>,
}

/// GET /health -- liveness plus how many tasks and categories are stored.
/// Answers 503 while the database is unreachable.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (code, status, database) = match taskboard_db::store_counts(&state.pool).await {
        Ok(counts) => (
            StatusCode::OK,
            "ok",
            StoreStatus {
                reachable: true,
                task_count: Some(counts.tasks),
                category_count: Some(counts.categories),
            },
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not query the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "degraded",
                StoreStatus {
                    reachable: false,
                    task_count: None,
                    category_count: None,
                },
            )
        }
    };

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (code, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
