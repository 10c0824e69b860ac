//! Frontend router builder shared by `main.rs` and integration tests.

use axum::Router;
use taskboard_http::layers::with_service_layers;

use crate::state::WebState;
use crate::{pages, proxy};

/// Pages plus the `/api/*` proxy. Both share one origin, so unlike the
/// API server no CORS layer is added.
pub fn build_web_router(state: WebState) -> Router {
    let routes = Router::new().merge(pages::router()).merge(proxy::router());
    with_service_layers(routes, state.config.request_timeout()).with_state(state)
}
