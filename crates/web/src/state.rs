use std::sync::Arc;

use crate::client::BackendClient;
use crate::config::WebConfig;

/// Shared frontend state available to all handlers via `State<WebState>`.
#[derive(Clone)]
pub struct WebState {
    /// Client for the backend API. Cloning shares the connection pool.
    pub backend: BackendClient,
    pub config: Arc<WebConfig>,
}

impl WebState {
    pub fn new(config: WebConfig) -> Self {
        Self {
            backend: BackendClient::new(config.api_base_url.clone()),
            config: Arc::new(config),
        }
    }
}
