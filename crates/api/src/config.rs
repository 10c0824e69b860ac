use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use taskboard_http::settings::{Settings, SettingsError};

/// API server settings.
///
/// `HOST` (`0.0.0.0`), `PORT` (`3001`), `CORS_ORIGINS` (comma-separated,
/// `http://localhost:3000`), `REQUEST_TIMEOUT_SECS` (`30`) and
/// `SEED_DEMO_DATA` (off). `DATABASE_URL` is read separately by `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<HeaderValue>,
    pub request_timeout_secs: u64,
    /// Insert demo categories and tasks into an empty database at startup.
    pub seed_demo_data: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load(&Settings::from_process())
    }

    pub fn load<F>(settings: &Settings<F>) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origins = settings
            .list("CORS_ORIGINS", "http://localhost:3000")
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|e| SettingsError {
                    name: "CORS_ORIGINS",
                    reason: e.to_string(),
                    value: origin,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            host: settings.string("HOST", "0.0.0.0"),
            port: settings.parse("PORT", 3001)?,
            cors_origins,
            request_timeout_secs: settings.parse("REQUEST_TIMEOUT_SECS", 30)?,
            seed_demo_data: settings.flag("SEED_DEMO_DATA"),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| SettingsError {
            name: "HOST",
            reason: e.to_string(),
            value: addr,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
