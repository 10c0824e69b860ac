use std::net::SocketAddr;
use std::time::Duration;

use taskboard_http::settings::{Settings, SettingsError};

/// Frontend server settings: `HOST` (`0.0.0.0`), `WEB_PORT` (`3000`),
/// `API_BASE_URL` (`http://localhost:3001`) and `REQUEST_TIMEOUT_SECS`
/// (`30`).
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Backend origin, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl WebConfig {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load(&Settings::from_process())
    }

    pub fn load<F>(settings: &Settings<F>) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = settings.string("API_BASE_URL", "http://localhost:3001");
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(SettingsError {
                name: "API_BASE_URL",
                value: api_base_url,
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }

        Ok(Self {
            host: settings.string("HOST", "0.0.0.0"),
            port: settings.parse("WEB_PORT", 3000)?,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: settings.parse("REQUEST_TIMEOUT_SECS", 30)?,
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
