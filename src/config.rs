//! Application configuration loaded from environment variables.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port (overridden by the CLI positional argument).
    #[serde(default = "default_port")]
    pub port: u16,

    // === Upstream Configuration ===
    /// Overpass interpreter endpoint.
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// Total timeout for one Overpass request.
    #[serde(default = "default_overpass_timeout_ms")]
    pub overpass_timeout_ms: u64,

    /// Connect timeout for the Overpass host.
    #[serde(default = "default_overpass_connect_timeout_ms")]
    pub overpass_connect_timeout_ms: u64,

    /// Report non-2xx upstream statuses as errors instead of empty results.
    #[serde(default)]
    pub strict_upstream: bool,

    /// Search radius in meters when the request omits one.
    #[serde(default = "default_radius")]
    pub default_radius: i64,

    // === CORS ===
    /// Origins allowed to call the API from a browser.
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Methods allowed in cross-origin requests.
    #[serde(default = "default_cors_methods")]
    pub cors_allowed_methods: Vec<String>,

    /// Whether cross-origin requests may carry credentials.
    #[serde(default = "default_true")]
    pub cors_allow_credentials: bool,

    // === Observability ===
    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_overpass_url() -> String {
    "http://overpass-api.de/api/interpreter".to_string()
}

fn default_overpass_timeout_ms() -> u64 {
    25_000
}

fn default_overpass_connect_timeout_ms() -> u64 {
    5_000
}

fn default_radius() -> i64 {
    2000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:8080".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "OPTIONS".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            overpass_url: default_overpass_url(),
            overpass_timeout_ms: default_overpass_timeout_ms(),
            overpass_connect_timeout_ms: default_overpass_connect_timeout_ms(),
            strict_upstream: false,
            default_radius: default_radius(),
            cors_allowed_origins: default_cors_origins(),
            cors_allowed_methods: default_cors_methods(),
            cors_allow_credentials: true,
            metrics_enabled: true,
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.overpass_url.starts_with("http://") && !self.overpass_url.starts_with("https://")
        {
            return Err("OVERPASS_URL must be an http(s) URL".to_string());
        }

        if self.overpass_timeout_ms == 0 {
            return Err("OVERPASS_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.overpass_connect_timeout_ms == 0 {
            return Err("OVERPASS_CONNECT_TIMEOUT_MS must be greater than 0".to_string());
        }

        self.allowed_origins()?;
        self.allowed_methods()?;

        Ok(())
    }

    /// Total upstream request timeout.
    pub fn overpass_timeout(&self) -> Duration {
        Duration::from_millis(self.overpass_timeout_ms)
    }

    /// Upstream connect timeout.
    pub fn overpass_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.overpass_connect_timeout_ms)
    }

    /// Parse the configured CORS origins into header values.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_allowed_origins
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|origin| {
                if origin == "*" {
                    return Err("CORS_ALLOWED_ORIGINS must list origins explicitly".to_string());
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| format!("invalid CORS origin: {origin}"))
            })
            .collect()
    }

    /// Parse the configured CORS methods.
    pub fn allowed_methods(&self) -> Result<Vec<Method>, String> {
        self.cors_allowed_methods
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|method| {
                if method == "*" {
                    return Err("CORS_ALLOWED_METHODS must list methods explicitly".to_string());
                }
                Method::from_bytes(method.to_uppercase().as_bytes())
                    .map_err(|_| format!("invalid CORS method: {method}"))
            })
            .collect()
    }
}
