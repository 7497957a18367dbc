//! Cross-origin policy for browser clients.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;

/// Explicit cross-origin allow-list injected into the router.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to call the API.
    pub allowed_origins: Vec<HeaderValue>,
    /// Methods allowed in cross-origin requests.
    pub allowed_methods: Vec<Method>,
    /// Whether credentials (cookies, auth headers) are allowed.
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// Build the policy from application config.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self {
            allowed_origins: config.allowed_origins()?,
            allowed_methods: config.allowed_methods()?,
            allow_credentials: config.cors_allow_credentials,
        })
    }

    /// Create the tower-http layer enforcing this policy.
    ///
    /// Request headers are mirrored rather than wildcarded so the policy stays
    /// valid when credentials are allowed.
    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.iter().cloned()))
            .allow_methods(AllowMethods::list(self.allowed_methods.iter().cloned()))
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials)
    }
}
