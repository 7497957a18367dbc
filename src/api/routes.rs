//! HTTP API route definitions.

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::overpass::OverpassClient;

use super::cors::CorsConfig;
use super::handlers::{clinics_hospitals, health, metrics, root, AppState};

/// Create the API router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/clinics_hospitals", get(clinics_hospitals))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(cors.layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire the upstream client, CORS policy and optional metrics from config.
pub fn router_from_config(
    config: &Config,
    metrics_handle: Option<PrometheusHandle>,
) -> crate::Result<Router> {
    let cors = CorsConfig::from_config(config).map_err(AppError::InvalidConfig)?;
    let client = OverpassClient::new(config)?;

    let mut state = AppState::new(client, config.default_radius);
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }

    Ok(create_router(state, &cors))
}
