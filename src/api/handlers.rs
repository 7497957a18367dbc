//! HTTP API handlers.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::UpstreamError;
use crate::facility::{self, FacilityResult};
use crate::overpass::{FacilityQuery, OverpassClient};

/// Message returned by the root endpoint.
pub const WELCOME_MESSAGE: &str = "Welcome to the Clinics and Hospitals API. Use /clinics_hospitals to find nearby clinics and hospitals.";

/// Message added when a search finds nothing.
pub const NO_RESULTS_MESSAGE: &str = "No clinics or hospitals found within the specified radius.";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream client.
    pub client: OverpassClient,
    /// Radius used when the request omits one.
    pub default_radius: i64,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(client: OverpassClient, default_radius: i64) -> Self {
        Self {
            client,
            default_radius,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Latitude of the location.
    pub latitude: f64,
    /// Longitude of the location.
    pub longitude: f64,
    /// Radius in meters to search for clinics/hospitals.
    pub radius: Option<i64>,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: &'static str,
}

/// Search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Normalized facilities in upstream order.
    pub results: Vec<FacilityResult>,
    /// Informational message, present only when nothing was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// Wrap results, adding the informational message when empty.
    pub fn from_results(results: Vec<FacilityResult>) -> Self {
        let message = results
            .is_empty()
            .then(|| NO_RESULTS_MESSAGE.to_string());
        Self { results, message }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Root handler - always returns the welcome message.
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: WELCOME_MESSAGE,
    })
}

/// Run one search against the upstream and shape the response body.
pub async fn search(
    client: &OverpassClient,
    query: &FacilityQuery,
) -> Result<SearchResponse, UpstreamError> {
    let results = facility::find_nearby(client, query).await?;
    Ok(SearchResponse::from_results(results))
}

/// Nearby clinics and hospitals handler.
#[instrument(
    skip_all,
    fields(latitude = params.latitude, longitude = params.longitude, radius = ?params.radius)
)]
pub async fn clinics_hospitals(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, UpstreamError> {
    let query = FacilityQuery::new(
        params.latitude,
        params.longitude,
        params.radius.unwrap_or(state.default_radius),
    );

    let response = search(&state.client, &query).await?;
    Ok(Json(response))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus scrape handler - 404 when metrics are disabled.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
