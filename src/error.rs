//! Unified error types for the clinic locator.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures talking to the Overpass API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout.
    #[error("overpass request timed out")]
    Timeout,

    /// Connection, DNS or transport failure.
    #[error("overpass unreachable: {0}")]
    Unavailable(String),

    /// Non-2xx status, surfaced only in strict mode.
    #[error("overpass returned HTTP {status}")]
    Status {
        /// Status code returned by the upstream.
        status: u16,
    },

    /// The body was not the expected JSON document.
    #[error("invalid overpass response: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// Classify a transport error from reqwest.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }

    /// Stable machine-readable code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout => "upstream_timeout",
            Self::Unavailable(_) => "upstream_unavailable",
            Self::Status { .. } => "upstream_status",
            Self::InvalidResponse(_) => "upstream_invalid_response",
        }
    }

    /// HTTP status reported to clients.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let err = UpstreamError::Timeout;
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.code(), "upstream_timeout");
    }

    #[test]
    fn other_failures_map_to_bad_gateway() {
        for err in [
            UpstreamError::Unavailable("refused".to_string()),
            UpstreamError::Status { status: 503 },
            UpstreamError::InvalidResponse("eof".to_string()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn status_error_message_includes_code() {
        let err = UpstreamError::Status { status: 429 };
        assert_eq!(err.to_string(), "overpass returned HTTP 429");
    }
}
