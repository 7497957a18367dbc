//! Nearby clinics and hospitals lookup service.
//!
//! This library proxies a coordinate search to the Overpass API and reshapes
//! the returned OpenStreetMap nodes into a short list of facilities:
//!
//! ```text
//! GET /clinics_hospitals?latitude=40.0&longitude=-75.0
//!   -> node[amenity=clinic|hospital](around:2000,40.0,-75.0)
//!   -> {"results": [{"name", "phone", "location", "map_link"}, ...]}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`overpass`]: Query construction and the Overpass client
//! - [`facility`]: Normalization of upstream elements
//! - [`api`]: HTTP API and CORS policy
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod facility;
pub mod metrics;
pub mod overpass;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result, UpstreamError};
