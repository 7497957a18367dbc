//! HTTP API module for the search, root and operational endpoints.

pub mod cors;
pub mod handlers;
pub mod routes;

pub use cors::CorsConfig;
pub use handlers::{AppState, SearchResponse};
pub use routes::{create_router, router_from_config};
