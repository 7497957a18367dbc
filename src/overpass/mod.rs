//! Overpass API access.
//!
//! This module handles:
//! - Building the Overpass QL for a nearby-facility search
//! - Sending it to the interpreter endpoint
//! - Decoding the `elements` payload

pub mod client;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use query::FacilityQuery;
pub use types::{Element, OverpassResponse};
