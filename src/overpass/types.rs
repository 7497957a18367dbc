//! Overpass API response types.

use std::collections::HashMap;

use serde::Deserialize;

/// Raw Overpass API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    /// Returned elements, in upstream order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single element from Overpass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    /// Element kind (`node`, `way`, `relation`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// OSM identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// Latitude in degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub lon: Option<f64>,
    /// OSM tags; frequently absent.
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

impl Element {
    /// Look up a tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key).map(String::as_str)
    }
}
