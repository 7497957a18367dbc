//! Facility result types returned to clients.

use serde::{Deserialize, Serialize};

/// A simplified clinic or hospital record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityResult {
    /// Facility name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Human-readable coordinates.
    pub location: String,
    /// Link that opens the facility on a map.
    pub map_link: String,
}
