//! Nearby clinic and hospital search.

pub mod normalize;
pub mod types;

pub use normalize::{generate_map_link, normalize_element, normalize_elements};
pub use types::FacilityResult;

use tracing::{info, instrument};

use crate::error::UpstreamError;
use crate::metrics;
use crate::overpass::{FacilityQuery, OverpassClient};

/// Fetch facilities around a point and normalize them.
#[instrument(skip(client))]
pub async fn find_nearby(
    client: &OverpassClient,
    query: &FacilityQuery,
) -> Result<Vec<FacilityResult>, UpstreamError> {
    let elements = client.fetch_elements(query).await?;
    let results = normalize_elements(&elements);

    metrics::record_search(results.len());
    info!(count = results.len(), "Facility search completed");

    Ok(results)
}
