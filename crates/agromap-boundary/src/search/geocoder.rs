//! Geocoding collaborator interface.

use agromap_core::{LatLng, SearchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A place returned by a geocoder, best match first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl GeocodeCandidate {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

/// Free-text place lookup.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns up to `limit` ranked candidates for `query`.
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<GeocodeCandidate>, SearchError>;
}
