//! Nominatim-compatible HTTP geocoder.

use agromap_core::SearchError;
use agromap_settings::SearchSettings;
use async_trait::async_trait;
use serde::Deserialize;

use super::{GeocodeCandidate, Geocoder};

/// Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocoder backed by a Nominatim `/search` endpoint.
///
/// No timeout is set here; the HTTP client's defaults apply.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(http_error)?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str, limit: usize) -> Result<Vec<GeocodeCandidate>, SearchError> {
        let limit = limit.to_string();
        tracing::debug!("Geocoding {:?} via {}", query, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        parse_places(&body)
    }
}

fn http_error(error: reqwest::Error) -> SearchError {
    SearchError::Http {
        status: error.status().map(|s| s.as_u16()),
        message: error.to_string(),
    }
}

pub(crate) fn parse_places(body: &str) -> Result<Vec<GeocodeCandidate>, SearchError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;

    let candidates = places
        .into_iter()
        .map(|place| {
            let lat = place.lat.parse::<f64>();
            let lon = place.lon.parse::<f64>();
            match (lat, lon) {
                (Ok(lat), Ok(lon)) => Ok(GeocodeCandidate {
                    lat,
                    lon,
                    display_name: place.display_name,
                }),
                _ => Err(SearchError::Decode(format!(
                    "bad coordinates for {:?}",
                    place.display_name
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(candidates
        .into_iter()
        .filter(|candidate| {
            let valid = candidate.position().is_valid();
            if !valid {
                tracing::warn!("Dropping out-of-range place {:?}", candidate.display_name);
            }
            valid
        })
        .collect())
}
