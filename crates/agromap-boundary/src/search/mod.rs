//! Location search.
//!
//! A query that is a strict decimal `"lat, lon"` pair resolves on the spot.
//! Anything else becomes a [`SearchRequest`] for a [`Geocoder`]. Requests are
//! numbered, and only the response to the most recent one is applied.

mod geocoder;
mod nominatim;

pub use geocoder::{GeocodeCandidate, Geocoder};
pub use nominatim::NominatimGeocoder;

use agromap_core::{LatLng, SearchError};
use regex::Regex;
use std::sync::OnceLock;

/// Parses a strict decimal `"lat, lon"` pair. Out-of-range values are rejected.
pub fn parse_coordinates(query: &str) -> Option<LatLng> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$")
            .expect("coordinate pattern is valid")
    });

    let caps = re.captures(query)?;
    let lat = caps[1].parse::<f64>().ok()?;
    let lng = caps[2].parse::<f64>().ok()?;
    let position = LatLng::new(lat, lng);
    position.is_valid().then_some(position)
}

/// What a search query turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Coordinates(LatLng),
    Lookup(SearchRequest),
}

/// A geocoder lookup waiting to be executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    seq: u64,
    pub text: String,
    pub limit: usize,
}

impl SearchRequest {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Runs the lookup. Errors are carried in the response, not returned.
    pub async fn execute(&self, geocoder: &dyn Geocoder) -> SearchResponse {
        let result = geocoder.geocode(&self.text, self.limit).await;
        SearchResponse::new(self.seq, result)
    }
}

/// Result of a [`SearchRequest`], tagged with the request's sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    seq: u64,
    pub result: Result<Vec<GeocodeCandidate>, SearchError>,
}

impl SearchResponse {
    pub fn new(seq: u64, result: Result<Vec<GeocodeCandidate>, SearchError>) -> Self {
        Self { seq, result }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// How a response was resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Exactly one match
    Located(GeocodeCandidate),
    /// Several matches; the user picks one
    Ambiguous(Vec<GeocodeCandidate>),
    NoResults,
    Failed(SearchError),
    /// Superseded by a newer query and discarded
    Stale,
}

/// Sequencing for location searches.
#[derive(Debug, Clone)]
pub struct LocationSearch {
    limit: usize,
    last_seq: u64,
    pending: Option<u64>,
}

impl LocationSearch {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            last_seq: 0,
            pending: None,
        }
    }

    /// Starts a search. Any lookup still in flight becomes stale.
    pub fn begin(&mut self, query: &str) -> Result<SearchQuery, SearchError> {
        let text = query.trim();
        if text.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        self.last_seq += 1;
        if let Some(position) = parse_coordinates(text) {
            self.pending = None;
            return Ok(SearchQuery::Coordinates(position));
        }

        self.pending = Some(self.last_seq);
        tracing::debug!("Search #{} for {:?}", self.last_seq, text);
        Ok(SearchQuery::Lookup(SearchRequest {
            seq: self.last_seq,
            text: text.to_string(),
            limit: self.limit,
        }))
    }

    /// Resolves a response. Only the latest pending request is honoured.
    pub fn complete(&mut self, response: SearchResponse) -> SearchOutcome {
        if self.pending != Some(response.seq) {
            tracing::warn!(
                "Discarding stale search response #{} (latest #{})",
                response.seq,
                self.last_seq
            );
            return SearchOutcome::Stale;
        }
        self.pending = None;

        match response.result {
            Err(e) => {
                tracing::warn!("Search #{} failed: {}", response.seq, e);
                SearchOutcome::Failed(e)
            }
            Ok(candidates) if candidates.is_empty() => SearchOutcome::NoResults,
            Ok(mut candidates) if candidates.len() == 1 => {
                SearchOutcome::Located(candidates.remove(0))
            }
            Ok(candidates) => SearchOutcome::Ambiguous(candidates),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for LocationSearch {
    fn default() -> Self {
        Self::new(5)
    }
}
