use std::sync::atomic::{AtomicUsize, Ordering};

use agromap_boundary::{
    EditorMount, GeocodeCandidate, Geocoder, SearchDispatch, SearchOutcome, SearchResponse,
};
use agromap_core::SearchError;
use async_trait::async_trait;

use crate::support::{mount, p};

struct FakeGeocoder {
    places: Vec<GeocodeCandidate>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    fn new(names: &[&str]) -> Self {
        let places = names
            .iter()
            .enumerate()
            .map(|(i, name)| GeocodeCandidate {
                lat: -21.0 - i as f64,
                lon: -47.0,
                display_name: name.to_string(),
            })
            .collect();
        Self {
            places,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, _query: &str, limit: usize) -> Result<Vec<GeocodeCandidate>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.places.iter().take(limit).cloned().collect())
    }
}

struct DownGeocoder;

#[async_trait]
impl Geocoder for DownGeocoder {
    async fn geocode(&self, _query: &str, _limit: usize) -> Result<Vec<GeocodeCandidate>, SearchError> {
        Err(SearchError::Http {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        })
    }
}

#[test]
fn test_coordinate_query_flies_immediately() {
    let mut h = mount(EditorMount::default());
    let dispatch = h.editor.search_location(" -21.17, -47.82 ");
    assert_eq!(dispatch, SearchDispatch::Resolved(p(-21.17, -47.82)));

    let flights = h.map.borrow().flights.clone();
    assert_eq!(flights, vec![(p(-21.17, -47.82), 15.0)]);
    assert!(h.editor.ring().is_empty());
}

#[test]
fn test_blank_query_rejected() {
    let mut h = mount(EditorMount::default());
    assert_eq!(
        h.editor.search_location(""),
        SearchDispatch::Rejected(SearchError::EmptyQuery)
    );
}

#[tokio::test]
async fn test_single_match_is_selected() {
    let mut h = mount(EditorMount::default());
    let geocoder = FakeGeocoder::new(&["Ribeirão Preto"]);

    let outcome = h.editor.search_with("Ribeirão Preto", &geocoder).await;
    assert!(matches!(outcome, SearchOutcome::Located(ref c) if c.display_name == "Ribeirão Preto"));
    assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.map.borrow().flights.len(), 1);
}

#[tokio::test]
async fn test_multiple_matches_offer_candidates() {
    let mut h = mount(EditorMount::default());
    let geocoder = FakeGeocoder::new(&["Santa Rita", "Santa Rita do Sapucaí", "Santa Rita d'Oeste"]);

    let outcome = h.editor.search_with("Santa Rita", &geocoder).await;
    assert!(matches!(outcome, SearchOutcome::Ambiguous(ref c) if c.len() == 3));
    assert_eq!(h.editor.candidates().len(), 3);
    assert!(h.map.borrow().flights.is_empty());

    assert_eq!(h.editor.select_candidate(1), Some(p(-22.0, -47.0)));
    assert!(h.editor.candidates().is_empty());
    assert_eq!(h.map.borrow().flights.len(), 1);
    assert_eq!(h.editor.select_candidate(0), None);
}

#[tokio::test]
async fn test_no_results_and_failures() {
    let mut h = mount(EditorMount::default());

    let outcome = h.editor.search_with("nowhere", &FakeGeocoder::new(&[])).await;
    assert_eq!(outcome, SearchOutcome::NoResults);

    let outcome = h.editor.search_with("anywhere", &DownGeocoder).await;
    assert!(matches!(
        outcome,
        SearchOutcome::Failed(SearchError::Http { status: Some(503), .. })
    ));
    assert!(h.map.borrow().flights.is_empty());
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut h = mount(EditorMount::default());
    let geocoder = FakeGeocoder::new(&["Franca"]);

    let SearchDispatch::Pending(first) = h.editor.search_location("Franca") else {
        panic!("expected a lookup");
    };
    let SearchDispatch::Pending(second) = h.editor.search_location("Batatais") else {
        panic!("expected a lookup");
    };

    // The newer request answers first; the older one is then ignored.
    let newer = second.execute(&geocoder).await;
    assert!(matches!(h.editor.apply_search_response(newer), SearchOutcome::Located(_)));

    let older = first.execute(&geocoder).await;
    assert_eq!(h.editor.apply_search_response(older), SearchOutcome::Stale);
    assert_eq!(h.map.borrow().flights.len(), 1);
}

#[test]
fn test_search_does_not_touch_ring() {
    let mut h = mount(EditorMount::default());
    h.editor.on_click(p(-20.0, -47.0));
    let before = h.emissions();

    let SearchDispatch::Pending(request) = h.editor.search_location("Franca") else {
        panic!("expected a lookup");
    };
    h.editor.on_click(p(-20.0, -47.01));
    let response = SearchResponse::new(request.seq(), Ok(Vec::new()));
    assert_eq!(h.editor.apply_search_response(response), SearchOutcome::NoResults);

    assert_eq!(h.editor.ring().len(), 2);
    assert_eq!(h.emissions(), before + 1);
}
