use agromap_boundary::geometry::{
    self, circle_ring, close_ring, ring_area_m2, to_feature, try_difference, CutResult,
    OVERLAP_TOLERANCE_M2,
};
use agromap_core::{GeometryError, LatLng};
use proptest::prelude::*;

use crate::support::{field, p, square, square_feature};

#[test]
fn test_small_square_feature() {
    let feature = to_feature(&field()).unwrap();
    let exterior = feature.exterior();
    assert_eq!(exterior.len(), 5);
    assert_eq!(exterior.first(), exterior.last());
    assert_eq!(exterior[1], [-47.01, -20.0]);
}

#[test]
fn test_incomplete_ring_has_no_feature() {
    assert!(to_feature(&[]).is_none());
    assert!(to_feature(&field()[..2]).is_none());
}

#[test]
fn test_no_context_is_always_contained() {
    let feature = to_feature(&field()).unwrap();
    assert!(geometry::validate_against_context(&feature, None));
}

#[test]
fn test_context_containment() {
    let parent = square_feature(0.0, 0.0, 0.01);

    assert!(geometry::validate_against_context(
        &square_feature(0.002, 0.002, 0.001),
        Some(&parent)
    ));
    // Shares two edges with the parent.
    assert!(geometry::validate_against_context(
        &square_feature(0.0, 0.0, 0.005),
        Some(&parent)
    ));
    assert!(!geometry::validate_against_context(
        &square_feature(0.008, 0.008, 0.005),
        Some(&parent)
    ));
    assert!(!geometry::validate_against_context(
        &square_feature(1.0, 1.0, 0.005),
        Some(&parent)
    ));
}

#[test]
fn test_sibling_overlap_tolerance() {
    let feature = square_feature(0.0, 0.0, 0.001);

    // Sliver of about 1 m² along a shared edge.
    let sliver = square_feature(0.0, 0.001 - 1e-7, 0.001);
    assert!(geometry::validate_against_siblings(
        &feature,
        &[sliver],
        OVERLAP_TOLERANCE_M2
    ));

    let overlapping = square_feature(0.0005, 0.0005, 0.001);
    assert!(!geometry::validate_against_siblings(
        &feature,
        &[overlapping],
        OVERLAP_TOLERANCE_M2
    ));

    let far = square_feature(5.0, 5.0, 0.001);
    assert!(geometry::validate_against_siblings(
        &feature,
        &[far],
        OVERLAP_TOLERANCE_M2
    ));
}

#[test]
fn test_degenerate_feature_with_no_siblings() {
    let a = p(-20.0, -47.0);
    let degenerate = to_feature(&[a, a, p(-20.0, -47.01)]).unwrap();
    assert!(degenerate.to_polygon().is_err());
    assert!(geometry::validate_against_siblings(
        &degenerate,
        &[],
        OVERLAP_TOLERANCE_M2
    ));
}

#[test]
fn test_cut_corner_keeps_single_polygon() {
    let main = to_feature(&field()).unwrap();
    let cutter = square_feature(-20.005, -47.005, 0.015);

    let result = try_difference(&main, &cutter).unwrap();
    let CutResult::Polygon(piece) = &result else {
        panic!("expected a single polygon, got {result:?}");
    };

    let corner = ring_area_m2(&square(-20.005, -47.005, 0.005));
    let expected = main.area_m2().unwrap() - corner;
    let actual = piece.area_m2().unwrap();
    assert!(
        (actual - expected).abs() < expected * 1e-3,
        "expected {expected}, got {actual}"
    );

    let ring = result.into_outer_ring();
    assert!(ring.len() >= 6);
}

#[test]
fn test_cut_through_middle_keeps_largest_piece() {
    let main = to_feature(&field()).unwrap();
    let band = to_feature(&[
        p(-20.02, -47.004),
        p(-20.02, -47.003),
        p(-19.99, -47.003),
        p(-19.99, -47.004),
    ])
    .unwrap();

    let result = try_difference(&main, &band).unwrap();
    assert!(matches!(&result, CutResult::MultiPolygon(pieces) if pieces.len() == 2));

    let ring = result.into_outer_ring();
    assert!(ring.is_closable());
    assert!(ring.points().iter().all(|q| q.lng <= -47.004 + 1e-9));
}

#[test]
fn test_self_intersecting_cutter_is_rejected() {
    let main = to_feature(&field()).unwrap();
    let bow_tie = to_feature(&[
        p(-20.0, -47.0),
        p(-20.01, -47.01),
        p(-20.0, -47.01),
        p(-20.01, -47.0),
    ])
    .unwrap();
    assert_eq!(
        try_difference(&main, &bow_tie),
        Err(GeometryError::SelfIntersecting)
    );
    assert!(geometry::difference(&main, &bow_tie).is_none());
}

#[test]
fn test_simplify_ring_keeps_corners() {
    let mut ring = Vec::new();
    for corner in field().windows(2) {
        let (a, b) = (corner[0], corner[1]);
        for i in 0..10 {
            let t = i as f64 / 10.0;
            ring.push(p(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t));
        }
    }
    ring.push(field()[3]);

    let reduced = geometry::try_simplify_ring(&ring, 2.5).unwrap();
    assert_eq!(reduced.len(), 4);
}

#[test]
fn test_circle_area() {
    let ring = circle_ring(p(-20.0, -47.0), 100.0, 64);
    let area = ring_area_m2(&ring);
    let expected = std::f64::consts::PI * 100.0 * 100.0;
    assert!((area - expected).abs() < expected * 0.01, "area = {area}");
}

#[test]
fn test_smooth_keeps_area_close() {
    let ring = field();
    let rounded = geometry::smooth(&ring).unwrap();
    let before = ring_area_m2(&ring);
    let after = ring_area_m2(&rounded);
    assert!(after > before && after < before * 1.5, "{before} -> {after}");
}

fn ring_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<LatLng>> {
    prop::collection::vec((-80.0f64..80.0, -170.0f64..170.0), min..max)
        .prop_map(|pairs| pairs.into_iter().map(LatLng::from).collect())
}

proptest! {
    #[test]
    fn closed_ring_repeats_first_point(ring in ring_strategy(3, 40)) {
        let closed = close_ring(&ring).unwrap();
        prop_assert_eq!(closed.len(), ring.len() + 1);
        prop_assert_eq!(closed.first(), closed.last());

        let feature = to_feature(&ring).unwrap();
        prop_assert_eq!(feature.exterior().len(), ring.len() + 1);
        prop_assert_eq!(feature.exterior().first(), feature.exterior().last());
    }

    #[test]
    fn short_ring_has_no_feature(ring in ring_strategy(0, 3)) {
        prop_assert!(to_feature(&ring).is_none());
    }
}
