//! Geometry engine.
//!
//! Stateless operations on rings and polygon features: closing, containment
//! and overlap validation, boolean difference, simplification and smoothing.
//! Planar operations run on raw degrees (x = longitude, y = latitude); areas
//! and distances are geodesic.
//!
//! Nothing here panics on bad input. Degenerate or self-intersecting rings
//! yield `None`/`false`, or a [`GeometryError`] from the `try_` variants.

mod feature;
mod ring;
mod smooth;

pub use feature::{PolygonFeature, PolygonGeometry};
pub use ring::{Ring, MIN_RING_POINTS};
pub use smooth::catmull_rom_closed;

use agromap_core::{meters_to_degrees, GeometryError, LatLng};
use geo::algorithm::line_intersection::line_intersection;
use geo::{
    Area, BooleanOps, BoundingRect, ChamberlainDuquetteArea, Contains, Coord, HaversineDestination,
    HaversineDistance, Intersects, Line, LineString, Point, Simplify,
};

/// Intersection area with a sibling above which the shapes count as overlapping.
pub const OVERLAP_TOLERANCE_M2: f64 = 10.0;

/// Douglas-Peucker tolerance for freehand input.
pub const SIMPLIFY_TOLERANCE_M: f64 = 2.5;

/// Vertices in a tessellated circle.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Spline samples per ring edge when smoothing.
pub const SMOOTH_SAMPLES_PER_SEGMENT: usize = 8;

/// Area allowed outside the parent when vertices sit on its edge.
const CONTAINMENT_SLACK_M2: f64 = 1.0;

/// Appends the first point to the end. `None` for fewer than 3 points.
pub fn close_ring(ring: &[LatLng]) -> Option<Vec<LatLng>> {
    if ring.len() < MIN_RING_POINTS {
        return None;
    }
    let mut closed = Vec::with_capacity(ring.len() + 1);
    closed.extend_from_slice(ring);
    closed.push(ring[0]);
    Some(closed)
}

/// Wraps the closed ring in a feature with `[lng, lat]` coordinates.
pub fn to_feature(ring: &[LatLng]) -> Option<PolygonFeature> {
    close_ring(ring).map(|closed| PolygonFeature::from_closed_ring(&closed))
}

/// `true` if `feature` lies within `context`, or if there is no context.
///
/// Shared boundary edges count as contained.
pub fn validate_against_context(feature: &PolygonFeature, context: Option<&PolygonFeature>) -> bool {
    let Some(context) = context else {
        return true;
    };
    let Ok(inner) = feature.to_polygon() else {
        return false;
    };
    let outer = match context.to_polygon() {
        Ok(polygon) => polygon,
        Err(e) => {
            tracing::warn!("Ignoring malformed context polygon: {}", e);
            return true;
        }
    };

    if outer.contains(&inner) {
        return true;
    }

    // Vertices placed on the parent edge can land a hair outside it.
    match guarded("containment", || inner.difference(&outer)) {
        Ok(outside) => {
            let outside_m2 = outside.chamberlain_duquette_unsigned_area();
            let inner_m2 = inner.chamberlain_duquette_unsigned_area();
            outside_m2 <= CONTAINMENT_SLACK_M2 && outside_m2 < inner_m2 * 0.01
        }
        Err(e) => {
            tracing::warn!("Containment check failed: {}", e);
            false
        }
    }
}

/// `true` unless `feature` overlaps some sibling by more than `tolerance_m2`.
pub fn validate_against_siblings(
    feature: &PolygonFeature,
    siblings: &[PolygonFeature],
    tolerance_m2: f64,
) -> bool {
    if siblings.is_empty() {
        return true;
    }
    let Ok(polygon) = feature.to_polygon() else {
        return false;
    };
    let bounds = polygon.bounding_rect();

    siblings.iter().all(|sibling| {
        let other = match sibling.to_polygon() {
            Ok(other) => other,
            Err(e) => {
                tracing::warn!("Skipping malformed sibling polygon: {}", e);
                return true;
            }
        };
        if let (Some(a), Some(b)) = (bounds, other.bounding_rect()) {
            if !a.intersects(&b) {
                return true;
            }
        }
        match guarded("intersection", || polygon.intersection(&other)) {
            Ok(shared) => shared.chamberlain_duquette_unsigned_area() <= tolerance_m2,
            Err(e) => {
                tracing::warn!("Overlap check failed: {}", e);
                false
            }
        }
    })
}

/// Result of subtracting a cutter from a polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum CutResult {
    /// The cut left a single piece.
    Polygon(PolygonFeature),
    /// The cut split the shape into several pieces.
    MultiPolygon(Vec<PolygonFeature>),
}

impl CutResult {
    pub fn pieces(&self) -> &[PolygonFeature] {
        match self {
            Self::Polygon(feature) => std::slice::from_ref(feature),
            Self::MultiPolygon(features) => features,
        }
    }

    /// Exterior ring of the largest piece, open and in `(lat, lng)` order.
    ///
    /// The editor tracks a single outer ring, so smaller pieces and any holes
    /// are discarded.
    pub fn into_outer_ring(self) -> Ring {
        let largest = self.pieces().iter().max_by(|a, b| {
            let area_a = a.area_m2().unwrap_or(0.0);
            let area_b = b.area_m2().unwrap_or(0.0);
            area_a.total_cmp(&area_b)
        });
        Ring::from_points(largest.map(PolygonFeature::exterior_positions).unwrap_or_default())
    }
}

/// Boolean subtraction of `cutter` from `main`.
pub fn try_difference(
    main: &PolygonFeature,
    cutter: &PolygonFeature,
) -> Result<CutResult, GeometryError> {
    let main = main.to_polygon()?;
    let cutter = cutter.to_polygon()?;
    ensure_simple(main.exterior())?;
    ensure_simple(cutter.exterior())?;

    let result = guarded("difference", || main.difference(&cutter))?;
    let mut pieces: Vec<PolygonFeature> = result
        .0
        .iter()
        .filter(|p| p.exterior().0.len() > MIN_RING_POINTS && p.unsigned_area() > 0.0)
        .map(PolygonFeature::from_polygon)
        .collect();

    match pieces.len() {
        0 => Err(GeometryError::EmptyResult),
        1 => Ok(CutResult::Polygon(pieces.remove(0))),
        _ => Ok(CutResult::MultiPolygon(pieces)),
    }
}

/// Boolean subtraction of `cutter` from `main`; `None` on any failure.
pub fn difference(main: &PolygonFeature, cutter: &PolygonFeature) -> Option<CutResult> {
    try_difference(main, cutter)
        .map_err(|e| tracing::warn!("Difference failed: {}", e))
        .ok()
}

/// Douglas-Peucker reduction of an open point sequence. Endpoints are kept.
pub fn simplify(points: &[LatLng], tolerance_m: f64) -> Vec<LatLng> {
    if points.len() < MIN_RING_POINTS {
        return points.to_vec();
    }
    let line = to_line_string(points);
    let epsilon = meters_to_degrees(tolerance_m);
    from_coords(line.simplify(&epsilon).coords())
}

/// Douglas-Peucker reduction of an open ring, treating it as closed.
pub fn try_simplify_ring(ring: &[LatLng], tolerance_m: f64) -> Result<Vec<LatLng>, GeometryError> {
    let closed = close_ring(ring).ok_or(GeometryError::DegenerateRing { points: ring.len() })?;
    let mut reduced = simplify(&closed, tolerance_m);
    reduced.pop();
    if reduced.len() < MIN_RING_POINTS {
        return Err(GeometryError::DegenerateRing {
            points: reduced.len(),
        });
    }
    Ok(reduced)
}

/// Spline rounding followed by a simplification pass to bound point count.
pub fn try_smooth(
    ring: &[LatLng],
    samples_per_segment: usize,
    tolerance_m: f64,
) -> Result<Vec<LatLng>, GeometryError> {
    if ring.len() < MIN_RING_POINTS {
        return Err(GeometryError::DegenerateRing { points: ring.len() });
    }
    let curve = catmull_rom_closed(ring, samples_per_segment);
    try_simplify_ring(&curve, tolerance_m)
}

/// Spline rounding with default sampling and tolerance; `None` if degenerate.
pub fn smooth(ring: &[LatLng]) -> Option<Vec<LatLng>> {
    try_smooth(ring, SMOOTH_SAMPLES_PER_SEGMENT, SIMPLIFY_TOLERANCE_M)
        .map_err(|e| tracing::warn!("Smoothing failed: {}", e))
        .ok()
}

/// Tessellates a geodesic circle into an open ring of `segments` points.
pub fn circle_ring(center: LatLng, radius_m: f64, segments: usize) -> Vec<LatLng> {
    let origin = Point::new(center.lng, center.lat);
    (0..segments)
        .map(|i| {
            let bearing = 360.0 * i as f64 / segments as f64;
            let p = origin.haversine_destination(bearing, radius_m);
            LatLng::new(p.y(), p.x())
        })
        .collect()
}

/// Great-circle distance in metres.
pub fn distance_m(a: LatLng, b: LatLng) -> f64 {
    Point::new(a.lng, a.lat).haversine_distance(&Point::new(b.lng, b.lat))
}

/// Geodesic area of an open ring in square metres; 0 when incomplete.
pub fn ring_area_m2(ring: &[LatLng]) -> f64 {
    to_feature(ring).and_then(|f| f.area_m2()).unwrap_or(0.0)
}

/// Fails if any two non-adjacent edges of the ring touch or cross.
pub fn ensure_simple(ring: &LineString<f64>) -> Result<(), GeometryError> {
    let mut coords = ring.0.clone();
    coords.dedup();
    let edges: Vec<Line<f64>> = LineString::from(coords).lines().collect();
    let n = edges.len();
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if line_intersection(edges[i], edges[j]).is_some() {
                return Err(GeometryError::SelfIntersecting);
            }
        }
    }
    Ok(())
}

pub(crate) fn distinct_count(coords: &[Coord<f64>]) -> usize {
    let mut sorted = coords.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    sorted.len()
}

fn to_line_string(points: &[LatLng]) -> LineString<f64> {
    points
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect::<Vec<_>>()
        .into()
}

fn from_coords<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> Vec<LatLng> {
    coords.map(|c| LatLng::new(c.y, c.x)).collect()
}

/// Runs a `geo` algorithm, converting a panic on pathological input into an error.
///
/// The process panic hook is left alone, so the panic message still reaches
/// stderr; the caller logs the resulting error.
fn guarded<T>(operation: &'static str, f: impl FnOnce() -> T) -> Result<T, GeometryError> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .map_err(|_| GeometryError::OperationPanicked { operation })
}
