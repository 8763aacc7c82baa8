//! Closed Catmull-Rom spline fitting for boundary rounding.

use agromap_core::LatLng;

/// Samples a closed Catmull-Rom spline through every ring vertex.
///
/// Each edge is converted to a cubic Bézier with control points derived from
/// the neighbouring vertices (tension 1/6) and sampled `samples_per_segment`
/// times. The output is open and passes through every input vertex.
pub fn catmull_rom_closed(points: &[LatLng], samples_per_segment: usize) -> Vec<LatLng> {
    let n = points.len();
    if n < 3 || samples_per_segment == 0 {
        return points.to_vec();
    }

    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.lng, p.lat)).collect();
    let mut out = Vec::with_capacity(n * samples_per_segment);

    for i in 0..n {
        let p0 = xy[(i + n - 1) % n];
        let p1 = xy[i];
        let p2 = xy[(i + 1) % n];
        let p3 = xy[(i + 2) % n];

        let c1 = (p1.0 + (p2.0 - p0.0) / 6.0, p1.1 + (p2.1 - p0.1) / 6.0);
        let c2 = (p2.0 - (p3.0 - p1.0) / 6.0, p2.1 - (p3.1 - p1.1) / 6.0);

        for step in 0..samples_per_segment {
            let t = step as f64 / samples_per_segment as f64;
            let (x, y) = cubic_bezier(p1, c1, c2, p2, t);
            out.push(LatLng::new(y, x));
        }
    }

    out
}

fn cubic_bezier(
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p1.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p1.1,
    )
}
