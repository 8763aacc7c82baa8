//! GeoJSON polygon feature envelope.
//!
//! Output coordinates are `[lng, lat]` pairs and every ring is closed.

use agromap_core::{GeometryError, LatLng};
use geo::{ChamberlainDuquetteArea, Coord, LineString, Polygon};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum PolygonTag {
    #[default]
    Polygon,
}

/// GeoJSON `Polygon` geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    #[serde(rename = "type")]
    tag: PolygonTag,
    /// Exterior ring first, then holes. Each ring is closed.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// GeoJSON `Feature` wrapping a single polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    #[serde(rename = "type")]
    tag: FeatureTag,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
    pub geometry: PolygonGeometry,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PolygonFeature {
    /// Wraps an already closed `(lat, lng)` ring, reprojecting to `[lng, lat]`.
    pub fn from_closed_ring(closed: &[LatLng]) -> Self {
        Self::from_rings(vec![closed.iter().map(|p| p.to_lng_lat()).collect()])
    }

    fn from_rings(coordinates: Vec<Vec<[f64; 2]>>) -> Self {
        Self {
            tag: FeatureTag::Feature,
            properties: Map::new(),
            geometry: PolygonGeometry {
                tag: PolygonTag::Polygon,
                coordinates,
            },
        }
    }

    /// Builds a feature from a `geo` polygon (x = lng, y = lat).
    pub fn from_polygon(polygon: &Polygon<f64>) -> Self {
        let ring = |ls: &LineString<f64>| ls.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>();
        let mut rings = vec![ring(polygon.exterior())];
        rings.extend(polygon.interiors().iter().map(ring));
        Self::from_rings(rings)
    }

    /// Parses a GeoJSON feature string.
    pub fn from_json_str(json: &str) -> Result<Self, GeometryError> {
        serde_json::from_str(json).map_err(|e| GeometryError::InvalidFeature(e.to_string()))
    }

    /// Closed exterior ring in `[lng, lat]` order.
    pub fn exterior(&self) -> &[[f64; 2]] {
        self.geometry
            .coordinates
            .first()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Exterior ring as open `(lat, lng)` positions.
    pub fn exterior_positions(&self) -> Vec<LatLng> {
        let mut points: Vec<LatLng> = self
            .exterior()
            .iter()
            .map(|pair| LatLng::from_lng_lat(*pair))
            .collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        points
    }

    /// Converts to a `geo` polygon, rejecting rings that cannot enclose an area.
    pub fn to_polygon(&self) -> Result<Polygon<f64>, GeometryError> {
        let mut rings = self.geometry.coordinates.iter().map(|ring| {
            let coords: Vec<Coord<f64>> = ring.iter().map(|[x, y]| Coord { x: *x, y: *y }).collect();
            if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
                return Err(GeometryError::InvalidFeature(
                    "non-finite coordinate".to_string(),
                ));
            }
            let distinct = super::distinct_count(&coords);
            if distinct < super::MIN_RING_POINTS {
                return Err(GeometryError::DegenerateRing { points: distinct });
            }
            Ok(LineString::from(coords))
        });

        let exterior = rings
            .next()
            .ok_or_else(|| GeometryError::InvalidFeature("polygon has no rings".to_string()))??;
        let interiors = rings.collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    /// Geodesic area in square metres.
    pub fn area_m2(&self) -> Option<f64> {
        self.to_polygon()
            .ok()
            .map(|p| p.chamberlain_duquette_unsigned_area())
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
