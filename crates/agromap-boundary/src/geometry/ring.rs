//! The editable open ring.

use agromap_core::LatLng;
use serde::{Deserialize, Serialize};

/// Minimum number of points for a ring to enclose an area.
pub const MIN_RING_POINTS: usize = 3;

/// Ordered, open sequence of positions describing a simple polygon boundary.
///
/// The first point is never repeated at the end; closing happens when the
/// ring is turned into a feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<LatLng>);

impl Ring {
    /// Creates an empty ring.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a ring from points, dropping a trailing copy of the first point.
    pub fn from_points(mut points: Vec<LatLng>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` once the ring has enough points to form a polygon.
    pub fn is_closable(&self) -> bool {
        self.0.len() >= MIN_RING_POINTS
    }

    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    pub fn push(&mut self, point: LatLng) {
        self.0.push(point);
    }

    pub fn pop(&mut self) -> Option<LatLng> {
        self.0.pop()
    }

    /// Moves the point at `index`. Returns `false` if the index is out of range.
    pub fn set(&mut self, index: usize, point: LatLng) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    /// Removes the point at `index`.
    pub fn remove(&mut self, index: usize) -> Option<LatLng> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Replaces the last point, or appends if the ring is empty.
    pub fn replace_last(&mut self, point: LatLng) {
        match self.0.last_mut() {
            Some(last) => *last = point,
            None => self.0.push(point),
        }
    }

    /// Replaces everything from `start` onwards with `tail`.
    pub fn splice_tail(&mut self, start: usize, tail: Vec<LatLng>) {
        self.0.truncate(start);
        self.0.extend(tail);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.0
    }
}

impl From<Vec<LatLng>> for Ring {
    fn from(points: Vec<LatLng>) -> Self {
        Self::from_points(points)
    }
}
