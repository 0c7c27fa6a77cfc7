//! Baseline geometry.
//!
//! A [`Baseline`] is the polyline a recognizer draws under a line of text.
//! Points are serialized as `[x, y]` pairs, matching the JSON exchanged with
//! segmentation tools.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A 2-D point in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered polyline approximating a text line's writing direction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline {
    points: Vec<Point>,
}

impl Baseline {
    /// Minimum number of points for a baseline to have a direction.
    pub const MIN_POINTS: usize = 2;

    /// Create a baseline from points without validation.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create a baseline, rejecting NaN or infinite coordinates.
    pub fn try_new(points: Vec<Point>) -> Result<Self, TypeError> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(TypeError::NonFiniteCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }
        Ok(Self { points })
    }

    /// Convenience constructor from `(x, y)` tuples.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A baseline is usable when it has at least [`Self::MIN_POINTS`]
    /// points, all with finite coordinates.
    pub fn is_usable(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS && self.points.iter().all(Point::is_finite)
    }

    /// Append all points of `other` after this baseline's last point.
    pub fn extend_from(&mut self, other: &Baseline) {
        self.points.extend_from_slice(&other.points);
    }
}

impl AsRef<Baseline> for Baseline {
    fn as_ref(&self) -> &Baseline {
        self
    }
}

impl From<Vec<Point>> for Baseline {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn point_serializes_as_pair() {
        let p = Point::new(12.0, 7.5);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[12.0,7.5]");
        let parsed: Point = serde_json::from_str("[12, 7.5]").unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn baseline_serializes_as_point_list() {
        let bl = Baseline::from_coords(&[(0.0, 1.0), (10.0, 1.0)]);
        let json = serde_json::to_string(&bl).unwrap();
        assert_eq!(json, "[[0.0,1.0],[10.0,1.0]]");
        let parsed: Baseline = serde_json::from_str("[[0,1],[10,1]]").unwrap();
        assert_eq!(parsed, bl);
    }

    #[test]
    fn endpoints() {
        let bl = Baseline::from_coords(&[(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]);
        assert_eq!(bl.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(bl.last(), Some(&Point::new(10.0, 0.0)));
        assert_eq!(bl.len(), 3);
    }

    #[test]
    fn usability() {
        assert!(!Baseline::default().is_usable());
        assert!(!Baseline::from_coords(&[(1.0, 1.0)]).is_usable());
        assert!(Baseline::from_coords(&[(1.0, 1.0), (2.0, 1.0)]).is_usable());
        assert!(!Baseline::from_coords(&[(1.0, 1.0), (f64::NAN, 1.0)]).is_usable());
    }

    #[test]
    fn try_new_rejects_non_finite() {
        let err = Baseline::try_new(vec![Point::new(0.0, 0.0), Point::new(f64::INFINITY, 2.0)])
            .unwrap_err();
        assert!(matches!(err, TypeError::NonFiniteCoordinate { index: 1, .. }));
    }

    #[test]
    fn extend_keeps_every_point() {
        let mut a = Baseline::from_coords(&[(0.0, 0.0), (10.0, 0.0)]);
        let b = Baseline::from_coords(&[(10.0, 0.0), (20.0, 0.0)]);
        a.extend_from(&b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.points()[2], Point::new(10.0, 0.0));
    }
}
