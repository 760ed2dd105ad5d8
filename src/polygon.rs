// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-edged closed shapes.

use std::f64::consts::TAU;

use geo::{BooleanOps, LineString, MultiPolygon};

use crate::line::segment_intersection;
use crate::{Bounds, Line, Path, Point};

/// Two line hits closer than this on both axes are one hit, and a point
/// this close to an edge is on the boundary.
const HIT_TOLERANCE: f64 = 1e-4;

/// An error which can be returned when constructing a polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PolygonError {
    /// Regular polygons and stars need at least three sides or points.
    #[error("a polygon needs at least 3 sides, got {0}")]
    TooFewSides(usize),
}

/// A closed path with only straight edges.
///
/// Boolean operations go through [`geo`]. Results are read back from the
/// exterior ring of each output polygon; holes are dropped.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    path: Path,
}

impl Polygon {
    /// Create a polygon from its vertices.
    pub fn new<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Polygon {
        Polygon {
            path: Path::closed(points),
        }
    }

    /// Create a polygon from a flat `[x0, y0, x1, y1, ..]` array.
    pub fn from_coords(coords: &[f64]) -> Polygon {
        Polygon {
            path: Path::from_coords(coords, true),
        }
    }

    /// A regular polygon with its first vertex at angle zero.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::TooFewSides`] when `sides < 3`.
    pub fn ngon(sides: usize, center: impl Into<Point>, radius: f64) -> Result<Polygon, PolygonError> {
        if sides < 3 {
            return Err(PolygonError::TooFewSides(sides));
        }
        let center = center.into();
        let step = TAU / sides as f64;
        Ok(Polygon::new(
            (0..sides).map(|i| Point::from_angle(i as f64 * step, radius) + center),
        ))
    }

    /// A star with `points` tips.
    ///
    /// Vertices alternate between `radius` and `inner_radius`, starting with
    /// a tip at angle zero.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::TooFewSides`] when `points < 3`.
    pub fn star(
        center: impl Into<Point>,
        radius: f64,
        inner_radius: f64,
        points: usize,
    ) -> Result<Polygon, PolygonError> {
        if points < 3 {
            return Err(PolygonError::TooFewSides(points));
        }
        let center = center.into();
        let n = points * 2;
        let step = TAU / n as f64;
        Ok(Polygon::new((0..n).map(|i| {
            let r = if i % 2 == 0 { radius } else { inner_radius };
            Point::from_angle(i as f64 * step, r) + center
        })))
    }

    /// An axis-aligned rectangle with its top-left corner at `(x, y)`.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Polygon {
        Polygon::new([
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])
    }

    /// An axis-aligned rectangle centered on `center`.
    pub fn rectangle_from_center(center: impl Into<Point>, width: f64, height: f64) -> Polygon {
        let center = center.into();
        Polygon::rectangle(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// The underlying closed path.
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// The vertices.
    pub fn points(&self) -> Vec<Point> {
        self.path.points()
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The bounding box, or `None` for an empty polygon.
    pub fn bounds(&self) -> Option<Bounds> {
        self.path.bounds()
    }

    /// Points where the edges of the two polygons cross.
    pub fn intersections(&self, other: &Polygon) -> Vec<Point> {
        self.path.intersections(&other.path)
    }

    /// Points where `line` crosses the edges.
    ///
    /// A crossing through a vertex is reported once.
    pub fn line_intersections(&self, line: Line) -> Vec<Point> {
        let pts = self.path.segments();
        let n = pts.len();
        let mut found: Vec<Point> = Vec::new();
        for i in 0..n {
            let from = pts[i].point;
            let to = pts[(i + 1) % n].point;
            if let Some(p) = segment_intersection(from, to, line.p0, line.p1) {
                if !found
                    .iter()
                    .any(|f| f.equals_with_tolerance(p, HIT_TOLERANCE))
                {
                    found.push(p);
                }
            }
        }
        found
    }

    /// Whether `pt` is inside the polygon or on its boundary.
    ///
    /// Edges within `1e-4` of `pt` put it on the boundary. Otherwise a ray
    /// is cast from `pt` to the right and the edges it crosses are counted;
    /// an odd count is inside. Each edge covers the half-open vertical span
    /// above its lower end, so a ray through a vertex is counted once when
    /// the boundary passes through it and an even number of times when it
    /// only touches.
    pub fn contains_point(&self, pt: impl Into<Point>) -> bool {
        let pt = pt.into();
        let Some(bounds) = self.bounds() else {
            return false;
        };
        if !bounds.contains_inclusive(pt) {
            return false;
        }
        let pts = self.path.segments();
        let n = pts.len();
        let mut inside = false;
        for i in 0..n {
            let a = pts[i].point;
            let b = pts[(i + 1) % n].point;
            if distance_to_edge(a, b, pt) < HIT_TOLERANCE {
                return true;
            }
            if (a.y > pt.y) != (b.y > pt.y) {
                let x = a.x + (pt.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x > pt.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Whether the polygon is monotone with respect to the x axis.
    ///
    /// Every vertical line then meets the polygon in a single interval.
    pub fn is_x_monotone(&self) -> bool {
        self.is_monotone(Point::new(1.0, 0.0))
    }

    /// Whether the polygon is monotone with respect to the y axis.
    pub fn is_y_monotone(&self) -> bool {
        self.is_monotone(Point::new(0.0, 1.0))
    }

    /// Whether the polygon is monotone with respect to a line in
    /// `direction`.
    ///
    /// The vertices are projected onto the line. The polygon is monotone
    /// when the projections have a single local minimum going round the
    /// boundary. Runs of equal projections count as one vertex.
    pub fn is_monotone(&self, direction: Point) -> bool {
        let mut values: Vec<f64> = self
            .path
            .segments()
            .iter()
            .map(|s| s.point.dot(direction))
            .collect();
        values.dedup();
        while values.len() > 1 && values.first() == values.last() {
            values.pop();
        }
        let n = values.len();
        if n < 2 {
            return true;
        }
        let minima = (0..n)
            .filter(|&i| {
                let v = values[i];
                v < values[(i + n - 1) % n] && v < values[(i + 1) % n]
            })
            .count();
        minima == 1
    }

    /// Shift every vertex.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Polygon {
        Polygon {
            path: self.path.translate(dx, dy),
        }
    }

    /// Scale every vertex about the origin.
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64) -> Polygon {
        Polygon {
            path: self.path.scale(sx, sy),
        }
    }

    /// Convert to a [`geo`] multipolygon with one member.
    pub fn to_geo(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![geo::Polygon::from(self)])
    }

    /// Read polygons back from a [`geo`] multipolygon.
    ///
    /// Only exterior rings are kept. The closing duplicate of the first
    /// vertex is dropped.
    pub fn from_geo(multi: &MultiPolygon<f64>) -> Vec<Polygon> {
        multi
            .iter()
            .map(|poly| {
                let ring = poly.exterior();
                let mut points: Vec<Point> = ring.coords().map(|c| Point::new(c.x, c.y)).collect();
                if points.len() > 1 && points.first() == points.last() {
                    points.pop();
                }
                Polygon::new(points)
            })
            .collect()
    }

    /// The union of this polygon and `others`.
    pub fn union(&self, others: &[Polygon]) -> Vec<Polygon> {
        self.boolean_op(others, |a, b| a.union(b))
    }

    /// The region shared by this polygon and all of `others`.
    pub fn intersection(&self, others: &[Polygon]) -> Vec<Polygon> {
        self.boolean_op(others, |a, b| a.intersection(b))
    }

    /// This polygon with each of `others` cut away.
    pub fn difference(&self, others: &[Polygon]) -> Vec<Polygon> {
        self.boolean_op(others, |a, b| a.difference(b))
    }

    /// The region covered an odd number of times.
    pub fn xor(&self, others: &[Polygon]) -> Vec<Polygon> {
        self.boolean_op(others, |a, b| a.xor(b))
    }

    fn boolean_op(
        &self,
        others: &[Polygon],
        op: impl Fn(&MultiPolygon<f64>, &MultiPolygon<f64>) -> MultiPolygon<f64>,
    ) -> Vec<Polygon> {
        let result = others
            .iter()
            .fold(self.to_geo(), |acc, other| op(&acc, &other.to_geo()));
        Polygon::from_geo(&result)
    }
}

/// Distance from `pt` to the segment `a, b`.
fn distance_to_edge(a: Point, b: Point, pt: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    let t = if len2 > 0.0 {
        ((pt - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t).distance(pt)
}

/// The centroid of a triangle.
pub fn triangle_center(a: Point, b: Point, c: Point) -> Point {
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let ring: Vec<(f64, f64)> = polygon.points().into_iter().map(Into::into).collect();
        geo::Polygon::new(LineString::from(ring), vec![])
    }
}

impl From<Polygon> for Path {
    fn from(polygon: Polygon) -> Path {
        polygon.path
    }
}

#[cfg(test)]
mod tests {
    use geo::Area;

    use super::triangle_center;
    use crate::{Line, Point, Polygon, PolygonError};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn area(polygons: &[Polygon]) -> f64 {
        polygons
            .iter()
            .map(|poly| geo::Polygon::from(poly).unsigned_area())
            .sum()
    }

    #[test]
    fn too_few_sides() {
        assert_eq!(
            Polygon::ngon(2, (0.0, 0.0), 1.0),
            Err(PolygonError::TooFewSides(2))
        );
        assert_eq!(
            Polygon::star((0.0, 0.0), 2.0, 1.0, 1),
            Err(PolygonError::TooFewSides(1))
        );
    }

    #[test]
    fn ngon_vertices() {
        let square = Polygon::ngon(4, (10.0, 10.0), 5.0).unwrap();
        assert_eq!(square.len(), 4);
        let expected = [p(15.0, 10.0), p(10.0, 15.0), p(5.0, 10.0), p(10.0, 5.0)];
        for (got, want) in square.points().into_iter().zip(expected) {
            assert!(got.equals_with_tolerance(want, 1e-9), "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn star_vertices() {
        let star = Polygon::star((100.0, 100.0), 100.0, 50.0, 5).unwrap();
        let pts = star.points();
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], p(200.0, 100.0));
        assert!(pts[5].equals_with_tolerance(p(50.0, 100.0), 1e-9));
    }

    #[test]
    fn star_contains() {
        let star = Polygon::star((100.0, 100.0), 100.0, 50.0, 5).unwrap();
        assert!(star.contains_point((100.0, 100.0)));
        assert!(star.contains_point((100.0, 150.0)));
        // Inside the bounding box but between two tips.
        assert!(!star.contains_point((100.0, 180.0)));
        // An inner vertex is on the boundary.
        assert!(star.contains_point((50.0, 100.0)));
        assert!(!star.contains_point((49.0, 100.0)));
        assert!(star.contains_point((51.0, 100.0)));
        assert!(!star.contains_point((300.0, 100.0)));
    }

    #[test]
    fn ray_through_reflex_vertex() {
        // A notch dips down to (30, 10), level with the query points.
        let notched = Polygon::from_coords(&[
            0.0, 0.0, 40.0, 0.0, 40.0, 20.0, 30.0, 10.0, 20.0, 20.0, 0.0, 20.0,
        ]);
        assert!(notched.contains_point((10.0, 10.0)));
        assert!(notched.contains_point((35.0, 10.0)));
        assert!(notched.contains_point((30.0, 10.0)));
        assert!(!notched.contains_point((30.0, 15.0)));
        assert!(notched.contains_point((30.0, 5.0)));
    }

    #[test]
    fn rectangle_contains_edges() {
        let rect = Polygon::rectangle(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_point((50.0, 50.0)));
        assert!(!rect.contains_point((150.0, 50.0)));
        assert!(rect.contains_point((100.0, 50.0)));
        assert!(!Polygon::default().contains_point((0.0, 0.0)));
    }

    #[test]
    fn rectangle_from_center() {
        let rect = Polygon::rectangle_from_center((5.0, 5.0), 4.0, 2.0);
        assert_eq!(
            rect.points(),
            vec![p(3.0, 4.0), p(7.0, 4.0), p(7.0, 6.0), p(3.0, 6.0)]
        );
    }

    #[test]
    fn polygon_intersections() {
        let a = Polygon::new([(0.0, 0.0), (1.0, 1.0), (1.0, 0.0)]);
        let b = Polygon::new([(5.0, 5.0), (6.0, 6.0), (6.0, 5.0)]);
        assert!(a.intersections(&b).is_empty());

        let a = Polygon::new([(0.0, 0.0), (2.0, 2.0), (2.0, 0.0)]);
        let b = Polygon::new([(0.5, 1.0), (3.0, 3.0), (1.0, 0.5)]);
        let hits = a.intersections(&b);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], p(0.75, 0.75));
    }

    #[test]
    fn line_through_vertex_counted_once() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let diagonal = Line::new((-5.0, -5.0), (15.0, 15.0));
        let hits = square.line_intersections(diagonal);
        assert_eq!(hits.len(), 2, "{hits:?}");
    }

    #[test]
    fn monotone() {
        let hex = Polygon::ngon(6, (0.0, 0.0), 10.0).unwrap();
        assert!(hex.is_x_monotone());
        assert!(hex.is_y_monotone());

        let star = Polygon::star((100.0, 100.0), 100.0, 50.0, 5).unwrap();
        assert!(!star.is_x_monotone());

        // A U shape opening downwards in y.
        let u = Polygon::new([
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        assert!(u.is_x_monotone());
        assert!(!u.is_y_monotone());
        assert!(u.is_monotone(Point::new(1.0, 0.0)));
    }

    #[test]
    fn transforms() {
        let tri = Polygon::new([(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        assert_eq!(
            tri.translate(1.0, 1.0).points(),
            vec![p(1.0, 1.0), p(3.0, 1.0), p(1.0, 3.0)]
        );
        assert_eq!(
            tri.scale(2.0, 3.0).points(),
            vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 6.0)]
        );
        assert!(tri.as_path().is_closed());
        assert_eq!(
            triangle_center(p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)),
            p(1.0, 1.0)
        );
    }

    #[test]
    fn geo_round_trip() {
        let square = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let multi = square.to_geo();
        assert_eq!(multi.0.len(), 1);
        assert_eq!(multi.0[0].exterior().0.len(), 5);
        assert_eq!(Polygon::from_geo(&multi), vec![square]);
    }

    #[test]
    fn boolean_ops() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Polygon::rectangle(5.0, 5.0, 10.0, 10.0);

        let union = a.union(&[b.clone()]);
        assert_eq!(union.len(), 1);
        assert!((area(&union) - 175.0).abs() < 1e-9);

        let shared = a.intersection(&[b.clone()]);
        assert_eq!(shared.len(), 1);
        assert!((area(&shared) - 25.0).abs() < 1e-9);

        let cut = a.difference(&[b]);
        assert_eq!(cut.len(), 1);
        assert!((area(&cut) - 75.0).abs() < 1e-9);

        let far = Polygon::rectangle(20.0, 0.0, 10.0, 10.0);
        let both = a.xor(&[far]);
        assert_eq!(both.len(), 2);
        assert!((area(&both) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn fold_over_operands() {
        let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Polygon::rectangle(10.0, 0.0, 10.0, 10.0);
        let c = Polygon::rectangle(20.0, 0.0, 10.0, 10.0);
        let all = a.union(&[b, c]);
        assert_eq!(all.len(), 1);
        assert!((area(&all) - 300.0).abs() < 1e-9);
        assert_eq!(a.union(&[]), vec![a]);
    }
}
