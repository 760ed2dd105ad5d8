// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path vertices.

use smallvec::SmallVec;

use crate::{
    Arc, Bounds, Curve, CurveSeg, InterpolationPoint, Line, LineIntersectOpts, ParamCurve, Point,
};

/// A path vertex, with the shape of the edge that leaves it.
///
/// `curve` describes the edge from `point` to the next vertex of the path.
/// For the last vertex of a closed path that is the edge back to the first
/// vertex; for the last vertex of an open path it is unused. `None` means
/// the edge is straight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The vertex.
    pub point: Point,
    /// The outgoing edge, if curved.
    pub curve: Option<Curve>,
}

impl Segment {
    /// A vertex with a straight outgoing edge.
    #[inline]
    pub fn new(point: impl Into<Point>) -> Segment {
        Segment {
            point: point.into(),
            curve: None,
        }
    }

    /// A vertex with the given outgoing curve.
    #[inline]
    pub fn with_curve(point: impl Into<Point>, curve: Curve) -> Segment {
        Segment {
            point: point.into(),
            curve: Some(curve),
        }
    }

    /// A vertex whose outgoing edge is a cubic Bézier.
    #[inline]
    pub fn cubic(point: impl Into<Point>, c1: impl Into<Point>, c2: impl Into<Point>) -> Segment {
        Segment::with_curve(point, Curve::cubic(c1, c2))
    }

    /// A vertex whose outgoing edge is a quadratic Bézier.
    ///
    /// Pass `None` for the smooth shorthand.
    #[inline]
    pub fn quadratic(point: impl Into<Point>, c: Option<Point>) -> Segment {
        Segment::with_curve(point, Curve::Quadratic { c })
    }

    /// A vertex whose outgoing edge is an elliptical arc.
    #[inline]
    pub fn arc(point: impl Into<Point>, arc: Arc) -> Segment {
        Segment::with_curve(point, Curve::Arc(arc))
    }

    /// Whether the outgoing edge is straight.
    #[inline]
    pub fn is_straight(&self) -> bool {
        self.curve.is_none()
    }

    /// The outgoing edge, ending at `to`.
    pub fn edge(&self, to: Point) -> CurveSeg {
        match &self.curve {
            Some(curve) => curve.bind(self.point, to),
            None => CurveSeg::Line(Line::new(self.point, to)),
        }
    }

    /// The point at `t` along the edge to `to`.
    pub fn interpolate(&self, to: Point, t: f64) -> Point {
        match &self.curve {
            Some(curve) => curve.interpolate(self.point, to, t),
            None => self.point.lerp(to, t),
        }
    }

    /// The length of the edge to `to`.
    pub fn length(&self, to: Point) -> f64 {
        match &self.curve {
            Some(curve) => curve.length(self.point, to),
            None => self.point.distance(to),
        }
    }

    /// Where `line` crosses the edge to `to`, in increasing `t` order.
    ///
    /// For a straight edge `t` is the distance along the edge over its
    /// length. For a curve it is the curve parameter of the crossing.
    pub fn line_intersections(
        &self,
        to: Point,
        line: Line,
        opts: &LineIntersectOpts,
    ) -> Vec<InterpolationPoint> {
        self.edge(to).line_intersections(line, opts)
    }

    /// Where the edge to `to` crosses the boundary of `bounds`, in
    /// increasing `t` order.
    ///
    /// See [`CurveSeg::bound_intersections`].
    pub fn bound_intersections(
        &self,
        to: Point,
        bounds: &Bounds,
        opts: &LineIntersectOpts,
    ) -> SmallVec<[InterpolationPoint; 4]> {
        self.edge(to).bound_intersections(bounds, opts)
    }

    /// Shift the vertex and the curve's control points.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Segment {
        Segment {
            point: self.point + (dx, dy),
            curve: self.curve.map(|c| c.translate(dx, dy)),
        }
    }

    /// Scale the vertex about the origin.
    ///
    /// Control points are left where they are.
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64) -> Segment {
        Segment {
            point: self.point.hadamard(Point::new(sx, sy)),
            curve: self.curve,
        }
    }
}

impl From<Point> for Segment {
    #[inline]
    fn from(point: Point) -> Segment {
        Segment::new(point)
    }
}

impl From<(f64, f64)> for Segment {
    #[inline]
    fn from(point: (f64, f64)) -> Segment {
        Segment::new(point)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bounds, Curve, Line, LineIntersectOpts, Point, Segment};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn straight_edge() {
        let s = Segment::new((0.0, 0.0));
        assert!(s.is_straight());
        assert_eq!(s.interpolate(p(4.0, 2.0), 0.5), p(2.0, 1.0));
        assert_eq!(s.length(p(3.0, 4.0)), 5.0);
    }

    #[test]
    fn cubic_edge() {
        let s = Segment::cubic((0.0, 0.0), (25.0, 50.0), (75.0, 50.0));
        let to = p(100.0, 100.0);
        assert_eq!(s.interpolate(to, 0.25), p(22.65625, 29.6875));
        assert_eq!(s.interpolate(to, 0.5), p(50.0, 50.0));
        assert_eq!(s.interpolate(to, 0.75), p(77.34375, 70.3125));
        assert!(s.length(to) > p(0.0, 0.0).distance(to));
    }

    #[test]
    fn straight_line_intersection_ratio() {
        let s = Segment::new((0.0, 0.0));
        let hits = s.line_intersections(
            p(10.0, 0.0),
            Line::new((7.5, -1.0), (7.5, 1.0)),
            &LineIntersectOpts::default(),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, p(7.5, 0.0));
        assert_eq!(hits[0].t, 0.75);
    }

    #[test]
    fn bound_intersections_are_ordered() {
        let bounds = Bounds::new(0.0, 10.0, 10.0, 0.0);
        let opts = LineIntersectOpts::default();
        // Runs right to left through the box: crosses the right side first.
        let s = Segment::new((15.0, 5.0));
        let hits = s.bound_intersections(p(-5.0, 5.0), &bounds, &opts);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].point, p(10.0, 5.0));
        assert_eq!(hits[1].point, p(0.0, 5.0));
        assert!(hits[0].t < hits[1].t);
    }

    #[test]
    fn corner_crossing_reported_once() {
        let bounds = Bounds::new(0.0, 10.0, 10.0, 0.0);
        let s = Segment::new((-5.0, -5.0));
        let hits = s.bound_intersections(p(5.0, 5.0), &bounds, &LineIntersectOpts::default());
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert!(hits[0].point.equals_with_tolerance(p(0.0, 0.0), 1e-9));
    }

    #[test]
    fn curved_bound_intersections() {
        let bounds = Bounds::new(0.0, 100.0, 40.0, -10.0);
        // An arch from (0, 0) to (100, 0) peaking at y = 75; it leaves the
        // box through the bottom side twice.
        let s = Segment::cubic((0.0, 0.0), (0.0, 100.0), (100.0, 100.0));
        let hits = s.bound_intersections(p(100.0, 0.0), &bounds, &LineIntersectOpts::default());
        // The end point touches the right side as well.
        assert!(hits.len() >= 2, "{hits:?}");
        let bottom: Vec<_> = hits.iter().filter(|h| (h.point.y - 40.0).abs() < 1e-6).collect();
        assert_eq!(bottom.len(), 2);
        assert!(hits.windows(2).all(|w| w[0].t <= w[1].t));
    }

    #[test]
    fn transforms() {
        let s = Segment::with_curve((1.0, 1.0), Curve::cubic((2.0, 2.0), (3.0, 3.0)));
        let moved = s.translate(1.0, -1.0);
        assert_eq!(moved.point, p(2.0, 0.0));
        assert_eq!(moved.curve, Some(Curve::cubic((3.0, 1.0), (4.0, 2.0))));
        let scaled = s.scale(2.0, 3.0);
        assert_eq!(scaled.point, p(2.0, 3.0));
        assert_eq!(scaled.curve, s.curve);
    }
}
