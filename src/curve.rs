// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve descriptors and curves bound to their endpoints.

use std::ops::Range;

use smallvec::SmallVec;

use crate::common::POINT_EPSILON;
use crate::{
    Arc, Bounds, CenterArc, CubicBez, InterpolationPoint, Line, LineIntersectOpts, ParamCurve,
    ParamCurveArclen, Point, QuadBez, DEFAULT_ACCURACY,
};

/// The shape of a path edge, without its endpoints.
///
/// A [`Segment`](crate::Segment) carries at most one of these for the edge
/// leaving its vertex. No curve at all means a straight edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// A cubic Bézier with two control points.
    Cubic {
        /// The control point nearest the start.
        c1: Point,
        /// The control point nearest the end.
        c2: Point,
    },
    /// A quadratic Bézier.
    ///
    /// A missing control point is the smooth shorthand: it continues the
    /// previous quadratic edge by reflecting that edge's control point.
    Quadratic {
        /// The control point, if given explicitly.
        c: Option<Point>,
    },
    /// An elliptical arc.
    Arc(Arc),
}

impl Curve {
    /// A cubic Bézier curve.
    #[inline]
    pub fn cubic(c1: impl Into<Point>, c2: impl Into<Point>) -> Curve {
        Curve::Cubic {
            c1: c1.into(),
            c2: c2.into(),
        }
    }

    /// A quadratic Bézier curve with an explicit control point.
    #[inline]
    pub fn quadratic(c: impl Into<Point>) -> Curve {
        Curve::Quadratic { c: Some(c.into()) }
    }

    /// A smooth quadratic whose control point continues the previous edge.
    #[inline]
    pub fn smooth_quadratic() -> Curve {
        Curve::Quadratic { c: None }
    }

    /// Shift the control points by `(dx, dy)`.
    ///
    /// Arcs are returned unchanged: their parameters do not depend on
    /// position.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Curve {
        let d = Point::new(dx, dy);
        match *self {
            Curve::Cubic { c1, c2 } => Curve::Cubic {
                c1: c1 + d,
                c2: c2 + d,
            },
            Curve::Quadratic { c } => Curve::Quadratic { c: c.map(|c| c + d) },
            Curve::Arc(arc) => Curve::Arc(arc),
        }
    }

    /// Bind the curve to its endpoints.
    ///
    /// A smooth quadratic with nothing to continue uses `from` as its
    /// control point. A degenerate arc becomes a straight line.
    pub fn bind(&self, from: Point, to: Point) -> CurveSeg {
        match *self {
            Curve::Cubic { c1, c2 } => CurveSeg::Cubic(CubicBez::new(from, c1, c2, to)),
            Curve::Quadratic { c } => CurveSeg::Quad(QuadBez::new(from, c.unwrap_or(from), to)),
            Curve::Arc(arc) => match arc.to_center(from, to) {
                Some(center) => CurveSeg::Arc(center),
                None => CurveSeg::Line(Line::new(from, to)),
            },
        }
    }

    /// The point at `t` along the curve from `from` to `to`.
    #[inline]
    pub fn interpolate(&self, from: Point, to: Point, t: f64) -> Point {
        self.bind(from, to).eval(t)
    }

    /// The length of the curve from `from` to `to`.
    #[inline]
    pub fn length(&self, from: Point, to: Point) -> f64 {
        self.bind(from, to).arclen(DEFAULT_ACCURACY)
    }
}

/// A single edge of a path, with its endpoints resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveSeg {
    /// A straight line.
    Line(Line),
    /// A cubic Bézier.
    Cubic(CubicBez),
    /// A quadratic Bézier.
    Quad(QuadBez),
    /// An elliptical arc.
    Arc(CenterArc),
}

impl CurveSeg {
    /// Convert to cubic Béziers.
    ///
    /// Lines and quadratics convert exactly. Arcs are approximated to within
    /// [`DEFAULT_ACCURACY`].
    pub fn to_cubics(&self) -> Vec<CubicBez> {
        match *self {
            CurveSeg::Line(line) => vec![CubicBez::new(
                line.p0,
                line.p0.lerp(line.p1, 1.0 / 3.0),
                line.p0.lerp(line.p1, 2.0 / 3.0),
                line.p1,
            )],
            CurveSeg::Cubic(c) => vec![c],
            CurveSeg::Quad(q) => vec![q.raise()],
            CurveSeg::Arc(a) => a.cubics(DEFAULT_ACCURACY),
        }
    }

    /// Where the edge crosses the boundary of `bounds`, in increasing `t`
    /// order.
    ///
    /// Each side of the box is tested separately. A crossing found on two
    /// sides, at a corner, is reported once.
    pub fn bound_intersections(
        &self,
        bounds: &Bounds,
        opts: &LineIntersectOpts,
    ) -> SmallVec<[InterpolationPoint; 4]> {
        let mut found: SmallVec<[InterpolationPoint; 4]> = SmallVec::new();
        for side in bounds.edges() {
            for hit in self.line_intersections(side, opts) {
                if !found
                    .iter()
                    .any(|f| f.point.equals_with_tolerance(hit.point, opts.tolerance))
                {
                    found.push(hit);
                }
            }
        }
        found.sort_by(|a, b| a.t.total_cmp(&b.t));
        found
    }

    /// Find the points where two edges cross.
    ///
    /// When either edge is straight the curve-line search is used, since a
    /// straight edge has a flat control hull that subdivision cannot
    /// overlap. Otherwise both edges are converted to cubics and each pair
    /// is intersected by recursive subdivision down to `depth` levels.
    pub fn intersect(&self, other: &CurveSeg, depth: usize) -> Vec<Point> {
        let opts = LineIntersectOpts::default();
        match (self, other) {
            (CurveSeg::Line(a), CurveSeg::Line(b)) => a.intersection(*b).into_iter().collect(),
            (CurveSeg::Line(line), curve) | (curve, CurveSeg::Line(line)) => curve
                .line_intersections(*line, &opts)
                .into_iter()
                .map(|hit| hit.point)
                .collect(),
            _ => {
                let mine = self.to_cubics();
                let theirs = other.to_cubics();
                let mut found: Vec<Point> = Vec::new();
                for a in &mine {
                    for b in &theirs {
                        for p in a.intersect(b, depth) {
                            if !found
                                .iter()
                                .any(|f| f.equals_with_tolerance(p, POINT_EPSILON))
                            {
                                found.push(p);
                            }
                        }
                    }
                }
                found
            }
        }
    }
}

impl ParamCurve for CurveSeg {
    fn eval(&self, t: f64) -> Point {
        match self {
            CurveSeg::Line(line) => line.eval(t),
            CurveSeg::Cubic(cubic) => cubic.eval(t),
            CurveSeg::Quad(quad) => quad.eval(t),
            CurveSeg::Arc(arc) => arc.eval(t),
        }
    }

    fn subsegment(&self, range: Range<f64>) -> CurveSeg {
        match self {
            CurveSeg::Line(line) => CurveSeg::Line(line.subsegment(range)),
            CurveSeg::Cubic(cubic) => CurveSeg::Cubic(cubic.subsegment(range)),
            CurveSeg::Quad(quad) => CurveSeg::Quad(quad.subsegment(range)),
            CurveSeg::Arc(arc) => CurveSeg::Arc(arc.subsegment(range)),
        }
    }

    fn start(&self) -> Point {
        match self {
            CurveSeg::Line(line) => line.start(),
            CurveSeg::Cubic(cubic) => cubic.start(),
            CurveSeg::Quad(quad) => quad.start(),
            CurveSeg::Arc(arc) => arc.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            CurveSeg::Line(line) => line.end(),
            CurveSeg::Cubic(cubic) => cubic.end(),
            CurveSeg::Quad(quad) => quad.end(),
            CurveSeg::Arc(arc) => arc.end(),
        }
    }

    fn line_intersections(&self, line: Line, opts: &LineIntersectOpts) -> Vec<InterpolationPoint> {
        match self {
            CurveSeg::Line(l) => l.line_intersections(line, opts),
            CurveSeg::Cubic(cubic) => cubic.line_intersections(line, opts),
            CurveSeg::Quad(quad) => quad.line_intersections(line, opts),
            CurveSeg::Arc(arc) => arc.line_intersections(line, opts),
        }
    }
}

impl ParamCurveArclen for CurveSeg {
    fn arclen(&self, accuracy: f64) -> f64 {
        match self {
            CurveSeg::Line(line) => line.arclen(accuracy),
            CurveSeg::Cubic(cubic) => cubic.arclen(accuracy),
            CurveSeg::Quad(quad) => quad.arclen(accuracy),
            CurveSeg::Arc(arc) => arc.arclen(accuracy),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use crate::{Arc, Curve, CurveSeg, Line, ParamCurve, Point};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn interpolate_each_kind() {
        let (from, to) = (p(0.0, 0.0), p(100.0, 100.0));
        let cubic = Curve::cubic((25.0, 50.0), (75.0, 50.0));
        assert_eq!(cubic.interpolate(from, to, 0.25), p(22.65625, 29.6875));

        let quad = Curve::quadratic((100.0, 0.0));
        assert_eq!(quad.interpolate(from, to, 0.5), p(75.0, 25.0));

        let arc = Curve::Arc(Arc::new(50.0, 50.0, 0.0, false, true));
        let mid = arc.interpolate(p(0.0, 0.0), p(100.0, 0.0), 0.5);
        assert!(mid.equals_with_tolerance(p(50.0, -50.0), 1e-9));
    }

    #[test]
    fn lengths() {
        let line_like = Curve::cubic((1.0, 1.0), (2.0, 2.0));
        assert!((line_like.length(p(0.0, 0.0), p(3.0, 3.0)) - 18f64.sqrt()).abs() < 1e-9);

        let quad = Curve::quadratic((1.5, 2.0));
        assert!((quad.length(p(0.0, 0.0), p(3.0, 4.0)) - 5.0).abs() < 1e-9);

        let arc = Curve::Arc(Arc::new(50.0, 50.0, 0.0, false, true));
        assert!((arc.length(p(0.0, 0.0), p(100.0, 0.0)) - 50.0 * PI).abs() < 1e-3);
    }

    #[test]
    fn translate() {
        let cubic = Curve::cubic((1.0, 2.0), (3.0, 4.0)).translate(10.0, -1.0);
        assert_eq!(cubic, Curve::cubic((11.0, 1.0), (13.0, 3.0)));
        let quad = Curve::quadratic((1.0, 2.0)).translate(1.0, 1.0);
        assert_eq!(quad, Curve::quadratic((2.0, 3.0)));
        assert_eq!(Curve::smooth_quadratic().translate(5.0, 5.0), Curve::smooth_quadratic());
        let arc = Curve::Arc(Arc::new(5.0, 6.0, 7.0, true, false));
        assert_eq!(arc.translate(3.0, 4.0), arc);
    }

    #[test]
    fn binding() {
        let (from, to) = (p(0.0, 0.0), p(10.0, 0.0));
        assert!(matches!(
            Curve::smooth_quadratic().bind(from, to),
            CurveSeg::Quad(q) if q.p1 == from
        ));
        let flat = Curve::Arc(Arc::new(0.0, 5.0, 0.0, false, false));
        assert_eq!(flat.bind(from, to), CurveSeg::Line(Line::new(from, to)));
    }

    #[test]
    fn curve_curve_intersection() {
        let a = Curve::cubic((30.0, 0.0), (70.0, 100.0)).bind(p(0.0, 0.0), p(100.0, 100.0));
        let b = Curve::cubic((30.0, 90.0), (70.0, -10.0)).bind(p(0.0, 90.0), p(100.0, -10.0));
        let hits = a.intersect(&b, 40);
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert!(hits[0].equals_with_tolerance(p(46.4955, 45.0), 1e-3));
    }

    #[test]
    fn curve_line_intersection() {
        let arch = Curve::cubic((0.0, 100.0), (100.0, 100.0)).bind(p(0.0, 0.0), p(100.0, 0.0));
        let line = CurveSeg::Line(Line::new((-10.0, 50.0), (110.0, 50.0)));
        assert_eq!(arch.intersect(&line, 40).len(), 2);
        assert_eq!(line.intersect(&arch, 40).len(), 2);

        let other = CurveSeg::Line(Line::new((50.0, -10.0), (50.0, 100.0)));
        assert_eq!(line.intersect(&other, 40), vec![p(50.0, 50.0)]);
    }

    #[test]
    fn dispatch_matches_inner() {
        let seg = Curve::quadratic((50.0, 100.0)).bind(p(0.0, 0.0), p(100.0, 0.0));
        assert_eq!(seg.start(), p(0.0, 0.0));
        assert_eq!(seg.end(), p(100.0, 0.0));
        assert_eq!(seg.eval(0.5), p(50.0, 50.0));
        let sub = seg.subsegment(0.0..0.5);
        assert!(sub.end().equals_with_tolerance(p(50.0, 50.0), 1e-9));
    }
}
