// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use std::ops::Range;

use crate::common::{linspace, POINT_EPSILON};
use crate::{Bounds, ParamCurve, ParamCurveArclen, Point};

/// Recursion limit for arc length, reached only by degenerate (NaN) input.
const MAX_LENGTH_DEPTH: usize = 32;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

/// Ways to evaluate a cubic Bézier.
///
/// All three agree up to rounding. The polynomial form is the cheapest
/// when many points are wanted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CubicEval {
    /// Repeated linear interpolation of the control polygon.
    DeCasteljau,
    /// The Bernstein basis blend.
    Bernstein,
    /// The expanded power-basis polynomial.
    Polynomial,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// The control points as an array.
    #[inline]
    pub fn points(&self) -> [Point; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Evaluate using de Casteljau's algorithm.
    pub fn eval_de_casteljau(&self, t: f64) -> Point {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        p01.lerp(p12, t).lerp(p12.lerp(p23, t), t)
    }

    /// Evaluate using the Bernstein basis.
    pub fn eval_bernstein(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        self.p0 * (mt * mt * mt)
            + self.p1 * (3.0 * t * mt * mt)
            + self.p2 * (3.0 * t * t * mt)
            + self.p3 * (t * t * t)
    }

    /// Evaluate the power-basis polynomial.
    pub fn eval_polynomial(&self, t: f64) -> Point {
        let (p1, p2, p3, p4) = (self.p0, self.p1, self.p2, self.p3);
        let c1 = p1 * -3.0 + p2 * 3.0;
        let c2 = p1 * 3.0 + p2 * -6.0 + p3 * 3.0;
        let c3 = -p1 + p2 * 3.0 + p3 * -3.0 + p4;
        p1 + c1 * t + c2 * (t * t) + c3 * (t * t * t)
    }

    /// Evaluate with the chosen method.
    #[inline]
    pub fn eval_with(&self, t: f64, method: CubicEval) -> Point {
        match method {
            CubicEval::DeCasteljau => self.eval_de_casteljau(t),
            CubicEval::Bernstein => self.eval_bernstein(t),
            CubicEval::Polynomial => self.eval_polynomial(t),
        }
    }

    /// Evaluate at `steps` evenly spaced parameters with the chosen method.
    pub fn steps(&self, steps: usize, method: CubicEval) -> Vec<Point> {
        linspace(0.0, 1.0, steps)
            .map(|t| self.eval_with(t, method))
            .collect()
    }

    /// The first derivative at `t`.
    pub fn deriv_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        ((self.p1 - self.p0) * (mt * mt)
            + (self.p2 - self.p1) * (2.0 * mt * t)
            + (self.p3 - self.p2) * (t * t))
            * 3.0
    }

    /// Split at `t` using de Casteljau's construction.
    ///
    /// Drawn one after the other, the two halves retrace this curve exactly.
    pub fn subdivide_at(&self, t: f64) -> (CubicBez, CubicBez) {
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);
        (
            CubicBez::new(self.p0, p01, p012, p0123),
            CubicBez::new(p0123, p123, p23, self.p3),
        )
    }

    /// Bounding box of the control polygon.
    ///
    /// The curve lies inside its control hull, so this always contains the
    /// curve, though usually not tightly.
    pub fn hull_bounds(&self) -> Bounds {
        Bounds::new(
            self.p0.y.min(self.p1.y).min(self.p2.y).min(self.p3.y),
            self.p0.x.max(self.p1.x).max(self.p2.x).max(self.p3.x),
            self.p0.y.max(self.p1.y).max(self.p2.y).max(self.p3.y),
            self.p0.x.min(self.p1.x).min(self.p2.x).min(self.p3.x),
        )
    }

    /// Find the points where two cubics cross, by recursive subdivision.
    ///
    /// Both curves are halved until their control hulls stop overlapping or
    /// shrink below [`POINT_EPSILON`], at which point the shared center is
    /// reported. `depth` caps the recursion; branches still overlapping when
    /// it runs out report nothing, so a small depth can miss crossings.
    ///
    /// Hulls that only touch do not overlap, so a crossing that lands exactly
    /// on a subdivision point of both curves is not found.
    pub fn intersect(&self, other: &CubicBez, depth: usize) -> Vec<Point> {
        if depth == 0 {
            log::debug!("cubic intersection ran out of depth");
            return Vec::new();
        }
        let b1 = self.hull_bounds();
        let b2 = other.hull_bounds();
        if !b1.overlaps(&b2) {
            return Vec::new();
        }
        if b1.is_smaller_than(POINT_EPSILON) && b2.is_smaller_than(POINT_EPSILON) {
            return vec![Point::new(
                (b1.left + b1.right + b2.left + b2.right) / 4.0,
                (b1.top + b1.bottom + b2.top + b2.bottom) / 4.0,
            )];
        }
        let (a0, a1) = self.subdivide();
        let (c0, c1) = other.subdivide();
        let mut found = Vec::new();
        for (a, c) in [(a0, c0), (a1, c1), (a0, c1), (a1, c0)] {
            for p in a.intersect(&c, depth - 1) {
                if !found
                    .iter()
                    .any(|f: &Point| f.equals_with_tolerance(p, POINT_EPSILON))
                {
                    found.push(p);
                }
            }
        }
        found
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.eval_polynomial(t)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let p0 = self.eval(t0);
        let p3 = self.eval(t1);
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + self.deriv_at(t0) * scale;
        let p2 = p3 - self.deriv_at(t1) * scale;
        CubicBez { p0, p1, p2, p3 }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    fn subdivide(&self) -> (CubicBez, CubicBez) {
        self.subdivide_at(0.5)
    }
}

impl ParamCurveArclen for CubicBez {
    /// Arclength by subdivision.
    ///
    /// A piece whose control polygon is longer than its chord by no more
    /// than `accuracy` is measured as the mean of the two lengths. Otherwise
    /// it is halved and both halves are measured.
    fn arclen(&self, accuracy: f64) -> f64 {
        fn rec(c: &CubicBez, accuracy: f64, depth: usize) -> f64 {
            let chord = c.p0.distance(c.p3);
            let control = c.p0.distance(c.p1) + c.p1.distance(c.p2) + c.p2.distance(c.p3);
            if control - chord <= accuracy || depth == MAX_LENGTH_DEPTH {
                return (chord + control) / 2.0;
            }
            let (c0, c1) = c.subdivide();
            rec(&c0, accuracy, depth + 1) + rec(&c1, accuracy, depth + 1)
        }
        rec(self, accuracy, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, CubicEval, ParamCurve, ParamCurveArclen, Point, DEFAULT_ACCURACY};

    fn arch() -> CubicBez {
        CubicBez::new((0.0, 0.0), (25.0, 50.0), (75.0, 50.0), (100.0, 100.0))
    }

    #[test]
    fn known_values() {
        let c = arch();
        assert_eq!(c.eval(0.0), Point::new(0.0, 0.0));
        assert_eq!(c.eval(0.25), Point::new(22.65625, 29.6875));
        assert_eq!(c.eval(0.5), Point::new(50.0, 50.0));
        assert_eq!(c.eval(0.75), Point::new(77.34375, 70.3125));
        assert_eq!(c.eval(1.0), Point::new(100.0, 100.0));
    }

    #[test]
    fn evaluation_methods_agree() {
        let c = CubicBez::new((3.0, -1.0), (-20.0, 7.5), (40.0, 12.0), (8.0, -30.0));
        let methods = [CubicEval::DeCasteljau, CubicEval::Bernstein, CubicEval::Polynomial];
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let reference = c.eval_de_casteljau(t);
            for method in methods {
                let p = c.eval_with(t, method);
                assert!(p.equals_with_tolerance(reference, 1e-9), "{method:?} at {t}");
            }
        }
        let pts = c.steps(5, CubicEval::Bernstein);
        assert_eq!(pts.len(), 5);
        assert!(pts[4].equals_with_tolerance(c.p3, 1e-12));
    }

    #[test]
    fn derivative_matches_finite_difference() {
        // y = x^2
        let c = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 0.0), (2.0 / 3.0, 1.0 / 3.0), (1.0, 1.0));
        let n = 10;
        for i in 0..n {
            let t = (i as f64) * (n as f64).recip();
            let delta = 1e-6;
            let d_approx = (c.eval(t + delta) - c.eval(t)) * delta.recip();
            assert!((c.deriv_at(t) - d_approx).magnitude() < delta * 10.0);
        }
    }

    #[test]
    fn subdivision_retraces_curve() {
        let c = arch();
        let (left, right) = c.subdivide_at(0.3);
        assert_eq!(left.p0, c.p0);
        assert_eq!(right.p3, c.p3);
        assert!(left.p3.equals_with_tolerance(c.eval(0.3), 1e-9));
        for i in 0..=10 {
            let s = i as f64 / 10.0;
            assert!(left.eval(s).equals_with_tolerance(c.eval(0.3 * s), 1e-9));
            assert!(right.eval(s).equals_with_tolerance(c.eval(0.3 + 0.7 * s), 1e-9));
        }
        let sub = c.subsegment(0.25..0.75);
        assert!(sub.start().equals_with_tolerance(c.eval(0.25), 1e-9));
        assert!(sub.eval(0.5).equals_with_tolerance(c.eval(0.5), 1e-9));
    }

    #[test]
    fn arclen() {
        // y = x^2
        let c = CubicBez::new((0.0, 0.0), (1.0 / 3.0, 0.0), (2.0 / 3.0, 1.0 / 3.0), (1.0, 1.0));
        let true_arclen = 0.5 * 5.0f64.sqrt() + 0.25 * (2.0 + 5.0f64.sqrt()).ln();
        let error = c.arclen(DEFAULT_ACCURACY) - true_arclen;
        assert!(error.abs() < 1e-6, "error {error}");

        let straight = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
        assert!((straight.arclen(DEFAULT_ACCURACY) - 18f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn hull_bounds() {
        let b = arch().hull_bounds();
        assert_eq!((b.top, b.right, b.bottom, b.left), (0.0, 100.0, 100.0, 0.0));
    }

    #[test]
    fn crossing_cubics() {
        // The second curve is the first mirrored about y = 45, so they
        // cross where the first curve reaches y = 45.
        let a = CubicBez::new((0.0, 0.0), (30.0, 0.0), (70.0, 100.0), (100.0, 100.0));
        let b = CubicBez::new((0.0, 90.0), (30.0, 90.0), (70.0, -10.0), (100.0, -10.0));
        let hits = a.intersect(&b, 40);
        assert_eq!(hits.len(), 1, "{hits:?}");
        assert!(hits[0].equals_with_tolerance(Point::new(46.4955, 45.0), 1e-3), "{hits:?}");
    }

    #[test]
    fn separated_cubics_and_zero_depth() {
        let a = arch();
        let far = CubicBez::new((200.0, 0.0), (225.0, 50.0), (275.0, 50.0), (300.0, 100.0));
        assert!(a.intersect(&far, 40).is_empty());
        let b = CubicBez::new((0.0, 100.0), (30.0, 100.0), (70.0, 0.0), (100.0, 0.0));
        assert!(a.intersect(&b, 0).is_empty());
    }
}
