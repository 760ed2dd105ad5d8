// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A trait for curves parametrized by a scalar.

use std::ops::Range;

use crate::common::{lerp, linspace};
use crate::{InterpolationPoint, Line, Point};

/// Flatness tolerance used when measuring curve length.
pub const DEFAULT_ACCURACY: f64 = 1e-6;

/// Options for finding where a curve crosses a line.
///
/// The search splits the curve into `subdivisions` chords and tests each
/// against the line. A chord that crosses is bisected up to
/// `max_iterations` times to refine the crossing. Crossings closer than
/// `tolerance` on both axes to an earlier one are dropped.
///
/// Only one crossing can be found per chord, so raising `subdivisions`
/// trades time for the ability to separate nearby roots.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineIntersectOpts {
    /// Number of uniform parameter intervals to test.
    pub subdivisions: usize,
    /// Bisection budget for refining one crossing.
    pub max_iterations: usize,
    /// Per-axis distance under which two crossings are the same.
    pub tolerance: f64,
}

impl Default for LineIntersectOpts {
    fn default() -> Self {
        LineIntersectOpts {
            subdivisions: 100,
            max_iterations: 10,
            tolerance: 1e-2,
        }
    }
}

impl LineIntersectOpts {
    /// Set the number of uniform parameter intervals.
    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: usize) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Set the bisection budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the deduplication tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// A curve parametrized by a scalar.
pub trait ParamCurve: Sized {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// Get a subsegment of the curve for the given parameter range.
    #[must_use]
    fn subsegment(&self, range: Range<f64>) -> Self;

    /// Subdivide into (roughly) halves.
    #[must_use]
    fn subdivide(&self) -> (Self, Self) {
        (self.subsegment(0.0..0.5), self.subsegment(0.5..1.0))
    }

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }

    /// Evaluate the curve at `n` evenly spaced parameters, both ends included.
    fn sample(&self, n: usize) -> Vec<Point> {
        linspace(0.0, 1.0, n).map(|t| self.eval(t)).collect()
    }

    /// Find where the curve crosses the line segment `line`.
    ///
    /// Results are in increasing `t` order. See [`LineIntersectOpts`] for
    /// the accuracy trade-offs of the search.
    fn line_intersections(&self, line: Line, opts: &LineIntersectOpts) -> Vec<InterpolationPoint> {
        let n = opts.subdivisions.max(1);
        let step = 1.0 / n as f64;
        let mut found: Vec<InterpolationPoint> = Vec::new();
        for i in 0..n {
            let t0 = i as f64 * step;
            let t1 = if i + 1 == n { 1.0 } else { t0 + step };
            if let Some(hit) = refine_crossing(self, line, t0..t1, opts.max_iterations) {
                if !found
                    .iter()
                    .any(|f| f.point.equals_with_tolerance(hit.point, opts.tolerance))
                {
                    found.push(hit);
                }
            }
        }
        found
    }
}

/// A parametrized curve that can have its arc length measured.
pub trait ParamCurveArclen: ParamCurve {
    /// The arc length of the curve.
    ///
    /// `accuracy` bounds how far from straight a piece may be before it is
    /// measured directly rather than subdivided further.
    fn arclen(&self, accuracy: f64) -> f64;
}

/// Bisect a chord crossing down to the sub-chord that actually crosses.
///
/// Returns `None` if the chord over `range` does not cross `line`. When
/// neither half crosses (the crossing sits on the shared midpoint within
/// rounding) or the budget runs out, the last crossing found is kept with
/// its parameter estimated from its position along that chord.
fn refine_crossing<C: ParamCurve>(
    curve: &C,
    line: Line,
    range: Range<f64>,
    max_iterations: usize,
) -> Option<InterpolationPoint> {
    let (mut t0, mut t1) = (range.start, range.end);
    let chord = Line::new(curve.eval(t0), curve.eval(t1));
    let hit = chord.crossing(line)?;
    let mut best = InterpolationPoint::new(hit.point, lerp(t0, t1, hit.t));
    for _ in 0..max_iterations {
        let tm = 0.5 * (t0 + t1);
        let pm = curve.eval(tm);
        if let Some(h) = Line::new(curve.eval(t0), pm).crossing(line) {
            best = InterpolationPoint::new(h.point, lerp(t0, tm, h.t));
            t1 = tm;
        } else if let Some(h) = Line::new(pm, curve.eval(t1)).crossing(line) {
            best = InterpolationPoint::new(h.point, lerp(tm, t1, h.t));
            t0 = tm;
        } else {
            break;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use crate::{CubicBez, Line, LineIntersectOpts, ParamCurve, Point};

    #[test]
    fn opts_builder() {
        let opts = LineIntersectOpts::default()
            .with_subdivisions(10)
            .with_max_iterations(3)
            .with_tolerance(0.5);
        assert_eq!(opts.subdivisions, 10);
        assert_eq!(opts.max_iterations, 3);
        assert_eq!(opts.tolerance, 0.5);
    }

    #[test]
    fn sample_includes_ends() {
        let c = CubicBez::new((0.0, 0.0), (25.0, 50.0), (75.0, 50.0), (100.0, 100.0));
        let pts = c.sample(11);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[10], Point::new(100.0, 100.0));
        assert_eq!(pts[5], Point::new(50.0, 50.0));
    }

    #[test]
    fn curve_crosses_line_twice() {
        // An arch that rises from y=0 to y=75 and comes back down.
        let c = CubicBez::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        let line = Line::new((-10.0, 50.0), (110.0, 50.0));
        let hits = c.line_intersections(line, &LineIntersectOpts::default());
        assert_eq!(hits.len(), 2, "{hits:?}");
        assert!(hits[0].t < hits[1].t);
        for hit in &hits {
            assert!((hit.point.y - 50.0).abs() < 1e-3);
            let on_curve = c.eval(hit.t);
            assert!(on_curve.distance(hit.point) < 0.1, "{on_curve:?} vs {hit:?}");
        }
        // Symmetric arch, so the crossings mirror each other.
        assert!((hits[0].point.x + hits[1].point.x - 100.0).abs() < 1e-2);
    }

    #[test]
    fn curve_misses_line() {
        let c = CubicBez::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        let line = Line::new((-10.0, 90.0), (110.0, 90.0));
        assert!(c
            .line_intersections(line, &LineIntersectOpts::default())
            .is_empty());
    }
}
