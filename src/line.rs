// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines and line-line intersection.

use std::ops::Range;

use crate::common::{round_to_decimal, INTERSECTION_PRECISION};
use crate::{InterpolationPoint, LineIntersectOpts, ParamCurve, ParamCurveArclen, Point};

/// A single line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The length of the line.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// The direction of the line in radians, in the range `(-π, π]`.
    #[inline]
    pub fn direction(&self) -> f64 {
        (self.p1 - self.p0).angle()
    }

    /// The slope `dy / dx`. Infinite for vertical lines.
    #[inline]
    pub fn slope(&self) -> f64 {
        (self.p1.y - self.p0.y) / (self.p1.x - self.p0.x)
    }

    /// The `y` value of the infinite line at `x`, using point-slope form.
    pub fn y_at(&self, x: f64) -> f64 {
        let m = self.slope();
        let b = self.p0.y - m * self.p0.x;
        m * x + b
    }

    /// The start point of the line.
    #[inline]
    pub fn origin(&self) -> Point {
        self.p0
    }

    /// The coordinates as `[x0, y0, x1, y1]`.
    #[inline]
    pub fn coords(&self) -> [f64; 4] {
        [self.p0.x, self.p0.y, self.p1.x, self.p1.y]
    }

    /// The point where two line segments meet, endpoints included.
    ///
    /// See [`segment_intersection`].
    #[inline]
    pub fn intersection(&self, other: Line) -> Option<Point> {
        segment_intersection(self.p0, self.p1, other.p0, other.p1)
    }

    /// Where `other` crosses this line segment, with the parameter along
    /// this segment.
    ///
    /// The parameter is the distance from `p0` to the crossing divided by
    /// the segment's length.
    pub fn crossing(&self, other: Line) -> Option<InterpolationPoint> {
        let point = self.intersection(other)?;
        let len = self.magnitude();
        let t = if len > 0.0 {
            self.p0.distance(point) / len
        } else {
            0.0
        };
        Some(InterpolationPoint::new(point, t))
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }

    #[inline]
    fn subsegment(&self, range: Range<f64>) -> Line {
        Line {
            p0: self.eval(range.start),
            p1: self.eval(range.end),
        }
    }

    /// A straight line can cross another at most once, so no search is needed.
    fn line_intersections(&self, line: Line, _opts: &LineIntersectOpts) -> Vec<InterpolationPoint> {
        self.crossing(line).into_iter().collect()
    }
}

impl ParamCurveArclen for Line {
    #[inline]
    fn arclen(&self, _accuracy: f64) -> f64 {
        self.magnitude()
    }
}

/// Intersect the infinite lines through `p1, p2` and `p3, p4`.
///
/// Returns `None` exactly when the determinant is zero, that is when the
/// lines are parallel or coincident. There is no tolerance here.
pub fn vector_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    // https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line
    let (x1, y1, x2, y2) = (p1.x, p1.y, p2.x, p2.y);
    let (x3, y3, x4, y4) = (p3.x, p3.y, p4.x, p4.y);
    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }
    let a = x1 * y2 - y1 * x2;
    let b = x3 * y4 - y3 * x4;
    let x = (a * (x3 - x4) - (x1 - x2) * b) / denom;
    let y = (a * (y3 - y4) - (y1 - y2) * b) / denom;
    Some(Point::new(x, y))
}

/// Intersect the line segments `p1, p2` and `p3, p4`.
///
/// The intersection of the infinite lines is accepted if it falls within
/// the coordinate range of both segments. All coordinates are rounded to
/// four decimal places before the range check, and the ranges are closed,
/// so segments that touch at an endpoint intersect there.
///
/// The returned point is not rounded.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let p = vector_intersection(p1, p2, p3, p4)?;
    let r = |v: f64| round_to_decimal(v, INTERSECTION_PRECISION);
    let outside = |v: f64, a: f64, b: f64| {
        let (v, a, b) = (r(v), r(a), r(b));
        (v < a && v < b) || (v > a && v > b)
    };
    if outside(p.x, p1.x, p2.x)
        || outside(p.y, p1.y, p2.y)
        || outside(p.x, p3.x, p4.x)
        || outside(p.y, p3.y, p4.y)
    {
        return None;
    }
    Some(p)
}
