// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths made of straight and curved edges.

use crate::line::segment_intersection;
use crate::{
    Bounds, Curve, CurveSeg, ParamCurve, ParamCurveArclen, Point, QuadBez, Segment,
    DEFAULT_ACCURACY,
};

/// Number of samples per curved edge when estimating bounds.
const BOUNDS_SAMPLES: usize = 11;

/// Shapes that can be written as SVG path data.
///
/// The output is the compact form used by plotters, for example
/// `M0 0L100 0L100 100Z`, with coordinates rounded to integers.
pub trait PathData {
    /// The path-data string.
    fn path_data(&self) -> String;
}

/// An ordered sequence of vertices, optionally closed.
///
/// Each [`Segment`] holds a vertex and the shape of the edge leaving it.
/// An open path with `n` vertices has `n - 1` edges. A closed path has `n`:
/// the last one runs from the last vertex back to the first.
///
/// # Examples
///
/// ```
/// use penplot::Path;
///
/// let path = Path::from_coords(&[0.0, 0.0, 3.0, 4.0], false);
/// assert_eq!(path.length(), 5.0);
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    segments: Vec<Segment>,
    closed: bool,
}

impl Path {
    /// Create a path from its segments.
    pub fn new(segments: Vec<Segment>, closed: bool) -> Path {
        Path { segments, closed }
    }

    /// Create a path from any sequence of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>, closed: bool) -> Path {
        Path::new(segments.into_iter().collect(), closed)
    }

    /// Create a straight-edged path from vertices.
    pub fn from_points<P: Into<Point>>(points: impl IntoIterator<Item = P>, closed: bool) -> Path {
        Path::from_segments(points.into_iter().map(Segment::new), closed)
    }

    /// Create a straight-edged path from a flat `[x0, y0, x1, y1, ..]` array.
    ///
    /// A trailing unpaired value is ignored.
    pub fn from_coords(coords: &[f64], closed: bool) -> Path {
        Path::from_points(coords.chunks_exact(2).map(|c| (c[0], c[1])), closed)
    }

    /// An open straight-edged path.
    pub fn open<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Path {
        Path::from_points(points, false)
    }

    /// A closed straight-edged path.
    pub fn closed<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Path {
        Path::from_points(points, true)
    }

    /// A single straight line.
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Path {
        Path::new(vec![Segment::new(p0), Segment::new(p1)], false)
    }

    /// The segments.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the last vertex connects back to the first.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// The vertices.
    pub fn points(&self) -> Vec<Point> {
        self.segments.iter().map(|s| s.point).collect()
    }

    /// The x coordinates of the vertices.
    pub fn xs(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.point.x).collect()
    }

    /// The y coordinates of the vertices.
    pub fn ys(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.point.y).collect()
    }

    /// The number of edges.
    pub fn edge_count(&self) -> usize {
        match (self.closed, self.segments.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => n - 1,
        }
    }

    /// Edge `i`, from vertex `i` to the next vertex, with its curve resolved.
    ///
    /// Returns `None` if there is no such edge.
    pub fn edge(&self, i: usize) -> Option<CurveSeg> {
        (i < self.edge_count()).then(|| self.bind_edge(i))
    }

    /// Iterate over the edges in order.
    pub fn edges(&self) -> impl Iterator<Item = CurveSeg> + '_ {
        (0..self.edge_count()).map(|i| self.bind_edge(i))
    }

    /// The edge leaving vertex `i`, wrapping to the first vertex.
    ///
    /// The index must be in range.
    fn bind_edge(&self, i: usize) -> CurveSeg {
        let seg = &self.segments[i];
        let to = self.segments[(i + 1) % self.segments.len()].point;
        match seg.curve {
            Some(Curve::Quadratic { c: None }) => {
                CurveSeg::Quad(QuadBez::new(seg.point, self.smooth_control(i), to))
            }
            _ => seg.edge(to),
        }
    }

    fn prev_index(&self, i: usize) -> Option<usize> {
        match i {
            0 if self.closed => self.segments.len().checked_sub(1),
            0 => None,
            _ => Some(i - 1),
        }
    }

    /// The control point of the smooth quadratic edge leaving vertex `i`.
    ///
    /// It is the previous quadratic control reflected about vertex `i`. A
    /// run of smooth edges reflects in turn from the last explicit control
    /// before it; when the run starts after a non-quadratic edge the first
    /// control is that run's start vertex.
    fn smooth_control(&self, i: usize) -> Point {
        let n = self.segments.len();
        let mut first = i;
        let mut anchor = None;
        for _ in 1..n {
            let Some(prev) = self.prev_index(first) else {
                break;
            };
            match self.segments[prev].curve {
                Some(Curve::Quadratic { c: Some(c) }) => {
                    anchor = Some(c);
                    break;
                }
                Some(Curve::Quadratic { c: None }) => first = prev,
                _ => break,
            }
        }
        let mut control = match anchor {
            Some(c) => self.segments[first].point * 2.0 - c,
            None => self.segments[first].point,
        };
        let mut k = first;
        while k != i {
            k = (k + 1) % n;
            control = self.segments[k].point * 2.0 - control;
        }
        control
    }

    /// The bounding box, or `None` for an empty path.
    ///
    /// Curved edges are sampled rather than solved, so the box can be
    /// slightly smaller than the true extent of a curve.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds = Bounds::from_points(self.segments.iter().map(|s| s.point))?;
        for (i, edge) in self.edges().enumerate() {
            if self.segments[i].curve.is_some() {
                bounds = edge.sample(BOUNDS_SAMPLES).into_iter().fold(bounds, Bounds::union_pt);
            }
        }
        Some(bounds)
    }

    /// The total length of the edges.
    ///
    /// A closed path includes the edge back to the first vertex.
    pub fn length(&self) -> f64 {
        self.edges().map(|e| e.arclen(DEFAULT_ACCURACY)).sum()
    }

    /// The point at `t` along the path.
    ///
    /// The integer part of `t` selects the vertex, wrapping around, and the
    /// fractional part is the position along the edge leaving it. Returns
    /// `None` for a negative `t` or an empty path.
    pub fn interpolate(&self, t: f64) -> Option<Point> {
        if t < 0.0 || self.segments.is_empty() {
            return None;
        }
        let i = (t.floor() as usize) % self.segments.len();
        Some(self.bind_edge(i).eval(t.fract()))
    }

    /// Points where the straight chords of the two paths cross.
    ///
    /// Every pair of chords is tested, including the chord from the last
    /// vertex back to the first even when a path is open. Curves are
    /// ignored.
    pub fn intersections(&self, other: &Path) -> Vec<Point> {
        let mut found = Vec::new();
        match (self.bounds(), other.bounds()) {
            (Some(a), Some(b)) if a.overlaps(&b) => {}
            _ => return found,
        }
        let (n, m) = (self.segments.len(), other.segments.len());
        for i in 0..n {
            let from = self.segments[i].point;
            let to = self.segments[(i + 1) % n].point;
            for j in 0..m {
                let other_from = other.segments[j].point;
                let other_to = other.segments[(j + 1) % m].point;
                if let Some(p) = segment_intersection(from, to, other_from, other_to) {
                    found.push(p);
                }
            }
        }
        found
    }

    /// Shift every vertex and control point.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Path {
        Path::from_segments(self.segments.iter().map(|s| s.translate(dx, dy)), self.closed)
    }

    /// Scale every vertex about the origin.
    ///
    /// Curve control points are not scaled.
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64) -> Path {
        Path::from_segments(self.segments.iter().map(|s| s.scale(sx, sy)), self.closed)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Path {
        Path::new(segments, false)
    }
}
