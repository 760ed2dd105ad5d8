// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping paths to a rectangle.

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::common::linspace;
use crate::{
    Bounds, Curve, CurveSeg, InterpolationPoint, LineIntersectOpts, ParamCurve, Path, Point,
    Segment,
};

/// Options for [`clip_path`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipOpts {
    /// Number of samples used to trace the part of a curve between two
    /// parameters.
    pub resolution: usize,
    /// Options for finding where an edge crosses the clip boundary.
    pub intersect: LineIntersectOpts,
}

impl Default for ClipOpts {
    fn default() -> Self {
        ClipOpts {
            resolution: 20,
            intersect: LineIntersectOpts::default(),
        }
    }
}

impl ClipOpts {
    /// Set the curve sampling resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the boundary crossing search options.
    #[must_use]
    pub fn with_intersect_opts(mut self, intersect: LineIntersectOpts) -> Self {
        self.intersect = intersect;
        self
    }
}

/// An error which can be returned when clipping a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ClipError {
    /// A curved edge crossed the boundary in a way that cannot be resolved,
    /// for instance more than three times.
    #[error(
        "unhandled curve crossing (previous inside: {previous_inside}, \
         current inside: {current_inside}, crossings: {crossings})"
    )]
    UnhandledSegment {
        /// Whether the edge starts inside the bounds.
        previous_inside: bool,
        /// Whether the edge ends inside the bounds.
        current_inside: bool,
        /// How many boundary crossings were found.
        crossings: usize,
    },
    /// A straight edge changed side of the boundary without crossing it.
    #[error("no boundary crossing found for a straight edge that changes side")]
    MissingCrossing,
}

/// Clip `path` to `bounds`.
///
/// Returns the pieces of the path that lie inside the bounds, as open
/// paths in path order. A path that is entirely inside is returned as is,
/// and one that is entirely outside yields nothing. Vertices on the
/// boundary count as outside.
///
/// Straight edges are cut exactly at the boundary. Curved edges that stay
/// inside keep their curve; a curve that crosses the boundary is traced
/// with [`ClipOpts::resolution`] samples between its crossings. When a
/// closed path is cut, the piece running through its first vertex is kept
/// whole.
///
/// # Errors
///
/// Fails with [`ClipError::UnhandledSegment`] when a curve crosses the
/// boundary more than three times or with a crossing count that does not
/// match its start and end sides, and with [`ClipError::MissingCrossing`]
/// when the crossing of a straight edge cannot be found. No partial result
/// is returned.
///
/// # Examples
///
/// ```
/// use penplot::{clip_path, Bounds, ClipOpts, Path};
///
/// let bounds = Bounds::new(0.0, 10.0, 10.0, 0.0);
/// let path = Path::open([(5.0, 5.0), (15.0, 5.0)]);
/// let pieces = clip_path(&bounds, &path, &ClipOpts::default()).unwrap();
/// assert_eq!(pieces.len(), 1);
/// assert_eq!(pieces[0].points()[1].x, 10.0);
/// ```
pub fn clip_path(bounds: &Bounds, path: &Path, opts: &ClipOpts) -> Result<Vec<Path>, ClipError> {
    let Some(path_bounds) = path.bounds() else {
        return Ok(Vec::new());
    };
    if bounds.contains_bounds(&path_bounds) {
        return Ok(vec![path.clone()]);
    }
    if !bounds.overlaps(&path_bounds) {
        return Ok(Vec::new());
    }

    let segments = path.segments();
    let n = segments.len();
    let mut clipper = Clipper::new(bounds, opts, segments[0].point);
    for (i, edge) in path.edges().enumerate() {
        let from = segments[i].point;
        let to = segments[(i + 1) % n].point;
        match (segments[i].curve, edge) {
            (_, CurveSeg::Line(_)) | (None, _) => clipper.straight_edge(&edge, to)?,
            (Some(curve), _) => clipper.curved_edge(resolve(curve, &edge), &edge, from, to)?,
        }
    }
    let pieces = clipper.finish(path.is_closed());
    log::debug!("clipped path of {n} vertices into {} pieces", pieces.len());
    Ok(pieces)
}

/// Give a smooth quadratic its resolved control point, so it survives
/// being moved into a new path.
fn resolve(curve: Curve, edge: &CurveSeg) -> Curve {
    match (curve, edge) {
        (Curve::Quadratic { c: None }, CurveSeg::Quad(q)) => Curve::quadratic(q.p1),
        _ => curve,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Region {
    Inside,
    Outside,
}

impl Region {
    fn of(inside: bool) -> Region {
        if inside {
            Region::Inside
        } else {
            Region::Outside
        }
    }
}

/// The state of a clip walk.
///
/// `current` is the piece being built and `done` the finished pieces.
struct Clipper<'a> {
    bounds: &'a Bounds,
    opts: &'a ClipOpts,
    region: Region,
    started_inside: bool,
    current: Vec<Segment>,
    done: Vec<Path>,
}

impl<'a> Clipper<'a> {
    fn new(bounds: &'a Bounds, opts: &'a ClipOpts, start: Point) -> Clipper<'a> {
        let inside = bounds.contains(start);
        Clipper {
            bounds,
            opts,
            region: Region::of(inside),
            started_inside: inside,
            current: if inside {
                vec![Segment::new(start)]
            } else {
                Vec::new()
            },
            done: Vec::new(),
        }
    }

    fn crossings(&self, edge: &CurveSeg) -> SmallVec<[InterpolationPoint; 4]> {
        edge.bound_intersections(self.bounds, &self.opts.intersect)
    }

    fn straight_edge(&mut self, edge: &CurveSeg, to: Point) -> Result<(), ClipError> {
        let inside = self.bounds.contains(to);
        log::trace!("straight edge to {to:?}: {:?} -> inside {inside}", self.region);
        match (self.region, inside) {
            (Region::Inside, true) => self.push_point(to),
            (Region::Outside, true) => {
                let crossings = self.crossings(edge);
                let first = crossings.first().ok_or(ClipError::MissingCrossing)?;
                self.push_point(first.point);
                self.push_point(to);
            }
            (Region::Inside, false) => {
                let crossings = self.crossings(edge);
                let last = crossings.last().ok_or(ClipError::MissingCrossing)?;
                self.push_point(last.point);
                self.flush();
            }
            (Region::Outside, false) => {
                // A straight edge can cut through the box between two
                // outside vertices. Touching a single corner draws nothing.
                if let [first, .., last] = self.crossings(edge).as_slice() {
                    self.flush();
                    self.push_point(first.point);
                    self.push_point(last.point);
                    self.flush();
                }
            }
        }
        self.region = Region::of(inside);
        Ok(())
    }

    fn curved_edge(
        &mut self,
        curve: Curve,
        edge: &CurveSeg,
        from: Point,
        to: Point,
    ) -> Result<(), ClipError> {
        let was_inside = self.region == Region::Inside;
        let inside = self.bounds.contains(to);
        let hits = self.crossings(edge);
        log::trace!(
            "curved edge to {to:?}: {:?} -> inside {inside}, {} crossings",
            self.region,
            hits.len()
        );
        let unhandled = ClipError::UnhandledSegment {
            previous_inside: was_inside,
            current_inside: inside,
            crossings: hits.len(),
        };
        let hits: ArrayVec<InterpolationPoint, 3> =
            ArrayVec::try_from(hits.as_slice()).map_err(|_| unhandled)?;
        match (was_inside, inside, hits.as_slice()) {
            (false, false, []) => {}
            (true, true, []) => {
                self.attach(curve, from);
                self.push_point(to);
            }
            (true, false, [i1]) => {
                self.sample_to(edge, i1.t);
                self.push_point(i1.point);
                self.flush();
            }
            (false, true, [i1]) => {
                self.sample_from(edge, i1.t);
                self.push_point(to);
            }
            (true, true, [i1, i2]) => {
                self.sample_to(edge, i1.t);
                self.push_point(i1.point);
                self.flush();
                self.sample_from(edge, i2.t);
                self.push_point(to);
            }
            (false, false, [i1, i2]) => {
                self.sample_between(edge, i1.t, i2.t);
                self.flush();
            }
            (true, false, [i1, i2, i3]) => {
                self.sample_to(edge, i1.t);
                self.push_point(i1.point);
                self.flush();
                self.sample_between(edge, i2.t, i3.t);
                self.flush();
            }
            (false, true, [i1, i2, i3]) => {
                self.sample_between(edge, i1.t, i2.t);
                self.flush();
                self.sample_from(edge, i3.t);
                self.push_point(to);
            }
            _ => return Err(unhandled),
        }
        self.region = Region::of(inside);
        Ok(())
    }

    /// Samples strictly between the edge start and `t`.
    fn sample_to(&mut self, edge: &CurveSeg, t: f64) {
        let n = self.opts.resolution;
        for s in linspace(0.0, t, n).skip(1).take(n.saturating_sub(2)) {
            self.push_point(edge.eval(s));
        }
    }

    /// Samples from `t` up to but excluding the edge end.
    fn sample_from(&mut self, edge: &CurveSeg, t: f64) {
        let n = self.opts.resolution;
        for s in linspace(t, 1.0, n).take(n.saturating_sub(1)) {
            self.push_point(edge.eval(s));
        }
    }

    /// Samples from `t0` to `t1` inclusive.
    fn sample_between(&mut self, edge: &CurveSeg, t0: f64, t1: f64) {
        for s in linspace(t0, t1, self.opts.resolution) {
            self.push_point(edge.eval(s));
        }
    }

    fn push_point(&mut self, point: Point) {
        if self.current.last().map(|s| s.point) != Some(point) {
            self.current.push(Segment::new(point));
        }
    }

    /// Keep `curve` on the edge leaving `from`.
    fn attach(&mut self, curve: Curve, from: Point) {
        match self.current.last_mut() {
            Some(last) if last.point == from => last.curve = Some(curve),
            _ => self.current.push(Segment::with_curve(from, curve)),
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            let segments = std::mem::take(&mut self.current);
            self.done.push(Path::new(segments, false));
        }
    }

    fn finish(mut self, closed: bool) -> Vec<Path> {
        let ends_inside = self.region == Region::Inside && !self.current.is_empty();
        self.flush();
        // The last piece of a closed path runs into the first one.
        if closed && self.started_inside && ends_inside && self.done.len() > 1 {
            let head = self.done.remove(0);
            if let Some(tail) = self.done.pop() {
                let mut segments = tail.segments().to_vec();
                if segments.last().map(|s| s.point) == head.segments().first().map(|s| s.point) {
                    segments.pop();
                }
                segments.extend_from_slice(head.segments());
                self.done.insert(0, Path::new(segments, false));
            }
        }
        self.done
    }
}
