// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use crate::{Line, Point};

/// An axis-aligned bounding box.
///
/// Stored as extents: `top` is the minimum y, `bottom` the maximum y,
/// `left` the minimum x and `right` the maximum x. A box is valid when
/// `right >= left` and `bottom >= top`.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// The minimum y coordinate.
    pub top: f64,
    /// The maximum x coordinate.
    pub right: f64,
    /// The maximum y coordinate.
    pub bottom: f64,
    /// The minimum x coordinate.
    pub left: f64,
}

impl Bounds {
    /// Create bounds from the four extents.
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Bounds {
        Bounds {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The smallest bounds containing every point, or `None` if there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Bounds::new(first.y, first.x, first.y, first.x);
        Some(iter.fold(init, Bounds::union_pt))
    }

    /// Grow the bounds to include a point.
    #[inline]
    #[must_use]
    pub fn union_pt(self, pt: Point) -> Bounds {
        Bounds::new(
            self.top.min(pt.y),
            self.right.max(pt.x),
            self.bottom.max(pt.y),
            self.left.min(pt.x),
        )
    }

    /// The width of the box.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// The height of the box.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The area of the box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The minimum corner.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The corner at maximum x and minimum y.
    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    /// The corner at minimum x and maximum y.
    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    /// The maximum corner.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// The center point of the box.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Shift the box by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Bounds {
        Bounds::new(self.top + dy, self.right + dx, self.bottom + dy, self.left + dx)
    }

    /// Whether `pt` lies strictly inside the box.
    ///
    /// Points on the boundary are not contained.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x > self.left && pt.x < self.right && pt.y > self.top && pt.y < self.bottom
    }

    /// Whether `pt` lies inside the box or on its boundary.
    #[inline]
    pub fn contains_inclusive(&self, pt: Point) -> bool {
        self.contains_x(pt.x) && self.contains_y(pt.y)
    }

    /// Whether `x` is within `left..=right`.
    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }

    /// Whether `y` is within `top..=bottom`.
    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }

    /// Whether `other` lies entirely within this box, boundaries included.
    #[inline]
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains_inclusive(other.top_left()) && self.contains_inclusive(other.bottom_right())
    }

    /// Whether any corner of `other` lies strictly inside this box.
    ///
    /// This misses boxes that cross like a plus sign without either
    /// holding a corner of the other. Use [`Bounds::overlaps`] for a
    /// complete test.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.contains(other.top_left())
            || self.contains(other.bottom_right())
            || self.contains(other.top_right())
            || self.contains(other.bottom_left())
    }

    /// Whether the interiors of the two boxes overlap.
    ///
    /// Boxes that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        other.left + other.width() > self.left
            && other.top + other.height() > self.top
            && other.left < self.left + self.width()
            && other.top < self.top + self.height()
    }

    /// Map a point in the unit square onto this box.
    ///
    /// `(0, 0)` maps to the top-left corner and `(1, 1)` to the bottom-right.
    #[inline]
    pub fn scale_point(&self, pt: Point) -> Point {
        Point::new(
            self.left + pt.x * self.width(),
            self.top + pt.y * self.height(),
        )
    }

    /// Whether the box is narrower than `epsilon` in both dimensions.
    #[inline]
    pub fn is_smaller_than(&self, epsilon: f64) -> bool {
        self.width().abs() < epsilon && self.height().abs() < epsilon
    }

    /// The four edges, in the order top, right, bottom, left.
    pub fn edges(&self) -> [Line; 4] {
        [
            Line::new(self.top_left(), self.top_right()),
            Line::new(self.top_right(), self.bottom_right()),
            Line::new(self.bottom_right(), self.bottom_left()),
            Line::new(self.bottom_left(), self.top_left()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Bounds, Point};

    fn unit() -> Bounds {
        Bounds::new(0.0, 1.0, 1.0, 0.0)
    }

    #[test]
    fn contains_points() {
        let b = unit();
        assert!(b.contains(Point::new(0.5, 0.5)));
        assert!(!b.contains(Point::new(2.0, 2.0)));
        assert!(!b.contains(Point::new(1.0, 1.0)));
        assert!(b.contains_inclusive(Point::new(1.0, 1.0)));
        assert!(b.contains_inclusive(Point::new(0.0, 0.5)));
        assert!(!b.contains_inclusive(Point::new(1.0001, 0.5)));
        assert!(b.contains_x(1.0) && b.contains_y(0.0));
    }

    #[test]
    fn contains_bounds() {
        let outer = unit();
        let inner = Bounds::new(0.1, 0.5, 0.5, 0.1);
        assert!(outer.contains_bounds(&inner));
        assert!(!inner.contains_bounds(&outer));
        assert!(outer.contains_bounds(&outer));
        assert!(!outer.contains_bounds(&Bounds::new(2.5, 3.5, 3.5, 2.5)));
    }

    #[test]
    fn intersects_by_corner() {
        let b1 = unit();
        let b2 = Bounds::new(0.5, 1.5, 1.5, 0.5);
        assert!(b1.intersects(&b2));
        assert!(b2.intersects(&b1));
        let far = Bounds::new(2.5, 3.5, 3.5, 2.5);
        assert!(!b1.intersects(&far));
        assert!(!far.intersects(&b1));
    }

    #[test]
    fn plus_sign_only_overlaps() {
        let tall = Bounds::new(0.0, 3.0, 4.0, 2.0);
        let wide = Bounds::new(1.0, 4.0, 2.0, 1.0);
        assert!(!tall.intersects(&wide));
        assert!(!wide.intersects(&tall));
        assert!(tall.overlaps(&wide));
        assert!(wide.overlaps(&tall));
    }

    #[test]
    fn overlaps() {
        let cases = [
            // (b1, b2, expected)
            (unit(), Bounds::new(0.5, 1.5, 1.5, 0.5), true),
            (unit(), Bounds::new(2.5, 3.5, 3.5, 2.5), false),
            // Sharing an edge.
            (unit(), Bounds::new(0.0, 2.0, 1.0, 1.0), false),
            // Sharing only a corner.
            (unit(), Bounds::new(1.0, 2.0, 2.0, 1.0), false),
            (
                Bounds::new(0.0, 2.0, 2.0, 0.0),
                Bounds::new(1.0, 3.0, 3.0, 1.0),
                true,
            ),
            (
                Bounds::new(0.0, 4.0, 2.0, 2.0),
                Bounds::new(1.0, 3.0, 3.0, 1.0),
                true,
            ),
            (
                Bounds::new(2.0, 3.0, 6.0, 2.0),
                Bounds::new(3.0, 4.0, 4.0, 1.0),
                true,
            ),
        ];
        for (b1, b2, expected) in cases {
            assert_eq!(b1.overlaps(&b2), expected, "{b1:?} vs {b2:?}");
            assert_eq!(b2.overlaps(&b1), expected, "{b2:?} vs {b1:?}");
        }
    }

    #[test]
    fn geometry() {
        let b = Bounds::new(10.0, 40.0, 30.0, 20.0);
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 20.0);
        assert_eq!(b.area(), 400.0);
        assert_eq!(b.center(), Point::new(30.0, 20.0));
        assert_eq!(b.translate(5.0, -10.0), Bounds::new(0.0, 45.0, 20.0, 25.0));
        assert_eq!(b.scale_point(Point::new(0.5, 1.0)), Point::new(30.0, 30.0));
        assert_eq!(b.top_right(), Point::new(40.0, 10.0));
        assert_eq!(b.bottom_left(), Point::new(20.0, 30.0));
    }

    #[test]
    fn from_points() {
        assert_eq!(Bounds::from_points(Vec::<Point>::new()), None);
        let b = Bounds::from_points([
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(b, Some(Bounds::new(-1.0, 3.0, 4.0, -2.0)));
    }

    #[test]
    fn edges_wind_around() {
        let edges = unit().edges();
        for i in 0..4 {
            assert_eq!(edges[i].p1, edges[(i + 1) % 4].p0);
        }
        assert_eq!(edges[0].p0, Point::new(0.0, 0.0));
    }
}
