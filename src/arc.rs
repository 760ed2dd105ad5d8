// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical arcs.

use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::Range;

use crate::{CubicBez, ParamCurve, ParamCurveArclen, Point};

/// Upper limit on the pieces in [`CenterArc::cubics`].
const MAX_CUBICS: f64 = 1024.0;

/// The parameters of an elliptical arc, as written in SVG path data.
///
/// The endpoints are not part of the arc. They come from the path vertices
/// the arc connects, which is why [`Arc::to_center`] takes them as
/// arguments. The parameters do not depend on position, so moving the
/// endpoints moves the arc with them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The x radius.
    pub rx: f64,
    /// The y radius.
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_rotation: f64,
    /// Take the longer of the two candidate arcs.
    pub large_arc: bool,
    /// Sweep in the positive angle direction.
    pub sweep: bool,
}

/// An elliptical arc in center form.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterArc {
    /// The center of the ellipse.
    pub center: Point,
    /// The x and y radii.
    pub radii: Point,
    /// The angle at `t = 0`, in radians.
    pub start_angle: f64,
    /// The signed angle swept over `0..=1`, in radians.
    pub sweep_angle: f64,
    /// Rotation of the ellipse's x axis, in radians.
    pub x_rotation: f64,
}

impl Arc {
    /// Create arc parameters.
    #[inline]
    pub const fn new(rx: f64, ry: f64, x_rotation: f64, large_arc: bool, sweep: bool) -> Arc {
        Arc {
            rx,
            ry,
            x_rotation,
            large_arc,
            sweep,
        }
    }

    /// Resolve the arc between two endpoints into center form.
    ///
    /// Radii too small to span the endpoints are scaled up uniformly until
    /// they do. Returns `None` when either radius is zero or the endpoints
    /// coincide; such an arc is drawn as a straight line.
    ///
    /// See <https://www.w3.org/TR/SVG11/implnote.html#ArcImplementationNotes>,
    /// sections F.6.5 and F.6.6.
    pub fn to_center(&self, from: Point, to: Point) -> Option<CenterArc> {
        if from == to || self.rx == 0.0 || self.ry == 0.0 {
            return None;
        }
        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        let x_rotation = self.x_rotation.to_radians();
        let (sin, cos) = x_rotation.sin_cos();

        let half = (from - to) * 0.5;
        let x1 = cos * half.x + sin * half.y;
        let y1 = -sin * half.x + cos * half.y;

        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let (rx2, ry2) = (rx * rx, ry * ry);
        let num = rx2 * ry2 - rx2 * y1 * y1 - ry2 * x1 * x1;
        let den = rx2 * y1 * y1 + ry2 * x1 * x1;
        let mut coef = (num / den).max(0.0).sqrt();
        if self.large_arc == self.sweep {
            coef = -coef;
        }
        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;

        let mid = from.midpoint(to);
        let center = Point::new(cos * cx1 - sin * cy1 + mid.x, sin * cx1 + cos * cy1 + mid.y);

        let u = Point::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let v = Point::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);
        let start_angle = u.angle();
        let mut sweep_angle = u.cross(v).atan2(u.dot(v));
        if self.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        } else if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        }

        Some(CenterArc {
            center,
            radii: Point::new(rx, ry),
            start_angle,
            sweep_angle,
            x_rotation,
        })
    }
}

impl CenterArc {
    /// Approximate the arc with cubic Béziers.
    ///
    /// Enough pieces are used that each stays within roughly `tolerance`
    /// of the true ellipse, up to a limit of 1024 pieces.
    pub fn cubics(&self, tolerance: f64) -> Vec<CubicBez> {
        let scaled_err = self.radii.x.max(self.radii.y) / tolerance;
        // Number of subdivisions per full turn for the requested tolerance.
        let n_err = (1.1163 * scaled_err).powf(1.0 / 6.0).max(3.999_999);
        let n = (n_err * self.sweep_angle.abs() * (1.0 / (2.0 * PI)))
            .ceil()
            .min(MAX_CUBICS);
        let angle_step = self.sweep_angle / n;
        let n = n as usize;
        let arm_len = (4.0 / 3.0) * (angle_step / 4.0).tan();

        let mut result = Vec::with_capacity(n);
        let mut angle0 = self.start_angle;
        let mut p0 = self.offset(angle0);
        for _ in 0..n {
            let angle1 = angle0 + angle_step;
            let p1 = p0 + self.offset(angle0 + FRAC_PI_2) * arm_len;
            let p3 = self.offset(angle1);
            let p2 = p3 - self.offset(angle1 + FRAC_PI_2) * arm_len;
            result.push(CubicBez::new(
                self.center + p0,
                self.center + p1,
                self.center + p2,
                self.center + p3,
            ));
            angle0 = angle1;
            p0 = p3;
        }
        result
    }

    /// The vector from the center to the ellipse at `angle`.
    fn offset(&self, angle: f64) -> Point {
        Point::new(self.radii.x * angle.cos(), self.radii.y * angle.sin()).rotate(self.x_rotation)
    }
}

impl ParamCurve for CenterArc {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.center + self.offset(self.start_angle + t * self.sweep_angle)
    }

    fn subsegment(&self, range: Range<f64>) -> CenterArc {
        CenterArc {
            start_angle: self.start_angle + range.start * self.sweep_angle,
            sweep_angle: (range.end - range.start) * self.sweep_angle,
            ..*self
        }
    }
}

impl ParamCurveArclen for CenterArc {
    /// Arclength of the cubic approximation.
    fn arclen(&self, accuracy: f64) -> f64 {
        self.cubics(accuracy)
            .iter()
            .map(|c| c.arclen(accuracy))
            .sum()
    }
}
