// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common numerical helpers used throughout the geometry code.

use std::f64::consts::{PI, TAU};

/// Decimal places kept when validating segment intersections.
pub const INTERSECTION_PRECISION: i32 = 4;

/// Tolerance below which two points are treated as the same point.
pub const POINT_EPSILON: f64 = 1e-6;

/// Linearly interpolate between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Map `value` from the range `low1..high1` onto `low2..high2`.
///
/// The value is not clamped, so values outside the source range map
/// outside the target range.
#[inline]
pub fn map_range(value: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    low2 + (high2 - low2) * (value - low1) / (high1 - low1)
}

/// Return `n` evenly spaced numbers over `start..=end`.
///
/// Both endpoints are included. For `n == 1` the single value is `start`.
pub fn linspace(start: f64, end: f64, n: usize) -> impl ExactSizeIterator<Item = f64> {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| start + i as f64 * step)
}

/// Euclidean modulo that always returns a value in `0..b.abs()`.
///
/// # Panics
///
/// Panics if `b` is zero.
#[inline]
pub fn modulo(a: isize, b: isize) -> usize {
    assert!(b != 0, "modulo by zero");
    a.rem_euclid(b.abs()) as usize
}

/// Round `x` to the given number of decimal places.
///
/// Halfway cases are rounded away from zero.
#[inline]
pub fn round_to_decimal(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

/// Whether `a` and `b` differ by strictly less than `tolerance`.
#[inline]
pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Normalize an angle in radians to the range `[-π, π]`.
///
/// Angles already in range are returned unchanged. Infinite and NaN input
/// gives NaN.
pub fn normalize_radians(radians: f64) -> f64 {
    if !radians.is_finite() {
        return f64::NAN;
    }
    if (-PI..=PI).contains(&radians) {
        return radians;
    }
    let r = radians.rem_euclid(TAU);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Format an RGB triple as a `#rrggbb` color string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_and_map_range() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
        assert_eq!(map_range(-5.0, 0.0, 10.0, 0.0, 1.0), -0.5);
    }

    #[test]
    fn linspace_includes_endpoints() {
        let v: Vec<f64> = linspace(0.0, 1.0, 5).collect();
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        let single: Vec<f64> = linspace(3.0, 7.0, 1).collect();
        assert_eq!(single, vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
    }

    #[test]
    fn modulo_wraps_negative() {
        assert_eq!(modulo(-1, 5), 4);
        assert_eq!(modulo(7, 5), 2);
        assert_eq!(modulo(7, -5), 2);
        assert_eq!(modulo(0, 3), 0);
    }

    #[test]
    #[should_panic(expected = "modulo by zero")]
    fn modulo_by_zero_panics() {
        modulo(3, 0);
    }

    #[test]
    fn within_tolerance_is_strict() {
        assert!(within_tolerance(1.0, 1.0, 0.0001));
        assert!(within_tolerance(1.0, 1.00005, 0.0001));
        assert!(!within_tolerance(1.0, 1.0001, 0.00001));
        assert!(!within_tolerance(1.0, 10.0, 2.0));
    }

    #[test]
    fn round_to_decimal_places() {
        assert_eq!(round_to_decimal(1.23456789, 1), 1.2);
        assert_eq!(round_to_decimal(1.23456789, 2), 1.23);
        assert_eq!(round_to_decimal(1.23456789, 3), 1.235);
        assert_eq!(round_to_decimal(1.23456789, 4), 1.2346);
        assert_eq!(round_to_decimal(-0.00004, 4), -0.0);
    }

    #[test]
    fn normalize() {
        assert_eq!(normalize_radians(0.0), 0.0);
        assert_eq!(normalize_radians(PI), PI);
        assert_eq!(normalize_radians(-PI), -PI);
        assert_eq!(normalize_radians(2.0 * PI), 0.0);
        assert_eq!(normalize_radians(-2.0 * PI), 0.0);
        assert!((normalize_radians(5.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((normalize_radians(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_huge_and_non_finite() {
        for r in [1e300, -1e300, 1e20, f64::MAX] {
            let n = normalize_radians(r);
            assert!(n.is_finite() && (-PI..=PI).contains(&n), "{r} -> {n}");
        }
        assert!(normalize_radians(f64::INFINITY).is_nan());
        assert!(normalize_radians(f64::NEG_INFINITY).is_nan());
        assert!(normalize_radians(f64::NAN).is_nan());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(rgb_to_hex(255, 0, 16), "#ff0010");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
    }
}
