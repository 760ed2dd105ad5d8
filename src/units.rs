// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Physical lengths and paper sizes.
//!
//! Lengths convert between metric units, imperial units and pixels. Pixels
//! are imperial, at a configurable number of pixels per inch, and pixel
//! results are rounded to whole pixels.

use std::fmt;

/// The usual screen resolution, in pixels per inch.
pub const DEFAULT_PIXELS_PER_INCH: f64 = 96.0;

/// Inches per meter.
const METERS_TO_INCHES: f64 = 1.0 / 0.0254;

/// Meters per inch.
const INCHES_TO_METERS: f64 = 0.0254;

/// A measuring system, each with its own base unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum System {
    /// Based on the meter.
    Metric,
    /// Based on the inch.
    Imperial,
}

impl System {
    /// Multiplier taking a value in this system's base unit to the other
    /// system's base unit.
    fn ratio(self) -> f64 {
        match self {
            System::Metric => METERS_TO_INCHES,
            System::Imperial => INCHES_TO_METERS,
        }
    }
}

/// A unit of length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    /// Millimeters.
    Millimeters,
    /// Centimeters.
    Centimeters,
    /// Meters, the metric base unit.
    Meters,
    /// A sixth of an inch.
    Picas,
    /// A seventy-second of an inch.
    Points,
    /// Inches, the imperial base unit.
    Inches,
    /// Twelve inches.
    Feet,
    /// Device pixels.
    Pixels {
        /// Resolution of the device.
        pixels_per_inch: f64,
    },
}

impl Unit {
    /// Pixels at [`DEFAULT_PIXELS_PER_INCH`].
    pub const PX: Unit = Unit::Pixels {
        pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
    };

    /// Pixels at the given resolution.
    #[inline]
    pub const fn pixels(pixels_per_inch: f64) -> Unit {
        Unit::Pixels { pixels_per_inch }
    }

    /// Look a unit up by its short name, such as `"mm"` or `"px"`.
    ///
    /// `"px"` gives pixels at the default resolution.
    pub fn from_name(name: &str) -> Option<Unit> {
        let unit = match name {
            "mm" => Unit::Millimeters,
            "cm" => Unit::Centimeters,
            "m" => Unit::Meters,
            "pc" => Unit::Picas,
            "pt" => Unit::Points,
            "in" => Unit::Inches,
            "ft" => Unit::Feet,
            "px" => Unit::PX,
            _ => return None,
        };
        Some(unit)
    }

    /// The short name.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Meters => "m",
            Unit::Picas => "pc",
            Unit::Points => "pt",
            Unit::Inches => "in",
            Unit::Feet => "ft",
            Unit::Pixels { .. } => "px",
        }
    }

    /// The system this unit belongs to.
    pub fn system(self) -> System {
        match self {
            Unit::Millimeters | Unit::Centimeters | Unit::Meters => System::Metric,
            _ => System::Imperial,
        }
    }

    /// The size of one unit in its system's base unit.
    ///
    /// For pixels this is the resolution.
    pub fn factor(self) -> f64 {
        match self {
            Unit::Millimeters => 1.0 / 1000.0,
            Unit::Centimeters => 1.0 / 100.0,
            Unit::Meters => 1.0,
            Unit::Picas => 1.0 / 6.0,
            Unit::Points => 1.0 / 72.0,
            Unit::Inches => 1.0,
            Unit::Feet => 12.0,
            Unit::Pixels { pixels_per_inch } => pixels_per_inch,
        }
    }

    /// Whether this is a pixel unit, at any resolution.
    #[inline]
    pub fn is_pixels(self) -> bool {
        matches!(self, Unit::Pixels { .. })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value tagged with its unit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Length {
    /// The magnitude.
    pub value: f64,
    /// The unit `value` is measured in.
    pub unit: Unit,
}

impl Length {
    /// Create a new length.
    #[inline]
    pub const fn new(value: f64, unit: Unit) -> Length {
        Length { value, unit }
    }

    /// Express this length in another unit.
    ///
    /// Converting to the same unit returns the length unchanged. Pixel
    /// results are rounded to the nearest whole pixel.
    ///
    /// ```
    /// use penplot::units::{Length, Unit};
    ///
    /// assert_eq!(Length::new(1.0, Unit::Inches).to(Unit::PX).value, 96.0);
    /// assert_eq!(Length::new(6.0, Unit::Centimeters).to(Unit::PX).value, 227.0);
    /// ```
    #[must_use]
    pub fn to(self, unit: Unit) -> Length {
        if self.unit == unit {
            return self;
        }
        let (from_unit, from_factor) = match self.unit {
            Unit::Pixels { pixels_per_inch } => (Unit::Inches, 1.0 / pixels_per_inch),
            other => (other, 1.0),
        };
        let (to_unit, to_factor) = match unit {
            Unit::Pixels { pixels_per_inch } => (Unit::Inches, pixels_per_inch),
            other => (other, 1.0),
        };

        let mut anchor = self.value * from_unit.factor() * from_factor;
        if from_unit.system() != to_unit.system() {
            anchor *= self.unit.system().ratio();
        }
        let mut value = anchor / to_unit.factor() * to_factor;
        if unit.is_pixels() {
            value = value.round();
        }
        Length { value, unit }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// A width and a height.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// The horizontal side.
    pub width: Length,
    /// The vertical side.
    pub height: Length,
}

impl Dimensions {
    /// Both sides in `unit`.
    #[must_use]
    pub fn to(self, unit: Unit) -> Dimensions {
        Dimensions {
            width: self.width.to(unit),
            height: self.height.to(unit),
        }
    }

    /// Swap width and height.
    #[must_use]
    pub fn swap(self) -> Dimensions {
        Dimensions {
            width: self.height,
            height: self.width,
        }
    }
}

/// A named sheet size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaperSize {
    /// The lowercase name, such as `"a4"`.
    pub name: &'static str,
    /// As listed, which is usually portrait.
    pub dimensions: Dimensions,
}

impl PaperSize {
    /// A paper size with both sides in `unit`.
    pub const fn new(name: &'static str, width: f64, height: f64, unit: Unit) -> PaperSize {
        PaperSize {
            name,
            dimensions: Dimensions {
                width: Length::new(width, unit),
                height: Length::new(height, unit),
            },
        }
    }

    /// Look a size up by name, such as `"a4"` or `"letter"`.
    pub fn by_name(name: &str) -> Option<PaperSize> {
        PAPER_SIZES.iter().find(|p| p.name == name).copied()
    }

    /// The dimensions with the longer side as the width.
    pub fn landscape(&self) -> Dimensions {
        let d = self.dimensions;
        if d.width.value >= d.height.value {
            d
        } else {
            d.swap()
        }
    }

    /// The dimensions with the longer side as the height.
    pub fn portrait(&self) -> Dimensions {
        let d = self.dimensions;
        if d.width.value <= d.height.value {
            d
        } else {
            d.swap()
        }
    }
}

/// Every known paper size.
///
/// North-American sizes are listed in inches, the rest in millimeters.
pub const PAPER_SIZES: &[PaperSize] = &[
    PaperSize::new("postcard", 101.6, 152.4, Unit::Millimeters),
    PaperSize::new("poster-small", 280.0, 430.0, Unit::Millimeters),
    PaperSize::new("poster", 460.0, 610.0, Unit::Millimeters),
    PaperSize::new("poster-large", 610.0, 910.0, Unit::Millimeters),
    PaperSize::new("business-card", 50.8, 88.9, Unit::Millimeters),
    PaperSize::new("2r", 64.0, 89.0, Unit::Millimeters),
    PaperSize::new("3r", 89.0, 127.0, Unit::Millimeters),
    PaperSize::new("4r", 102.0, 152.0, Unit::Millimeters),
    PaperSize::new("5r", 127.0, 178.0, Unit::Millimeters),
    PaperSize::new("6r", 152.0, 203.0, Unit::Millimeters),
    PaperSize::new("8r", 203.0, 254.0, Unit::Millimeters),
    PaperSize::new("10r", 254.0, 305.0, Unit::Millimeters),
    PaperSize::new("11r", 279.0, 356.0, Unit::Millimeters),
    PaperSize::new("12r", 305.0, 381.0, Unit::Millimeters),
    PaperSize::new("a0", 841.0, 1189.0, Unit::Millimeters),
    PaperSize::new("a1", 594.0, 841.0, Unit::Millimeters),
    PaperSize::new("a2", 420.0, 594.0, Unit::Millimeters),
    PaperSize::new("a3", 297.0, 420.0, Unit::Millimeters),
    PaperSize::new("a4", 210.0, 297.0, Unit::Millimeters),
    PaperSize::new("a5", 148.0, 210.0, Unit::Millimeters),
    PaperSize::new("a6", 105.0, 148.0, Unit::Millimeters),
    PaperSize::new("a7", 74.0, 105.0, Unit::Millimeters),
    PaperSize::new("a8", 52.0, 74.0, Unit::Millimeters),
    PaperSize::new("a9", 37.0, 52.0, Unit::Millimeters),
    PaperSize::new("a10", 26.0, 37.0, Unit::Millimeters),
    PaperSize::new("2a0", 1189.0, 1682.0, Unit::Millimeters),
    PaperSize::new("4a0", 1682.0, 2378.0, Unit::Millimeters),
    PaperSize::new("b0", 1000.0, 1414.0, Unit::Millimeters),
    PaperSize::new("b1", 707.0, 1000.0, Unit::Millimeters),
    PaperSize::new("b1+", 720.0, 1020.0, Unit::Millimeters),
    PaperSize::new("b2", 500.0, 707.0, Unit::Millimeters),
    PaperSize::new("b2+", 520.0, 720.0, Unit::Millimeters),
    PaperSize::new("b3", 353.0, 500.0, Unit::Millimeters),
    PaperSize::new("b4", 250.0, 353.0, Unit::Millimeters),
    PaperSize::new("b5", 176.0, 250.0, Unit::Millimeters),
    PaperSize::new("b6", 125.0, 176.0, Unit::Millimeters),
    PaperSize::new("b7", 88.0, 125.0, Unit::Millimeters),
    PaperSize::new("b8", 62.0, 88.0, Unit::Millimeters),
    PaperSize::new("b9", 44.0, 62.0, Unit::Millimeters),
    PaperSize::new("b10", 31.0, 44.0, Unit::Millimeters),
    PaperSize::new("b11", 22.0, 32.0, Unit::Millimeters),
    PaperSize::new("b12", 16.0, 22.0, Unit::Millimeters),
    PaperSize::new("c0", 917.0, 1297.0, Unit::Millimeters),
    PaperSize::new("c1", 648.0, 917.0, Unit::Millimeters),
    PaperSize::new("c2", 458.0, 648.0, Unit::Millimeters),
    PaperSize::new("c3", 324.0, 458.0, Unit::Millimeters),
    PaperSize::new("c4", 229.0, 324.0, Unit::Millimeters),
    PaperSize::new("c5", 162.0, 229.0, Unit::Millimeters),
    PaperSize::new("c6", 114.0, 162.0, Unit::Millimeters),
    PaperSize::new("c7", 81.0, 114.0, Unit::Millimeters),
    PaperSize::new("c8", 57.0, 81.0, Unit::Millimeters),
    PaperSize::new("c9", 40.0, 57.0, Unit::Millimeters),
    PaperSize::new("c10", 28.0, 40.0, Unit::Millimeters),
    PaperSize::new("c11", 22.0, 32.0, Unit::Millimeters),
    PaperSize::new("c12", 16.0, 22.0, Unit::Millimeters),
    PaperSize::new("half-letter", 5.5, 8.5, Unit::Inches),
    PaperSize::new("letter", 8.5, 11.0, Unit::Inches),
    PaperSize::new("legal", 8.5, 14.0, Unit::Inches),
    PaperSize::new("junior-legal", 5.0, 8.0, Unit::Inches),
    PaperSize::new("ledger", 11.0, 17.0, Unit::Inches),
    PaperSize::new("tabloid", 11.0, 17.0, Unit::Inches),
    PaperSize::new("ansi-a", 8.5, 11.0, Unit::Inches),
    PaperSize::new("ansi-b", 11.0, 17.0, Unit::Inches),
    PaperSize::new("ansi-c", 17.0, 22.0, Unit::Inches),
    PaperSize::new("ansi-d", 22.0, 34.0, Unit::Inches),
    PaperSize::new("ansi-e", 34.0, 44.0, Unit::Inches),
    PaperSize::new("arch-a", 9.0, 12.0, Unit::Inches),
    PaperSize::new("arch-b", 12.0, 18.0, Unit::Inches),
    PaperSize::new("arch-c", 18.0, 24.0, Unit::Inches),
    PaperSize::new("arch-d", 24.0, 36.0, Unit::Inches),
    PaperSize::new("arch-e", 36.0, 48.0, Unit::Inches),
    PaperSize::new("arch-e1", 30.0, 42.0, Unit::Inches),
    PaperSize::new("arch-e2", 26.0, 38.0, Unit::Inches),
    PaperSize::new("arch-e3", 27.0, 39.0, Unit::Inches),
];
