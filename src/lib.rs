// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D path geometry for pen plotters.
//!
//! The penplot library represents drawings as paths of straight and curved
//! edges, and provides the geometry a plotter workflow needs: bounding
//! boxes, lengths, intersections between lines, curves and paths, clipping
//! paths to a rectangle, polygons with containment and boolean operations,
//! physical units and paper sizes, and SVG output grouped into one layer
//! per pen.
//!
//! # Examples
//!
//! Clip a curved path to the page and write it out as path data:
//!
//! ```
//! use penplot::{clip_path, Bounds, ClipOpts, Path, PathData, Segment};
//!
//! let page = Bounds::new(0.0, 100.0, 100.0, 0.0);
//! let path = Path::from_segments(
//!     [
//!         Segment::new((-20.0, 50.0)),
//!         Segment::cubic((50.0, 50.0), (60.0, 20.0), (80.0, 80.0)),
//!         Segment::new((90.0, 50.0)),
//!         Segment::new((120.0, 50.0)),
//!     ],
//!     false,
//! );
//! let pieces = clip_path(&page, &path, &ClipOpts::default()).unwrap();
//! assert_eq!(pieces.len(), 1);
//! assert_eq!(pieces[0].path_data(), "M0 50L50 50C60 20 80 80 90 50L100 50");
//! ```
//!
//! Polygons support containment tests and boolean operations:
//!
//! ```
//! use penplot::Polygon;
//!
//! let a = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
//! let b = Polygon::rectangle(5.0, 5.0, 10.0, 10.0);
//! assert!(a.contains_point((2.0, 2.0)));
//! assert_eq!(a.union(&[b]).len(), 1);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for the geometric value types.
//! - `schemars`: JSON schemas for the same types.
//! - `mint`: conversions between [`Point`] and `mint::Point2<f64>`.

#![forbid(unsafe_code)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod arc;
mod bounds;
mod clip;
pub mod common;
mod cubicbez;
mod curve;
pub mod draw;
mod line;
mod param_curve;
mod path;
mod point;
mod polygon;
mod quadbez;
mod segment;
mod svg;
pub mod units;

pub use crate::arc::*;
pub use crate::bounds::*;
pub use crate::clip::*;
pub use crate::cubicbez::*;
pub use crate::curve::*;
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::point::*;
pub use crate::polygon::*;
pub use crate::quadbez::*;
pub use crate::segment::*;
pub use crate::svg::*;
