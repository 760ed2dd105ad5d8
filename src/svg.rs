// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data.
//!
//! Paths are written in a compact absolute form with coordinates rounded to
//! whole units, which is what plotter drivers expect. The parser reads back
//! the same subset: absolute `M`, `L`, `C`, `Q`, `T`, `A` and `Z`.

use crate::{Arc, Curve, Line, Path, PathData, Point, Polygon, Segment};

/// Round a coordinate for output.
#[inline]
fn coord(v: f64) -> i64 {
    v.round() as i64
}

fn push_point(out: &mut String, p: Point) {
    out.push_str(&format!("{} {}", coord(p.x), coord(p.y)));
}

impl Curve {
    /// The command letter and control parameters for this curve.
    ///
    /// The end point is not included; the caller appends it. A smooth
    /// quadratic is written as `T` with no control point.
    pub fn path_data(&self) -> String {
        match self {
            Curve::Cubic { c1, c2 } => format!(
                "C{} {} {} {} ",
                coord(c1.x),
                coord(c1.y),
                coord(c2.x),
                coord(c2.y)
            ),
            Curve::Quadratic { c: Some(c) } => format!("Q{} {} ", coord(c.x), coord(c.y)),
            Curve::Quadratic { c: None } => "T".to_string(),
            Curve::Arc(arc) => format!(
                "A{} {} {} {} {} ",
                coord(arc.rx),
                coord(arc.ry),
                coord(arc.x_rotation),
                u8::from(arc.large_arc),
                u8::from(arc.sweep)
            ),
        }
    }
}

impl PathData for Path {
    /// Write the path as `M`, then one command per edge.
    ///
    /// A closed path ends in `Z` when its closing edge is straight. A curve
    /// cannot close through `Z`, so a curved closing edge is written out in
    /// full, ending on the first vertex.
    fn path_data(&self) -> String {
        let segments = self.segments();
        let Some(first) = segments.first() else {
            return String::new();
        };
        let mut out = String::from("M");
        push_point(&mut out, first.point);
        for pair in segments.windows(2) {
            match &pair[0].curve {
                Some(curve) => out.push_str(&curve.path_data()),
                None => out.push('L'),
            }
            push_point(&mut out, pair[1].point);
        }
        if self.is_closed() {
            match segments.last().and_then(|s| s.curve) {
                Some(curve) => {
                    out.push_str(&curve.path_data());
                    push_point(&mut out, first.point);
                }
                None => out.push('Z'),
            }
        }
        out
    }
}

impl PathData for Polygon {
    fn path_data(&self) -> String {
        self.as_path().path_data()
    }
}

impl PathData for Line {
    fn path_data(&self) -> String {
        let mut out = String::from("M");
        push_point(&mut out, self.p0);
        out.push('L');
        push_point(&mut out, self.p1);
        out
    }
}

/// Already formatted path data, passed through unchanged.
impl PathData for str {
    fn path_data(&self) -> String {
        self.to_string()
    }
}

impl PathData for String {
    fn path_data(&self) -> String {
        self.clone()
    }
}

impl Path {
    /// Parse SVG path data.
    ///
    /// Only absolute commands of a single subpath are accepted. A number
    /// where a command is expected repeats the previous command, with `M`
    /// repeating as `L`. On `Z`, a final vertex that duplicates the first
    /// is folded into the closing edge.
    ///
    /// # Errors
    ///
    /// Returns an [`SvgParseError`] describing the first problem found.
    pub fn from_path_data(data: &str) -> Result<Path, SvgParseError> {
        let mut lexer = SvgLexer::new(data);
        let mut segments: Vec<Segment> = Vec::new();
        let mut closed = false;
        let mut last_cmd = 0;
        while let Some(c) = lexer.get_cmd(last_cmd)? {
            if closed || (c == b'M' && !segments.is_empty()) {
                return Err(SvgParseError::MultipleSubpaths);
            }
            if c != b'M' && segments.is_empty() {
                return Err(SvgParseError::MissingMoveTo);
            }
            match c {
                b'M' => {
                    segments.push(Segment::new(lexer.get_number_pair()?));
                    last_cmd = b'L';
                }
                b'L' => {
                    segments.push(Segment::new(lexer.get_number_pair()?));
                    last_cmd = c;
                }
                b'C' => {
                    let c1 = lexer.get_number_pair()?;
                    let c2 = lexer.get_number_pair()?;
                    let p = lexer.get_number_pair()?;
                    push_curve(&mut segments, Curve::cubic(c1, c2), p);
                    last_cmd = c;
                }
                b'Q' => {
                    let c1 = lexer.get_number_pair()?;
                    let p = lexer.get_number_pair()?;
                    push_curve(&mut segments, Curve::quadratic(c1), p);
                    last_cmd = c;
                }
                b'T' => {
                    let p = lexer.get_number_pair()?;
                    push_curve(&mut segments, Curve::smooth_quadratic(), p);
                    last_cmd = c;
                }
                b'A' => {
                    let rx = lexer.get_number()?;
                    lexer.opt_comma();
                    let ry = lexer.get_number()?;
                    lexer.opt_comma();
                    let x_rotation = lexer.get_number()?;
                    lexer.opt_comma();
                    let large_arc = lexer.get_flag()?;
                    let sweep = lexer.get_flag()?;
                    let p = lexer.get_number_pair()?;
                    let arc = Arc::new(rx, ry, x_rotation, large_arc, sweep);
                    push_curve(&mut segments, Curve::Arc(arc), p);
                    last_cmd = c;
                }
                b'Z' => {
                    closed = true;
                    let n = segments.len();
                    if n > 1 && segments[n - 1].point == segments[0].point {
                        segments.pop();
                    }
                    last_cmd = 0;
                }
                _ => return Err(SvgParseError::UnknownCommand(char::from(c))),
            }
        }
        Ok(Path::new(segments, closed))
    }
}

/// Attach `curve` to the last vertex and add the vertex it ends on.
fn push_curve(segments: &mut Vec<Segment>, curve: Curve, to: Point) {
    if let Some(last) = segments.last_mut() {
        last.curve = Some(curve);
    }
    segments.push(Segment::new(to));
}

/// An error which can be returned when parsing path data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SvgParseError {
    /// A number was expected at this byte offset.
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    /// An arc flag other than `0` or `1` at this byte offset.
    #[error("invalid arc flag at byte {0}")]
    InvalidFlag(usize),
    /// The input ended in the middle of a command.
    #[error("unexpected end of path data")]
    UnexpectedEof,
    /// A command letter that is not supported.
    #[error("unsupported path command `{0}`")]
    UnknownCommand(char),
    /// Drawing started before any `M` command.
    #[error("path data must start with a move command")]
    MissingMoveTo,
    /// A second subpath, or anything after `Z`.
    #[error("only a single subpath is supported")]
    MultipleSubpaths,
    /// Input that is neither a command nor a number, at this byte offset.
    #[error("unexpected character at byte {0}")]
    UnexpectedChar(usize),
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
}

impl SvgLexer<'_> {
    fn new(data: &str) -> SvgLexer<'_> {
        SvgLexer { data, ix: 0 }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    /// The next command, or `last_cmd` again if a number follows.
    fn get_cmd(&mut self, last_cmd: u8) -> Result<Option<u8>, SvgParseError> {
        self.skip_ws();
        let Some(c) = self.get_byte() else {
            return Ok(None);
        };
        if c.is_ascii_alphabetic() {
            return Ok(Some(c));
        }
        self.unget();
        if last_cmd != 0 && (c == b'-' || c == b'+' || c == b'.' || c.is_ascii_digit()) {
            Ok(Some(last_cmd))
        } else {
            Err(SvgParseError::UnexpectedChar(self.ix))
        }
    }

    fn get_byte(&mut self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).map(|&c| {
            self.ix += 1;
            c
        })
    }

    fn unget(&mut self) {
        self.ix -= 1;
    }

    fn get_number(&mut self) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        let c = self.get_byte().ok_or(SvgParseError::UnexpectedEof)?;
        if !(c == b'-' || c == b'+') {
            self.unget();
        }
        let mut digit_count = 0;
        let mut seen_period = false;
        while let Some(c) = self.get_byte() {
            if c.is_ascii_digit() {
                digit_count += 1;
            } else if c == b'.' && !seen_period {
                seen_period = true;
            } else {
                self.unget();
                break;
            }
        }
        if digit_count > 0 {
            self.opt_exponent();
            self.data[start..self.ix]
                .parse()
                .map_err(|_| SvgParseError::InvalidNumber(start))
        } else {
            Err(SvgParseError::InvalidNumber(start))
        }
    }

    /// Consume an exponent such as `e-3`, if a complete one follows.
    fn opt_exponent(&mut self) {
        let mark = self.ix;
        if !matches!(self.get_byte(), Some(b'e' | b'E')) {
            self.ix = mark;
            return;
        }
        if !matches!(self.get_byte(), Some(b'-' | b'+')) {
            self.unget();
        }
        let exp_start = self.ix;
        while let Some(c) = self.get_byte() {
            if !c.is_ascii_digit() {
                self.unget();
                break;
            }
        }
        if self.ix == exp_start {
            self.ix = mark;
        }
    }

    fn get_number_pair(&mut self) -> Result<Point, SvgParseError> {
        let x = self.get_number()?;
        self.opt_comma();
        let y = self.get_number()?;
        self.opt_comma();
        Ok(Point::new(x, y))
    }

    fn get_flag(&mut self) -> Result<bool, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        let flag = match self.get_byte() {
            Some(b'0') => false,
            Some(b'1') => true,
            Some(_) => return Err(SvgParseError::InvalidFlag(start)),
            None => return Err(SvgParseError::UnexpectedEof),
        };
        self.opt_comma();
        Ok(flag)
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if let Some(c) = self.get_byte() {
            if c != b',' {
                self.unget();
            }
        }
    }
}
