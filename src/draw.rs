// Copyright 2025 the Penplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotter-ready SVG output.
//!
//! A [`Drawing`] collects shapes into named layers, each drawn with one
//! [`Pen`]. Writing the drawing produces an SVG document with one Inkscape
//! layer per non-empty layer, which plotter tooling can then plot pen by
//! pen.

use std::io;

use svg::node::element::{self, Group};
use svg::Document;

use crate::PathData;

const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

/// Name of the pen and layer every drawing starts with.
pub const DEFAULT_NAME: &str = "default";

/// An error from the drawing layer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DrawError {
    /// A layer refers to a pen that was never created.
    #[error("unknown pen `{0}`")]
    UnknownPen(String),
    /// A layer was selected that was never created.
    #[error("unknown layer `{0}`")]
    UnknownLayer(String),
    /// Writing the document failed.
    #[error("failed to write drawing")]
    Io(#[from] io::Error),
}

/// A stroke color and width.
#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    /// The name layers refer to this pen by.
    pub name: String,
    /// Any SVG color.
    pub color: String,
    /// Stroke width in user units.
    pub width: f64,
}

impl Pen {
    /// Create a new pen.
    pub fn new(name: impl Into<String>, color: impl Into<String>, width: f64) -> Pen {
        Pen {
            name: name.into(),
            color: color.into(),
            width,
        }
    }

    fn style(&self) -> String {
        format!(
            "fill:none;stroke:{};stroke-width:{}",
            self.color, self.width
        )
    }
}

/// A shape waiting to be written.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// A straight line.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// A circle.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Arbitrary path data.
    Path(String),
}

impl Item {
    fn to_group(&self, group: Group, style: &str) -> Group {
        match self {
            Item::Line { x1, y1, x2, y2 } => group.add(
                element::Line::new()
                    .set("x1", *x1)
                    .set("y1", *y1)
                    .set("x2", *x2)
                    .set("y2", *y2)
                    .set("style", style),
            ),
            Item::Circle { cx, cy, r } => group.add(
                element::Circle::new()
                    .set("cx", *cx)
                    .set("cy", *cy)
                    .set("r", *r)
                    .set("style", style),
            ),
            Item::Rect {
                x,
                y,
                width,
                height,
            } => group.add(
                element::Rectangle::new()
                    .set("x", *x)
                    .set("y", *y)
                    .set("width", *width)
                    .set("height", *height)
                    .set("style", style),
            ),
            Item::Path(data) => group.add(
                element::Path::new()
                    .set("d", data.as_str())
                    .set("style", style),
            ),
        }
    }
}

/// A named group of items drawn with one pen.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Position in creation order, starting at 1.
    pub index: usize,
    /// The name used to select the layer.
    pub name: String,
    /// Name of the pen the items are drawn with.
    pub pen: String,
    /// The items, in drawing order.
    pub items: Vec<Item>,
}

/// A drawing in progress.
///
/// ```
/// use penplot::draw::Drawing;
/// use penplot::Path;
///
/// let mut drawing = Drawing::new(100.0, 100.0);
/// drawing.new_pen_layer("red", "#ff0000", 0.5);
/// drawing.path(&Path::from_coords(&[10.0, 10.0, 90.0, 90.0], false));
///
/// let mut out = Vec::new();
/// drawing.write_to(&mut out).unwrap();
/// let svg = String::from_utf8(out).unwrap();
/// assert!(svg.contains("inkscape:label=\"2-red\""));
/// ```
#[derive(Clone, Debug)]
pub struct Drawing {
    width: f64,
    height: f64,
    pens: Vec<Pen>,
    layers: Vec<Layer>,
    active: usize,
}

impl Drawing {
    /// Create an empty drawing.
    ///
    /// It has a black pen of width 1 and an active layer drawing with it,
    /// both named [`DEFAULT_NAME`].
    pub fn new(width: f64, height: f64) -> Drawing {
        Drawing {
            width,
            height,
            pens: vec![Pen::new(DEFAULT_NAME, "black", 1.0)],
            layers: vec![Layer {
                index: 1,
                name: DEFAULT_NAME.to_string(),
                pen: DEFAULT_NAME.to_string(),
                items: Vec::new(),
            }],
            active: 0,
        }
    }

    /// Width of the document.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height of the document.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Add a pen, replacing any pen with the same name.
    pub fn new_pen(&mut self, name: &str, color: &str, width: f64) -> &Pen {
        let pen = Pen::new(name, color, width);
        let i = match self.pens.iter().position(|p| p.name == name) {
            Some(i) => {
                self.pens[i] = pen;
                i
            }
            None => {
                self.pens.push(pen);
                self.pens.len() - 1
            }
        };
        &self.pens[i]
    }

    /// Look up a pen by name.
    pub fn pen(&self, name: &str) -> Option<&Pen> {
        self.pens.iter().find(|p| p.name == name)
    }

    /// Add a layer drawn with `pen` and make it active.
    ///
    /// If a layer called `name` already exists it is made active instead,
    /// keeping its pen and items.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownPen`] if `pen` has not been created.
    pub fn new_layer(&mut self, name: &str, pen: &str) -> Result<&Layer, DrawError> {
        if let Some(i) = self.layer_position(name) {
            self.active = i;
            return Ok(&self.layers[i]);
        }
        if self.pen(pen).is_none() {
            return Err(DrawError::UnknownPen(pen.to_string()));
        }
        self.layers.push(Layer {
            index: self.layers.len() + 1,
            name: name.to_string(),
            pen: pen.to_string(),
            items: Vec::new(),
        });
        self.active = self.layers.len() - 1;
        log::trace!("new layer {name} drawn with {pen}");
        Ok(&self.layers[self.active])
    }

    /// Add a pen and a layer of the same name, and make the layer active.
    pub fn new_pen_layer(&mut self, name: &str, color: &str, width: f64) -> &Layer {
        self.new_pen(name, color, width);
        if let Some(i) = self.layer_position(name) {
            self.active = i;
        } else {
            self.layers.push(Layer {
                index: self.layers.len() + 1,
                name: name.to_string(),
                pen: name.to_string(),
                items: Vec::new(),
            });
            self.active = self.layers.len() - 1;
        }
        &self.layers[self.active]
    }

    /// Make an existing layer active.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownLayer`] if no layer is called `name`.
    pub fn on_layer(&mut self, name: &str) -> Result<(), DrawError> {
        self.active = self
            .layer_position(name)
            .ok_or_else(|| DrawError::UnknownLayer(name.to_string()))?;
        Ok(())
    }

    /// The layer new items go to.
    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active]
    }

    /// All layers, in creation order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn layer_position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    fn push(&mut self, item: Item) {
        self.layers[self.active].items.push(item);
    }

    /// Draw a line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.push(Item::Line { x1, y1, x2, y2 });
    }

    /// Draw a circle.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.push(Item::Circle { cx, cy, r });
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(Item::Rect {
            x,
            y,
            width,
            height,
        });
    }

    /// Draw anything that can describe itself as path data.
    pub fn path(&mut self, path: &(impl PathData + ?Sized)) {
        self.push(Item::Path(path.path_data()));
    }

    /// Draw several paths.
    pub fn paths<'a, P>(&mut self, paths: impl IntoIterator<Item = &'a P>)
    where
        P: PathData + ?Sized + 'a,
    {
        for path in paths {
            self.path(path);
        }
    }

    /// Build the SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::UnknownPen`] if a layer's pen is missing.
    pub fn to_document(&self) -> Result<Document, DrawError> {
        let mut document = Document::new()
            .set("xmlns:inkscape", INKSCAPE_NS)
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0.0, 0.0, self.width, self.height));
        for layer in self.layers.iter().filter(|l| !l.items.is_empty()) {
            let pen = self
                .pen(&layer.pen)
                .ok_or_else(|| DrawError::UnknownPen(layer.pen.clone()))?;
            let style = pen.style();
            let group = Group::new()
                .set("inkscape:groupmode", "layer")
                .set("id", format!("layer{}", layer.index))
                .set("inkscape:label", format!("{}-{}", layer.index, pen.name));
            let group = layer
                .items
                .iter()
                .fold(group, |group, item| item.to_group(group, &style));
            document = document.add(group);
        }
        Ok(document)
    }

    /// Write the drawing as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Io`] if writing fails.
    pub fn write_to(&self, writer: impl io::Write) -> Result<(), DrawError> {
        let document = self.to_document()?;
        log::debug!(
            "writing {} layers",
            self.layers.iter().filter(|l| !l.items.is_empty()).count()
        );
        svg::write(writer, &document)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawError, Drawing, Item, DEFAULT_NAME};
    use crate::{Line, Path, Polygon};

    fn render(drawing: &Drawing) -> String {
        let mut out = Vec::new();
        drawing.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn defaults() {
        let drawing = Drawing::new(200.0, 100.0);
        assert_eq!(drawing.width(), 200.0);
        assert_eq!(drawing.height(), 100.0);
        let pen = drawing.pen(DEFAULT_NAME).unwrap();
        assert_eq!(pen.color, "black");
        assert_eq!(pen.width, 1.0);
        assert_eq!(drawing.active_layer().name, DEFAULT_NAME);
        assert_eq!(drawing.active_layer().index, 1);
    }

    #[test]
    fn items_go_to_active_layer() {
        let mut drawing = Drawing::new(100.0, 100.0);
        drawing.line(0.0, 0.0, 10.0, 10.0);
        drawing.new_pen_layer("blue", "blue", 0.3);
        drawing.circle(5.0, 5.0, 2.0);
        drawing.rect(1.0, 2.0, 3.0, 4.0);
        drawing.on_layer(DEFAULT_NAME).unwrap();
        drawing.path(&Line::new((0.0, 0.0), (5.0, 0.0)));

        let layers = drawing.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].items.len(), 2);
        assert_eq!(layers[0].items[1], Item::Path("M0 0L5 0".to_string()));
        assert_eq!(layers[1].index, 2);
        assert_eq!(
            layers[1].items[0],
            Item::Circle {
                cx: 5.0,
                cy: 5.0,
                r: 2.0
            }
        );
    }

    #[test]
    fn existing_layer_is_reactivated() {
        let mut drawing = Drawing::new(10.0, 10.0);
        drawing.new_pen("fine", "red", 0.1);
        drawing.new_layer("details", "fine").unwrap();
        drawing.line(0.0, 0.0, 1.0, 1.0);
        drawing.new_layer(DEFAULT_NAME, "fine").unwrap();
        assert_eq!(drawing.active_layer().pen, DEFAULT_NAME);
        drawing.new_layer("details", DEFAULT_NAME).unwrap();
        assert_eq!(drawing.active_layer().items.len(), 1);
        assert_eq!(drawing.active_layer().pen, "fine");
        assert_eq!(drawing.layers().len(), 2);
    }

    #[test]
    fn unknown_names() {
        let mut drawing = Drawing::new(10.0, 10.0);
        assert!(matches!(
            drawing.new_layer("x", "missing"),
            Err(DrawError::UnknownPen(name)) if name == "missing"
        ));
        assert!(matches!(
            drawing.on_layer("nope"),
            Err(DrawError::UnknownLayer(name)) if name == "nope"
        ));
        assert_eq!(drawing.active_layer().name, DEFAULT_NAME);
    }

    #[test]
    fn document_layers() {
        let mut drawing = Drawing::new(100.0, 50.0);
        drawing.new_pen_layer("red", "#ff0000", 0.5);
        drawing.paths(&[
            Path::from_coords(&[0.0, 0.0, 10.0, 0.0], false),
            Path::from_coords(&[0.0, 5.0, 10.0, 5.0], false),
        ]);
        drawing.new_pen_layer("empty", "green", 1.0);
        drawing.on_layer(DEFAULT_NAME).unwrap();
        drawing.path(&Polygon::rectangle(0.0, 0.0, 10.0, 10.0));

        let svg = render(&drawing);
        assert!(svg.contains("xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\""));
        assert!(svg.contains("inkscape:groupmode=\"layer\""));
        assert!(svg.contains("id=\"layer1\""));
        assert!(svg.contains("inkscape:label=\"1-default\""));
        assert!(svg.contains("inkscape:label=\"2-red\""));
        assert!(!svg.contains("layer3"));
        assert!(svg.contains("fill:none;stroke:#ff0000;stroke-width:0.5"));
        assert!(svg.contains("fill:none;stroke:black;stroke-width:1"));
        assert!(svg.contains("d=\"M0 5L10 5\""));
        assert!(svg.contains("d=\"M0 0L10 0L10 10L0 10Z\""));
        let first = svg.find("id=\"layer1\"").unwrap();
        let second = svg.find("id=\"layer2\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn primitives_are_written() {
        let mut drawing = Drawing::new(10.0, 10.0);
        drawing.line(1.0, 2.0, 3.0, 4.0);
        drawing.circle(5.0, 5.0, 1.5);
        drawing.rect(0.0, 0.0, 2.0, 2.0);
        let svg = render(&drawing);
        assert!(svg.contains("<line"));
        assert!(svg.contains("x2=\"3\""));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("r=\"1.5\""));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn empty_drawing_has_no_layers() {
        let svg = render(&Drawing::new(10.0, 10.0));
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<g"));
    }
}
