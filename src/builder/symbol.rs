use std::f64::consts::PI;

use log::debug;

// Shape
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Geometry primitive in module units, origin at the top left corner of the
/// symbol (quiet zone excluded). Everything is ink except light ellipses.
#[derive(Debug, PartialEq, Clone)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Polygon(Vec<(f64, f64)>),
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64, dark: bool },
    Text { x: f64, y: f64, text: String, align: TextAlign },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::Rect { x, y, width, height }
    }

    /// Regular hexagon with a vertex pointing up.
    pub fn hexagon(cx: f64, cy: f64, radius: f64) -> Self {
        let points = (0..6)
            .map(|k| {
                let angle = PI / 3.0 * k as f64;
                (cx + radius * angle.sin(), cy - radius * angle.cos())
            })
            .collect();
        Self::Polygon(points)
    }

    pub fn circle(cx: f64, cy: f64, radius: f64, dark: bool) -> Self {
        Self::Ellipse { cx, cy, rx: radius, ry: radius, dark }
    }

    /// Bullseye of concentric rings from `radii`, outermost first, alternating
    /// dark and light.
    pub fn bullseye(cx: f64, cy: f64, radii: &[f64]) -> Vec<Self> {
        radii.iter().enumerate().map(|(i, &r)| Self::circle(cx, cy, r, i % 2 == 0)).collect()
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`; text is a point.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Self::Rect { x, y, width, height } => (*x, *y, x + width, y + height),
            Self::Polygon(points) => points.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            ),
            Self::Ellipse { cx, cy, rx, ry, .. } => (cx - rx, cy - ry, cx + rx, cy + ry),
            Self::Text { x, y, .. } => (*x, *y, *x, *y),
        }
    }
}

// Content
//------------------------------------------------------------------------------

/// Codewords for matrix and stacked symbologies, bar/space run lengths for
/// linear ones. A symbol carries exactly one of them.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Content {
    Codewords(Vec<u16>),
    Pattern(Vec<String>),
}

// Segment info
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SegmentInfo {
    /// Zero based
    pub index: usize,
    pub total: usize,
    pub message_id: Option<u32>,
}

// Symbol
//------------------------------------------------------------------------------

/// Result of one encode run. Only the crate's encoders construct and populate
/// it; outside the crate a symbol is read-only.
///
/// ```compile_fail
/// use barcodism::{DataMatrix, Shape, SymbolBuilder};
///
/// let mut symbol = SymbolBuilder::new(DataMatrix::new(), "123456").build().unwrap();
/// symbol.push_shape(Shape::rect(0.0, 0.0, 1.0, 1.0));
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct Symbol {
    symbology: &'static str,
    version: usize,
    width: usize,
    height: usize,
    quiet_zone: usize,
    shapes: Vec<Shape>,
    content: Content,
    encode_info: Vec<String>,
    segment: Option<SegmentInfo>,
}

impl Symbol {
    pub(crate) fn new(symbology: &'static str, version: usize, width: usize, height: usize, content: Content) -> Self {
        Self {
            symbology,
            version,
            width,
            height,
            quiet_zone: 0,
            shapes: Vec::new(),
            content,
            encode_info: Vec::new(),
            segment: None,
        }
    }

    pub(crate) fn with_quiet_zone(mut self, quiet_zone: usize) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    pub(crate) fn with_segment(mut self, segment: Option<SegmentInfo>) -> Self {
        self.segment = segment;
        self
    }

    pub(crate) fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Appends a line to the encode-info log, mirrored to the `log` facade.
    pub(crate) fn info(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("[{}] {line}", self.symbology);
        self.encode_info.push(line);
    }
}

impl Symbol {
    pub fn symbology(&self) -> &'static str {
        self.symbology
    }

    pub fn version(&self) -> usize {
        self.version
    }

    /// Width in modules, quiet zone excluded
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn codewords(&self) -> Option<&[u16]> {
        match &self.content {
            Content::Codewords(cw) => Some(cw),
            Content::Pattern(_) => None,
        }
    }

    pub fn pattern(&self) -> Option<&[String]> {
        match &self.content {
            Content::Pattern(p) => Some(p),
            Content::Codewords(_) => None,
        }
    }

    pub fn encode_info(&self) -> &[String] {
        &self.encode_info
    }

    pub fn segment(&self) -> Option<SegmentInfo> {
        self.segment
    }

    /// Whether the module at `(row, col)` is covered by an ink rectangle.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        let (x, y) = (col as f64 + 0.5, row as f64 + 0.5);
        self.shapes.iter().any(|s| match s {
            Shape::Rect { x: rx, y: ry, width, height } => {
                *rx <= x && x < rx + width && *ry <= y && y < ry + height
            }
            _ => false,
        })
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.height * (self.width + 1));
        for r in 0..self.height {
            for c in 0..self.width {
                res.push(if self.is_dark(r, c) { '#' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}
