//! SVG geometry extraction.
//!
//! Walks an SVG document in document order and flattens the supported
//! shape elements into polylines in document coordinate space.
//! Extraction never fails: malformed input degrades to whatever
//! geometry was recovered before the parse error, with a warning
//! attached for the caller.
//!
//! Path data is scraped for numeric literals and the numbers paired
//! consecutively into coordinates; the path command letters themselves
//! are not interpreted. This samples polygon vertices rather than
//! flattening curves, a known limitation preserved from the reference
//! behavior.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::OnceLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::warn;

use stitchkit_core::error::ConversionWarning;
use stitchkit_core::geometry::{Point, Polyline};

/// Number of segments used to approximate a circle.
const CIRCLE_SEGMENTS: usize = 16;

/// Result of walking one SVG document.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Flat polylines in document coordinates, in document order.
    pub polylines: Vec<Polyline>,
    /// Non-fatal conditions hit while parsing.
    pub warnings: Vec<ConversionWarning>,
}

/// Shape elements the extractor understands. Closed set: adding a new
/// element type means adding a variant and a handler arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Path,
    Rect,
    Circle,
}

impl ShapeKind {
    /// Match by local name so `<path>` and `<svg:path>` both resolve,
    /// whatever prefix the document binds the SVG namespace to.
    fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }
}

/// Attribute bag for one element.
#[derive(Debug)]
struct AttrMap {
    attrs: HashMap<String, String>,
}

impl AttrMap {
    fn from_event(e: &BytesStart<'_>) -> Self {
        let mut attrs = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = String::from_utf8_lossy(&attr.value).to_string();
            attrs.insert(key, value);
        }
        Self { attrs }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn get_f64(&self, key: &str) -> f64 {
        self.get(key).and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
    }
}

fn number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").expect("invalid number regex")
    })
}

/// Extract all supported shapes from SVG source text.
pub fn extract_polylines(svg: &str) -> Extraction {
    let mut extraction = Extraction::default();

    let mut reader = Reader::from_str(svg);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if let Some(kind) = ShapeKind::from_local_name(&local) {
                    let attrs = AttrMap::from_event(&e);
                    if let Some(polyline) = shape_to_polyline(kind, &attrs) {
                        extraction.polylines.push(polyline);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "SVG parse failed, keeping geometry extracted so far");
                extraction.warnings.push(ConversionWarning::MalformedInput {
                    detail: err.to_string(),
                });
                break;
            }
        }
        buf.clear();
    }

    extraction
}

/// Dispatch one element to its handler.
fn shape_to_polyline(kind: ShapeKind, attrs: &AttrMap) -> Option<Polyline> {
    match kind {
        ShapeKind::Path => path_polyline(attrs.get("d").unwrap_or_default()),
        ShapeKind::Rect => rect_polyline(
            attrs.get_f64("x"),
            attrs.get_f64("y"),
            attrs.get_f64("width"),
            attrs.get_f64("height"),
        ),
        ShapeKind::Circle => circle_polyline(
            attrs.get_f64("cx"),
            attrs.get_f64("cy"),
            attrs.get_f64("r"),
        ),
    }
}

/// Scrape numeric literals out of path data and pair them into points.
/// A trailing unpaired number is dropped. Yields a polyline only when
/// at least two points result.
fn path_polyline(data: &str) -> Option<Polyline> {
    let numbers: Vec<f64> = number_pattern()
        .find_iter(data)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let polyline: Polyline = numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();

    polyline.is_stitchable().then_some(polyline)
}

/// Four corners clockwise from (x, y), closed back to the start point.
/// Degenerate rectangles are skipped.
fn rect_polyline(x: f64, y: f64, width: f64, height: f64) -> Option<Polyline> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Polyline::from_points(vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
        Point::new(x, y),
    ]))
}

/// Regular 16-gon inscribed on the circle, closed back to the first
/// vertex. Degenerate circles are skipped.
fn circle_polyline(cx: f64, cy: f64, r: f64) -> Option<Polyline> {
    if r <= 0.0 {
        return None;
    }
    let mut polyline = Polyline::new();
    for i in 0..=CIRCLE_SEGMENTS {
        let angle = 2.0 * PI * (i % CIRCLE_SEGMENTS) as f64 / CIRCLE_SEGMENTS as f64;
        polyline.push(Point::new(cx + r * angle.cos(), cy + r * angle.sin()));
    }
    Some(polyline)
}
