//! Error and warning types for the conversion pipeline.
//!
//! Fatal conditions abort a conversion before any output bytes exist;
//! non-fatal conditions are collected as [`ConversionWarning`]s and
//! returned alongside a successful result so the caller can report them.
//!
//! All error types use `thiserror` for ergonomic error handling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Fatal conversion errors.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Source geometry collapsed to a zero-area bounding box.
    #[error("Degenerate geometry: bounds are {width} x {height}, nothing to stitch")]
    DegenerateGeometry { width: f64, height: f64 },

    /// A single stitch movement exceeds the per-record range of the
    /// target format (±121 units of 0.1 mm per axis).
    #[error("Stitch delta ({dx}, {dy}) exceeds the representable range of +/-121 units per record")]
    CoordinateRange { dx: i32, dy: i32 },

    /// A garment profile failed validation or could not be loaded.
    #[error("Garment profile error: {0}")]
    Profile(String),

    /// Binary encoding failed for a reason other than delta range.
    #[error("DST encoding failed: {0}")]
    Encode(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Non-fatal conditions surfaced to the caller alongside a successful
/// conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionWarning {
    /// The SVG source could not be fully parsed; extraction degraded to
    /// whatever geometry was recovered before the parse failure.
    MalformedInput { detail: String },

    /// Extraction produced no geometry and the default test square was
    /// substituted in its place.
    EmptyGeometrySubstituted,

    /// The requested garment id is not registered; the default profile
    /// was used instead.
    UnknownGarmentType { requested: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { detail } => {
                write!(f, "SVG input partially unreadable: {detail}")
            }
            Self::EmptyGeometrySubstituted => {
                write!(f, "no extractable geometry, default test square substituted")
            }
            Self::UnknownGarmentType { requested } => {
                write!(f, "unknown garment type '{requested}', default profile used")
            }
        }
    }
}
