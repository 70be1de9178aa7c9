//! # StitchKit Core
//!
//! Core types shared by every stage of the SVG-to-DST pipeline:
//! planar geometry primitives, the abstract stitch command model,
//! Tajima coordinate units, and the error/warning taxonomy.

pub mod error;
pub mod geometry;
pub mod pattern;
pub mod units;

pub use error::{ConversionWarning, ConvertError, ConvertResult};
pub use geometry::{Bounds, Point, Polyline};
pub use pattern::{Pattern, StitchCommand};
pub use units::{mm_to_units, units_to_mm, MAX_RECORD_DELTA, MAX_RECORD_DELTA_MM, UNITS_PER_MM};
