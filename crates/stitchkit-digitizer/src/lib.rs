//! # StitchKit Digitizer
//!
//! The front half of the SVG-to-DST pipeline: walking an SVG document
//! into flat polylines ([`extract`]) and turning those polylines into a
//! scaled, hardware-valid stitch command sequence ([`planner`]).

pub mod extract;
pub mod planner;

pub use extract::{extract_polylines, Extraction};
pub use planner::{fallback_square, plan, StitchPlan};
