//! # StitchKit
//!
//! An SVG to Tajima DST embroidery stitch compiler with garment-specific
//! sizing presets.
//!
//! ## Architecture
//!
//! StitchKit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Geometry, stitch pattern model, units, errors
//! 2. **stitchkit-garments** - Garment placement profiles and registry
//! 3. **stitchkit-digitizer** - SVG extraction and stitch planning
//! 4. **stitchkit-dst** - Tajima DST binary encoding and decoding
//! 5. **stitchkit** - Pipeline facade and the command-line binary
//!
//! The data flow is strictly linear: SVG text goes through the
//! extractor into flat polylines, the planner scales them into the
//! garment envelope and emits stitch commands, and the encoder
//! serializes those commands into a machine-readable DST buffer.

pub mod pipeline;

pub use pipeline::{
    convert, convert_with_registry, Conversion, ConversionOptions, ConversionReport,
};

pub use stitchkit_core::{
    Bounds, ConversionWarning, ConvertError, ConvertResult, Pattern, Point, Polyline,
    StitchCommand,
};
pub use stitchkit_digitizer::{extract_polylines, fallback_square, plan, Extraction, StitchPlan};
pub use stitchkit_dst as dst;
pub use stitchkit_garments::{builtin_profiles, GarmentProfile, GarmentRegistry, DEFAULT_GARMENT_ID};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging on stderr with `RUST_LOG` environment
/// variable support; stdout stays reserved for the JSON report.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
