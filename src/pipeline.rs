//! End-to-end SVG to DST conversion.
//!
//! Wires the pipeline stages together: extract, resolve the garment
//! profile, plan, encode. Each conversion is a pure function of its
//! inputs; the registry is read-only and can be shared across threads.

use serde::Serialize;
use tracing::{debug, warn};

use stitchkit_core::error::{ConversionWarning, ConvertResult};
use stitchkit_digitizer::{extract_polylines, plan};
use stitchkit_garments::{GarmentProfile, GarmentRegistry};

/// Knobs for one conversion.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Design label embedded in the DST header.
    pub design_name: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            design_name: "DESIGN".to_string(),
        }
    }
}

/// A finished conversion: the DST buffer plus everything a caller
/// needs to report on it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub dst: Vec<u8>,
    pub profile: GarmentProfile,
    /// Movement records in the output (jumps and stitches).
    pub stitch_count: usize,
    /// Design extents after scaling, millimeters.
    pub width_mm: f64,
    pub height_mm: f64,
    /// Uniform document-units-to-mm scale factor applied.
    pub scale: f64,
    /// Non-fatal conditions hit along the way.
    pub warnings: Vec<ConversionWarning>,
}

/// Convert with the built-in garment registry.
pub fn convert(
    svg: &str,
    garment_id: &str,
    options: &ConversionOptions,
) -> ConvertResult<Conversion> {
    convert_with_registry(&GarmentRegistry::builtin(), svg, garment_id, options)
}

/// Convert against an explicit registry (custom profile sets, tests).
///
/// Fatal errors abort before any output bytes exist; non-fatal
/// conditions are collected on the returned [`Conversion`].
pub fn convert_with_registry(
    registry: &GarmentRegistry,
    svg: &str,
    garment_id: &str,
    options: &ConversionOptions,
) -> ConvertResult<Conversion> {
    let extraction = extract_polylines(svg);
    let mut warnings = extraction.warnings;
    debug!(
        polylines = extraction.polylines.len(),
        "geometry extraction finished"
    );

    let resolved = registry.resolve(garment_id);
    if resolved.fallback {
        warnings.push(ConversionWarning::UnknownGarmentType {
            requested: garment_id.to_string(),
        });
    }

    let plan = plan(&extraction.polylines, resolved.profile)?;
    if plan.fallback_substituted {
        warn!("conversion proceeded with the default test square");
        warnings.push(ConversionWarning::EmptyGeometrySubstituted);
    }

    let dst = stitchkit_dst::encode(&plan.pattern, &options.design_name)?;

    Ok(Conversion {
        stitch_count: plan.pattern.stitch_count(),
        dst,
        profile: plan.profile,
        width_mm: plan.width_mm,
        height_mm: plan.height_mm,
        scale: plan.scale,
        warnings,
    })
}

/// The JSON document printed by the CLI after a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub success: bool,
    pub output_file: String,
    pub garment_type: String,
    pub profile: GarmentProfile,
    pub stitch_count: usize,
    pub width_mm: f64,
    pub height_mm: f64,
    pub scale: f64,
    pub file_size: usize,
    pub warnings: Vec<String>,
    pub generated_at: String,
}

impl ConversionReport {
    pub fn new(conversion: &Conversion, output_file: &str) -> Self {
        Self {
            success: true,
            output_file: output_file.to_string(),
            garment_type: conversion.profile.id.clone(),
            profile: conversion.profile.clone(),
            stitch_count: conversion.stitch_count,
            width_mm: conversion.width_mm,
            height_mm: conversion.height_mm,
            scale: conversion.scale,
            file_size: conversion.dst.len(),
            warnings: conversion.warnings.iter().map(|w| w.to_string()).collect(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchkit_core::ConvertError;

    #[test]
    fn test_convert_square_for_hat() {
        let svg = r#"<svg><rect x="0" y="0" width="100" height="100"/></svg>"#;
        let conversion =
            convert(svg, "hat", &ConversionOptions::default()).expect("conversion");
        assert!(conversion.warnings.is_empty());
        assert_eq!(conversion.profile.id, "hat");
        assert!((conversion.scale - 0.4445).abs() < 1e-12);
        assert!(!conversion.dst.is_empty());
    }

    #[test]
    fn test_unknown_garment_warns_and_uses_default() {
        let svg = r#"<svg><rect x="0" y="0" width="10" height="10"/></svg>"#;
        let conversion =
            convert(svg, "cape", &ConversionOptions::default()).expect("conversion");
        assert_eq!(conversion.profile.id, "hat");
        assert!(conversion
            .warnings
            .iter()
            .any(|w| matches!(w, ConversionWarning::UnknownGarmentType { requested } if requested == "cape")));
    }

    #[test]
    fn test_empty_svg_substitutes_square_with_warning() {
        let conversion =
            convert("<svg></svg>", "hat", &ConversionOptions::default()).expect("conversion");
        assert!(conversion
            .warnings
            .contains(&ConversionWarning::EmptyGeometrySubstituted));
        assert!(conversion.stitch_count > 0);
    }

    #[test]
    fn test_degenerate_geometry_aborts_without_output() {
        let svg = r#"<svg><path d="M 5 5 L 5 5 L 5 5"/></svg>"#;
        let err = convert(svg, "hat", &ConversionOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_report_serializes() {
        let conversion =
            convert("<svg></svg>", "hat", &ConversionOptions::default()).expect("conversion");
        let report = ConversionReport::new(&conversion, "out.dst");
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("default test square"));
    }
}
