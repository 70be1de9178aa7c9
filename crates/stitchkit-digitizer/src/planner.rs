//! Stitch planning.
//!
//! Scales extracted geometry into the garment envelope and walks it
//! into an ordered stitch command sequence. Polylines are stitched
//! back-to-back with no thread trims between them (continuous-run
//! policy, preserved from the reference behavior).

use tracing::warn;

use stitchkit_core::error::{ConvertError, ConvertResult};
use stitchkit_core::geometry::{Bounds, Point, Polyline};
use stitchkit_core::pattern::{Pattern, StitchCommand};
use stitchkit_garments::GarmentProfile;

/// Hard cap on up-scaling, so tiny source art is not blown up to the
/// full envelope.
const MAX_UPSCALE: f64 = 2.0;

/// Coordinates closer than this are the same stitch point, millimeters.
const COINCIDENT_EPSILON_MM: f64 = 1e-5;

/// Longest per-axis span one emitted segment may cover, millimeters.
/// One unit under the 12.1 mm record limit, leaving headroom for
/// endpoint rounding in the encoder.
const MAX_SEGMENT_SPAN_MM: f64 = 12.0;

/// Planned stitch sequence plus the numbers that produced it. The
/// profile rides along as metadata for downstream reporting; density,
/// stitch length, and pull compensation are not enforced here.
#[derive(Debug, Clone)]
pub struct StitchPlan {
    pub pattern: Pattern,
    pub profile: GarmentProfile,
    /// Uniform scale factor from document units to millimeters.
    pub scale: f64,
    /// Design extents after scaling, millimeters.
    pub width_mm: f64,
    pub height_mm: f64,
    /// True when the default test square replaced empty input geometry.
    pub fallback_substituted: bool,
}

/// The square substituted when extraction yields no geometry.
pub fn fallback_square() -> Polyline {
    Polyline::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
        Point::new(0.0, 0.0),
    ])
}

/// Plan a stitch sequence for the given geometry and garment profile.
///
/// Empty input is substituted with [`fallback_square`] and flagged on
/// the returned plan rather than failing the conversion. Zero-area
/// geometry is a fatal [`ConvertError::DegenerateGeometry`].
pub fn plan(polylines: &[Polyline], profile: &GarmentProfile) -> ConvertResult<StitchPlan> {
    let substitute;
    let (lines, fallback_substituted): (&[Polyline], bool) = if polylines.is_empty() {
        warn!("no geometry extracted, substituting default test square");
        substitute = [fallback_square()];
        (&substitute, true)
    } else {
        (polylines, false)
    };

    let bounds = Bounds::from_polylines(lines).ok_or(ConvertError::DegenerateGeometry {
        width: 0.0,
        height: 0.0,
    })?;
    let width = bounds.width();
    let height = bounds.height();
    if width <= 0.0 || height <= 0.0 {
        return Err(ConvertError::DegenerateGeometry { width, height });
    }

    let scale = (profile.max_width_mm / width)
        .min(profile.max_height_mm / height)
        .min(MAX_UPSCALE);

    let to_output = |p: &Point| Point::new((p.x - bounds.min_x) * scale, (p.y - bounds.min_y) * scale);

    let mut pattern = Pattern::new();
    // The machine starts at the origin; long jumps to the first point
    // of a polyline are split just like long stitches.
    let mut current = Point::new(0.0, 0.0);

    for line in lines {
        if !line.is_stitchable() {
            continue;
        }
        let points: Vec<Point> = line.points().iter().map(to_output).collect();

        emit_segment(&mut pattern, current, points[0], true);
        current = points[0];

        for &target in &points[1..] {
            if coincident(current, target) {
                continue;
            }
            emit_segment(&mut pattern, current, target, false);
            current = target;
        }
    }

    pattern.push(StitchCommand::End);

    Ok(StitchPlan {
        pattern,
        profile: profile.clone(),
        scale,
        width_mm: width * scale,
        height_mm: height * scale,
        fallback_substituted,
    })
}

fn coincident(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < COINCIDENT_EPSILON_MM && (a.y - b.y).abs() < COINCIDENT_EPSILON_MM
}

/// Emit commands moving from `from` to `to`, splitting any segment
/// whose per-axis span exceeds what one DST record can carry. A jump
/// always emits at least one command, so every polyline opens with a
/// `Move` even when the needle is already in place.
fn emit_segment(pattern: &mut Pattern, from: Point, to: Point, jump: bool) {
    let span = (to.x - from.x).abs().max((to.y - from.y).abs());
    let steps = ((span / MAX_SEGMENT_SPAN_MM).ceil() as usize).max(1);
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        let x = from.x + (to.x - from.x) * t;
        let y = from.y + (to.y - from.y) * t;
        pattern.push(if jump {
            StitchCommand::Move { x, y }
        } else {
            StitchCommand::Stitch { x, y }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchkit_garments::GarmentRegistry;

    fn hat() -> GarmentProfile {
        GarmentRegistry::builtin().get("hat").expect("hat").clone()
    }

    fn jacket() -> GarmentProfile {
        GarmentRegistry::builtin()
            .get("jacket")
            .expect("jacket")
            .clone()
    }

    fn coords(pattern: &Pattern) -> Vec<(f64, f64)> {
        pattern.commands().iter().filter_map(|c| c.coords()).collect()
    }

    /// Maximum per-axis span between consecutive needle positions.
    fn max_span(pattern: &Pattern) -> f64 {
        let points = coords(pattern);
        points
            .windows(2)
            .map(|w| (w[1].0 - w[0].0).abs().max((w[1].1 - w[0].1).abs()))
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_empty_input_substitutes_square() {
        let plan = plan(&[], &hat()).expect("plan");
        assert!(plan.fallback_substituted);
        assert!(plan.pattern.is_well_formed());
        // 100x100 square scaled into the 44.45 mm hat envelope.
        assert!((plan.scale - 0.4445).abs() < 1e-12);
        assert!((plan.width_mm - 44.45).abs() < 1e-9);
        assert!((plan.height_mm - 44.45).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_geometry_fails() {
        let flat = vec![Polyline::from_points(vec![
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
        ])];
        let err = plan(&flat, &hat()).unwrap_err();
        assert!(matches!(err, ConvertError::DegenerateGeometry { .. }));

        let horizontal = vec![Polyline::from_points(vec![
            Point::new(0.0, 3.0),
            Point::new(10.0, 3.0),
        ])];
        assert!(matches!(
            plan(&horizontal, &hat()),
            Err(ConvertError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_upscale_is_capped_at_two() {
        // A 2x2 unit design in the jacket envelope would naively scale
        // by 63.5; the cap keeps it at 2.0.
        let small = vec![Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
        ])];
        let plan = plan(&small, &jacket()).expect("plan");
        assert_eq!(plan.scale, 2.0);
        assert!((plan.width_mm - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_extents_fit_envelope() {
        let lines = vec![Polyline::from_points(vec![
            Point::new(-50.0, 10.0),
            Point::new(250.0, 90.0),
        ])];
        let registry = GarmentRegistry::builtin();
        for id in ["hat", "shirt", "jacket"] {
            let profile = registry.get(id).expect("profile");
            let plan = plan(&lines, profile).expect("plan");
            assert!(plan.scale <= 2.0);
            assert!(plan.width_mm <= profile.max_width_mm + 1e-9);
            assert!(plan.height_mm <= profile.max_height_mm + 1e-9);
        }
    }

    #[test]
    fn test_hat_square_hits_exact_corners() {
        let square = vec![Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
            Point::new(0.0, 0.0),
        ])];
        let plan = plan(&square, &hat()).expect("plan");
        assert!((plan.scale - 0.4445).abs() < 1e-12);
        assert!(plan.pattern.is_well_formed());

        // The four corners appear in traversal order, with split
        // stitches in between but never past a corner.
        let expected = [
            (0.0, 0.0),
            (44.45, 0.0),
            (44.45, 44.45),
            (0.0, 44.45),
            (0.0, 0.0),
        ];
        let points = coords(&plan.pattern);
        let mut next_corner = 0;
        for (x, y) in &points {
            let (cx, cy) = expected[next_corner];
            if (x - cx).abs() < 1e-9 && (y - cy).abs() < 1e-9 {
                next_corner += 1;
                if next_corner == expected.len() {
                    break;
                }
            }
        }
        assert_eq!(next_corner, expected.len(), "all corners visited in order");
        assert!(max_span(&plan.pattern) <= MAX_SEGMENT_SPAN_MM + 1e-9);
    }

    #[test]
    fn test_circle_into_jacket_scale() {
        // 16-gon on a r=50 circle spans 100 units across.
        let circle: Polyline = (0..=16)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * (i % 16) as f64 / 16.0;
                Point::new(50.0 + 50.0 * angle.cos(), 50.0 + 50.0 * angle.sin())
            })
            .collect();
        let plan = plan(&[circle], &jacket()).expect("plan");
        assert!((plan.scale - 1.27).abs() < 1e-12);
        assert!((plan.width_mm - 127.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_consecutive_duplicate_stitches() {
        let lines = vec![Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 5.0),
        ])];
        let plan = plan(&lines, &hat()).expect("plan");
        let points = coords(&plan.pattern);
        for pair in points.windows(2) {
            let same = (pair[0].0 - pair[1].0).abs() < 1e-9 && (pair[0].1 - pair[1].1).abs() < 1e-9;
            assert!(!same, "consecutive duplicate at {pair:?}");
        }
    }

    #[test]
    fn test_polylines_run_continuously_without_trims() {
        let lines = vec![
            Polyline::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]),
            Polyline::from_points(vec![Point::new(0.0, 10.0), Point::new(10.0, 10.0)]),
        ];
        let plan = plan(&lines, &hat()).expect("plan");
        // One End, at the very end; the gap between polylines is a Move.
        let commands = plan.pattern.commands();
        assert!(matches!(commands.last(), Some(StitchCommand::End)));
        let end_count = commands
            .iter()
            .filter(|c| matches!(c, StitchCommand::End))
            .count();
        assert_eq!(end_count, 1);
        let move_count = commands
            .iter()
            .filter(|c| matches!(c, StitchCommand::Move { .. }))
            .count();
        assert!(move_count >= 2, "each polyline opens with a move");
    }

    #[test]
    fn test_long_segments_are_split_for_the_encoder() {
        let lines = vec![Polyline::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        ])];
        let plan = plan(&lines, &jacket()).expect("plan");
        assert!(max_span(&plan.pattern) <= MAX_SEGMENT_SPAN_MM + 1e-9);
        // End point still lands exactly on the far corner.
        let points = coords(&plan.pattern);
        let last = points.last().expect("points");
        assert!((last.0 - 127.0).abs() < 1e-9);
        assert!((last.1 - 127.0).abs() < 1e-9);
    }

    #[test]
    fn test_plan_carries_profile_metadata() {
        let plan = plan(&[], &jacket()).expect("plan");
        assert_eq!(plan.profile.id, "jacket");
        assert_eq!(plan.profile.max_stitch_length_mm, 4.0);
        assert_eq!(plan.profile.pull_compensation_mm, 0.1);
    }
}
