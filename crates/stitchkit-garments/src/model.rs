//! Garment profile model.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// Physical embroidery constraints for one garment placement.
///
/// Immutable once constructed; the planner reads the envelope and
/// carries the remaining fields through as metadata for downstream
/// digitizing and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarmentProfile {
    pub id: String,
    pub description: String,
    /// Widest allowed design, millimeters.
    pub max_width_mm: f64,
    /// Tallest allowed design, millimeters.
    pub max_height_mm: f64,
    /// Fill row density, lines per millimeter.
    pub density_lines_per_mm: f64,
    /// Longest recommended individual stitch, millimeters.
    pub max_stitch_length_mm: f64,
    /// Fabric-stretch offset carried as metadata, millimeters.
    pub pull_compensation_mm: f64,
    /// Whether an underlay pass is recommended for this placement.
    pub underlay: bool,
}

impl Default for GarmentProfile {
    fn default() -> Self {
        Self {
            id: "custom".to_string(),
            description: "Custom placement".to_string(),
            max_width_mm: 100.0,
            max_height_mm: 100.0,
            density_lines_per_mm: 4.0,
            max_stitch_length_mm: 3.0,
            pull_compensation_mm: 0.2,
            underlay: true,
        }
    }
}

impl GarmentProfile {
    /// Check the profile invariants: non-empty id, positive envelope
    /// and density, non-negative stitch length and pull compensation.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::MissingField("id"));
        }
        if !(self.max_width_mm > 0.0) {
            return Err(ProfileError::InvalidValue {
                name: "max_width_mm",
                value: self.max_width_mm,
                reason: "must be positive",
            });
        }
        if !(self.max_height_mm > 0.0) {
            return Err(ProfileError::InvalidValue {
                name: "max_height_mm",
                value: self.max_height_mm,
                reason: "must be positive",
            });
        }
        if !(self.density_lines_per_mm > 0.0) {
            return Err(ProfileError::InvalidValue {
                name: "density_lines_per_mm",
                value: self.density_lines_per_mm,
                reason: "must be positive",
            });
        }
        if self.max_stitch_length_mm < 0.0 {
            return Err(ProfileError::InvalidValue {
                name: "max_stitch_length_mm",
                value: self.max_stitch_length_mm,
                reason: "must not be negative",
            });
        }
        if self.pull_compensation_mm < 0.0 {
            return Err(ProfileError::InvalidValue {
                name: "pull_compensation_mm",
                value: self.pull_compensation_mm,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
