//! Garment profile registry.
//!
//! A pure lookup table, fixed after construction. The built-in set
//! mirrors production embroidery presets; a custom set can be loaded
//! from JSON without code changes. Lookups are case-sensitive and fall
//! back to the designated default profile for unknown ids.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{ProfileError, ProfileResult};
use crate::model::GarmentProfile;

/// Profile id used when a requested garment type is not registered.
pub const DEFAULT_GARMENT_ID: &str = "hat";

/// The three built-in garment placements.
pub fn builtin_profiles() -> Vec<GarmentProfile> {
    vec![
        GarmentProfile {
            id: "hat".to_string(),
            description: "Structured cap front panel (1.75\" x 1.75\")".to_string(),
            max_width_mm: 44.45,
            max_height_mm: 44.45,
            density_lines_per_mm: 4.0,
            max_stitch_length_mm: 3.0,
            pull_compensation_mm: 0.2,
            underlay: true,
        },
        GarmentProfile {
            id: "shirt".to_string(),
            description: "Shirt left chest (2.5\" x 3.5\")".to_string(),
            max_width_mm: 63.5,
            max_height_mm: 88.9,
            density_lines_per_mm: 3.5,
            max_stitch_length_mm: 3.5,
            pull_compensation_mm: 0.15,
            underlay: true,
        },
        GarmentProfile {
            id: "jacket".to_string(),
            description: "Jacket back panel (5\" x 6\")".to_string(),
            max_width_mm: 127.0,
            max_height_mm: 152.4,
            density_lines_per_mm: 3.0,
            max_stitch_length_mm: 4.0,
            pull_compensation_mm: 0.1,
            underlay: false,
        },
    ]
}

/// Outcome of a registry lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub profile: &'a GarmentProfile,
    /// True when the requested id was unknown and the default profile
    /// was substituted.
    pub fallback: bool,
}

/// Immutable garment profile lookup table.
///
/// Safe for unsynchronized concurrent reads; there is no mutation API.
#[derive(Debug, Clone)]
pub struct GarmentRegistry {
    profiles: Vec<GarmentProfile>,
    default_index: usize,
}

impl GarmentRegistry {
    /// Registry holding the built-in hat/shirt/jacket presets, with
    /// `hat` as the fallback profile.
    pub fn builtin() -> Self {
        Self::with_profiles(builtin_profiles(), DEFAULT_GARMENT_ID)
            .expect("built-in profiles are valid")
    }

    /// Build a registry from an explicit profile set.
    ///
    /// Every profile is validated, ids must be unique, and `default_id`
    /// must name one of them.
    pub fn with_profiles(profiles: Vec<GarmentProfile>, default_id: &str) -> ProfileResult<Self> {
        if profiles.is_empty() {
            return Err(ProfileError::EmptyRegistry);
        }
        for profile in &profiles {
            profile.validate()?;
        }
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.id == profile.id) {
                return Err(ProfileError::DuplicateId(profile.id.clone()));
            }
        }
        let default_index = profiles
            .iter()
            .position(|p| p.id == default_id)
            .ok_or_else(|| ProfileError::MissingDefault(default_id.to_string()))?;
        Ok(Self {
            profiles,
            default_index,
        })
    }

    /// Load a replacement profile set from a JSON array.
    ///
    /// The default falls back to [`DEFAULT_GARMENT_ID`] when present,
    /// otherwise the first profile in the file.
    pub fn from_json(json: &str) -> ProfileResult<Self> {
        let profiles: Vec<GarmentProfile> = serde_json::from_str(json)?;
        let default_id = profiles
            .iter()
            .find(|p| p.id == DEFAULT_GARMENT_ID)
            .or_else(|| profiles.first())
            .map(|p| p.id.clone())
            .ok_or(ProfileError::EmptyRegistry)?;
        Self::with_profiles(profiles, &default_id)
    }

    /// Load a replacement profile set from a JSON file on disk.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ProfileResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, id: &str) -> Option<&GarmentProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Lookup with fallback: unknown ids resolve to the default profile
    /// with the `fallback` flag set.
    pub fn resolve(&self, id: &str) -> Resolved<'_> {
        match self.get(id) {
            Some(profile) => Resolved {
                profile,
                fallback: false,
            },
            None => {
                warn!(requested = id, "unknown garment type, using default profile");
                Resolved {
                    profile: self.default_profile(),
                    fallback: true,
                }
            }
        }
    }

    pub fn default_profile(&self) -> &GarmentProfile {
        &self.profiles[self.default_index]
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for GarmentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
