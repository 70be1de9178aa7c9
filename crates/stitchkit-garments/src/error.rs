//! Error types for garment profile management.

use std::io;
use thiserror::Error;

use stitchkit_core::ConvertError;

/// Errors related to garment profile validation and loading.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field holds a value outside its valid range.
    #[error("Invalid value for '{name}': {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Two profiles in one registry share an id.
    #[error("Duplicate profile id: {0}")]
    DuplicateId(String),

    /// The registry's designated default id is not among its profiles.
    #[error("No profile registered for default id '{0}'")]
    MissingDefault(String),

    /// The registry holds no profiles at all.
    #[error("Profile registry is empty")]
    EmptyRegistry,

    /// I/O error while loading a profile file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

impl From<ProfileError> for ConvertError {
    fn from(err: ProfileError) -> Self {
        ConvertError::Profile(err.to_string())
    }
}
