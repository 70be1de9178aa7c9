//! # StitchKit Garments
//!
//! Garment placement profiles: the physical stitch-area, density, and
//! stitch-length constraints applied when sizing a design for a hat,
//! shirt, or jacket. Profiles live in an immutable [`GarmentRegistry`]
//! built at startup and injected into the planner, never referenced as
//! ambient global state.

pub mod error;
pub mod model;
pub mod registry;

pub use error::{ProfileError, ProfileResult};
pub use model::GarmentProfile;
pub use registry::{builtin_profiles, GarmentRegistry, Resolved, DEFAULT_GARMENT_ID};
