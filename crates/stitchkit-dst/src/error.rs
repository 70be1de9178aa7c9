//! Error types for DST encoding and decoding.

use thiserror::Error;

use stitchkit_core::ConvertError;

/// Errors that can occur while reading or writing DST bytes.
#[derive(Error, Debug)]
pub enum DstError {
    /// A single record would have to move further than the format's
    /// per-axis range of ±121 units.
    #[error("Stitch delta ({dx}, {dy}) exceeds +/-121 units per record")]
    DeltaRange { dx: i32, dy: i32 },

    /// The buffer is shorter than the fixed header.
    #[error("Truncated header: {0} bytes, expected at least 512")]
    TruncatedHeader(usize),

    /// A required header field is missing or unreadable.
    #[error("Header field '{0}' is missing or malformed")]
    MalformedHeader(&'static str),

    /// The stitch stream is not a whole number of 3-byte records.
    #[error("Stitch stream length {0} is not a multiple of 3")]
    TruncatedStream(usize),
}

/// Result type alias for DST operations.
pub type DstResult<T> = Result<T, DstError>;

impl From<DstError> for ConvertError {
    fn from(err: DstError) -> Self {
        match err {
            DstError::DeltaRange { dx, dy } => ConvertError::CoordinateRange { dx, dy },
            other => ConvertError::Encode(other.to_string()),
        }
    }
}
