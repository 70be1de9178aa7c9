//! # StitchKit DST
//!
//! Tajima DST binary format support: the fixed 512-byte ASCII header,
//! 3-byte delta-encoded stitch records, and the encoder/decoder pair
//! that maps between [`stitchkit_core::Pattern`] and machine-readable
//! bytes.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod record;

pub use decoder::{decode, DecodedDesign};
pub use encoder::encode;
pub use error::{DstError, DstResult};
pub use header::{DstHeader, HEADER_LEN, LABEL_LEN};
pub use record::{decode_record, encode_record, RecordKind, END_SENTINEL, RECORD_LEN};
