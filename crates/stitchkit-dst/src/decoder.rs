//! DST decoding.
//!
//! The inverse of [`crate::encoder`]: parses the header fields and
//! walks the stitch stream back into absolute-coordinate commands.
//! Used by round-trip verification and by anything that wants to
//! inspect machine files.

use tracing::warn;

use crate::error::{DstError, DstResult};
use crate::header::{DstHeader, HEADER_LEN};
use crate::record::{decode_record, RecordKind, RECORD_LEN};
use stitchkit_core::pattern::{Pattern, StitchCommand};
use stitchkit_core::units::units_to_mm;

/// A decoded design: header fields plus the reconstructed pattern in
/// absolute millimeters.
#[derive(Debug, Clone)]
pub struct DecodedDesign {
    pub header: DstHeader,
    pub pattern: Pattern,
}

/// Decode a complete DST buffer.
///
/// Color-change records are skipped with a warning; this crate models a
/// single continuous thread. Decoding stops at the first end sentinel.
pub fn decode(bytes: &[u8]) -> DstResult<DecodedDesign> {
    let header = DstHeader::parse(bytes)?;

    let stream = &bytes[HEADER_LEN..];
    if stream.len() % RECORD_LEN != 0 {
        return Err(DstError::TruncatedStream(stream.len()));
    }

    let mut pattern = Pattern::new();
    let mut x = 0i32;
    let mut y = 0i32;

    for chunk in stream.chunks_exact(RECORD_LEN) {
        let (dx, dy, kind) = decode_record([chunk[0], chunk[1], chunk[2]]);
        x += dx;
        y += dy;
        match kind {
            RecordKind::Jump => pattern.push(StitchCommand::Move {
                x: units_to_mm(x),
                y: units_to_mm(y),
            }),
            RecordKind::Stitch => pattern.push(StitchCommand::Stitch {
                x: units_to_mm(x),
                y: units_to_mm(y),
            }),
            RecordKind::ColorChange => {
                warn!("color change record in single-thread stream, skipping");
            }
            RecordKind::End => {
                pattern.push(StitchCommand::End);
                break;
            }
        }
    }

    Ok(DecodedDesign { header, pattern })
}
