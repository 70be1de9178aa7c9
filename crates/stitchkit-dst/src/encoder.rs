//! DST encoding.
//!
//! Serializes a [`Pattern`] into header + stitch stream + end sentinel.
//! Encoding is atomic: every record is built before a single output
//! byte is assembled, so a failed conversion never leaves a truncated
//! or malformed buffer behind.

use crate::error::DstResult;
use crate::header::DstHeader;
use crate::record::{encode_record, RecordKind, END_SENTINEL, RECORD_LEN};
use stitchkit_core::pattern::{Pattern, StitchCommand};
use stitchkit_core::units::mm_to_units;

/// Encode a pattern into a complete DST buffer.
///
/// Deltas are computed against the running integer needle position,
/// never against the nominal floating-point coordinates, so rounding
/// drift cannot accumulate past one unit per record. Commands after the
/// first `End` are ignored; a missing `End` is supplied.
pub fn encode(pattern: &Pattern, label: &str) -> DstResult<Vec<u8>> {
    let mut records: Vec<[u8; RECORD_LEN]> = Vec::with_capacity(pattern.len() + 1);

    let mut x = 0i32;
    let mut y = 0i32;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0i32, 0i32, 0i32, 0i32);
    let mut terminated = false;

    for command in pattern.commands() {
        let (kind, target) = match *command {
            StitchCommand::Move { x, y } => (RecordKind::Jump, (x, y)),
            StitchCommand::Stitch { x, y } => (RecordKind::Stitch, (x, y)),
            StitchCommand::End => {
                records.push(END_SENTINEL);
                terminated = true;
                break;
            }
        };

        let tx = mm_to_units(target.0);
        let ty = mm_to_units(target.1);
        records.push(encode_record(tx - x, ty - y, kind)?);
        x = tx;
        y = ty;
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if !terminated {
        records.push(END_SENTINEL);
    }

    let header = DstHeader {
        label: label.to_string(),
        stitch_count: records.len() - 1,
        color_changes: 0,
        plus_x: max_x,
        minus_x: -min_x,
        plus_y: max_y,
        minus_y: -min_y,
        end_x: x,
        end_y: y,
    };

    let mut bytes = header.to_bytes();
    bytes.reserve(records.len() * RECORD_LEN);
    for record in &records {
        bytes.extend_from_slice(record);
    }
    Ok(bytes)
}
