//! Tajima 3-byte stitch record packing.
//!
//! Each record moves the needle by a per-axis delta in the range
//! ±121 units (0.1 mm), decomposed onto ternary step weights
//! 1/3/9/27/81 with one set/clear bit pair per weight:
//!
//! ```text
//! byte 0: y+1  y-1  y+9  y-9  x-9  x+9  x-1  x+1
//! byte 1: y+3  y-3  y+27 y-27 x-27 x+27 x-3  x+3
//! byte 2: jump c.ch y+81 y-81 x-81 x+81  1    1
//! ```
//!
//! (bit 7 on the left). The low two bits of byte 2 are always set. The
//! end-of-pattern sentinel is `00 00 F3`, written exactly once.
//!
//! The machine Y axis points up while document Y points down, so dy is
//! negated on write and un-negated on read.

use crate::error::{DstError, DstResult};
use stitchkit_core::units::MAX_RECORD_DELTA;

/// Size of one stitch record in bytes.
pub const RECORD_LEN: usize = 3;

/// End-of-pattern sentinel record.
pub const END_SENTINEL: [u8; RECORD_LEN] = [0x00, 0x00, 0xF3];

/// The record flavors found in a DST stitch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A normal stitch.
    Stitch,
    /// A jump (reposition without stitching).
    Jump,
    /// A thread color change. Never produced by the encoder, which
    /// assumes a single continuous thread, but decoded for
    /// completeness.
    ColorChange,
    /// End of pattern.
    End,
}

/// Decompose one axis delta onto the ternary step weights, setting
/// `plus`/`minus` bit pairs from the largest weight down.
///
/// Weight thresholds: after taking ±81 the remainder is within ±40,
/// which the smaller weights cover exactly; likewise ±13, ±4, and ±1.
fn pack_axis(value: i32, bytes: &mut [u8; RECORD_LEN], bits: &AxisBits) {
    let mut v = value;
    if v > 40 {
        bytes[2] |= bits.plus_81;
        v -= 81;
    } else if v < -40 {
        bytes[2] |= bits.minus_81;
        v += 81;
    }
    if v > 13 {
        bytes[1] |= bits.plus_27;
        v -= 27;
    } else if v < -13 {
        bytes[1] |= bits.minus_27;
        v += 27;
    }
    if v > 4 {
        bytes[0] |= bits.plus_9;
        v -= 9;
    } else if v < -4 {
        bytes[0] |= bits.minus_9;
        v += 9;
    }
    if v > 1 {
        bytes[1] |= bits.plus_3;
        v -= 3;
    } else if v < -1 {
        bytes[1] |= bits.minus_3;
        v += 3;
    }
    if v > 0 {
        bytes[0] |= bits.plus_1;
        v -= 1;
    } else if v < 0 {
        bytes[0] |= bits.minus_1;
        v += 1;
    }
    debug_assert_eq!(v, 0, "delta not fully decomposed");
}

struct AxisBits {
    plus_1: u8,
    minus_1: u8,
    plus_9: u8,
    minus_9: u8,
    plus_3: u8,
    minus_3: u8,
    plus_27: u8,
    minus_27: u8,
    plus_81: u8,
    minus_81: u8,
}

const X_BITS: AxisBits = AxisBits {
    plus_1: 0b0000_0001,
    minus_1: 0b0000_0010,
    plus_9: 0b0000_0100,
    minus_9: 0b0000_1000,
    plus_3: 0b0000_0001,
    minus_3: 0b0000_0010,
    plus_27: 0b0000_0100,
    minus_27: 0b0000_1000,
    plus_81: 0b0000_0100,
    minus_81: 0b0000_1000,
};

const Y_BITS: AxisBits = AxisBits {
    plus_1: 0b1000_0000,
    minus_1: 0b0100_0000,
    plus_9: 0b0010_0000,
    minus_9: 0b0001_0000,
    plus_3: 0b1000_0000,
    minus_3: 0b0100_0000,
    plus_27: 0b0010_0000,
    minus_27: 0b0001_0000,
    plus_81: 0b0010_0000,
    minus_81: 0b0001_0000,
};

/// Pack one movement into a record. `dx`/`dy` are in document
/// orientation (y down); the y flip to machine orientation happens
/// here.
pub fn encode_record(dx: i32, dy: i32, kind: RecordKind) -> DstResult<[u8; RECORD_LEN]> {
    if kind == RecordKind::End {
        return Ok(END_SENTINEL);
    }
    if dx.abs() > MAX_RECORD_DELTA || dy.abs() > MAX_RECORD_DELTA {
        return Err(DstError::DeltaRange { dx, dy });
    }

    let mut bytes = [0u8, 0u8, 0b0000_0011];
    match kind {
        RecordKind::Jump => bytes[2] |= 0b1000_0000,
        RecordKind::ColorChange => bytes[2] |= 0b1100_0000,
        RecordKind::Stitch | RecordKind::End => {}
    }

    pack_axis(dx, &mut bytes, &X_BITS);
    pack_axis(-dy, &mut bytes, &Y_BITS);
    Ok(bytes)
}

/// Unpack one record into `(dx, dy, kind)`, dy back in document
/// orientation.
pub fn decode_record(bytes: [u8; RECORD_LEN]) -> (i32, i32, RecordKind) {
    if bytes == END_SENTINEL {
        return (0, 0, RecordKind::End);
    }
    let [b0, b1, b2] = bytes;

    let mut x = 0i32;
    if b0 & 0b0000_0001 != 0 {
        x += 1;
    }
    if b0 & 0b0000_0010 != 0 {
        x -= 1;
    }
    if b0 & 0b0000_0100 != 0 {
        x += 9;
    }
    if b0 & 0b0000_1000 != 0 {
        x -= 9;
    }
    if b1 & 0b0000_0001 != 0 {
        x += 3;
    }
    if b1 & 0b0000_0010 != 0 {
        x -= 3;
    }
    if b1 & 0b0000_0100 != 0 {
        x += 27;
    }
    if b1 & 0b0000_1000 != 0 {
        x -= 27;
    }
    if b2 & 0b0000_0100 != 0 {
        x += 81;
    }
    if b2 & 0b0000_1000 != 0 {
        x -= 81;
    }

    let mut y = 0i32;
    if b0 & 0b1000_0000 != 0 {
        y += 1;
    }
    if b0 & 0b0100_0000 != 0 {
        y -= 1;
    }
    if b0 & 0b0010_0000 != 0 {
        y += 9;
    }
    if b0 & 0b0001_0000 != 0 {
        y -= 9;
    }
    if b1 & 0b1000_0000 != 0 {
        y += 3;
    }
    if b1 & 0b0100_0000 != 0 {
        y -= 3;
    }
    if b1 & 0b0010_0000 != 0 {
        y += 27;
    }
    if b1 & 0b0001_0000 != 0 {
        y -= 27;
    }
    if b2 & 0b0010_0000 != 0 {
        y += 81;
    }
    if b2 & 0b0001_0000 != 0 {
        y -= 81;
    }

    let kind = if b2 & 0b1100_0000 == 0b1100_0000 {
        RecordKind::ColorChange
    } else if b2 & 0b1000_0000 != 0 {
        RecordKind::Jump
    } else {
        RecordKind::Stitch
    };

    (x, -y, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delta_stitch() {
        let bytes = encode_record(0, 0, RecordKind::Stitch).expect("encode");
        assert_eq!(bytes, [0x00, 0x00, 0x03]);
        assert_eq!(decode_record(bytes), (0, 0, RecordKind::Stitch));
    }

    #[test]
    fn test_unit_steps() {
        let bytes = encode_record(1, 0, RecordKind::Stitch).expect("encode");
        assert_eq!(bytes, [0b0000_0001, 0x00, 0x03]);

        // +1 in document y is -1 on the machine axis.
        let bytes = encode_record(0, 1, RecordKind::Stitch).expect("encode");
        assert_eq!(bytes, [0b0100_0000, 0x00, 0x03]);

        let bytes = encode_record(-1, -1, RecordKind::Stitch).expect("encode");
        assert_eq!(bytes, [0b1000_0010, 0x00, 0x03]);
    }

    #[test]
    fn test_jump_flag() {
        let bytes = encode_record(5, 0, RecordKind::Jump).expect("encode");
        assert_ne!(bytes[2] & 0b1000_0000, 0);
        assert_eq!(decode_record(bytes), (5, 0, RecordKind::Jump));
    }

    #[test]
    fn test_end_sentinel() {
        let bytes = encode_record(0, 0, RecordKind::End).expect("encode");
        assert_eq!(bytes, [0x00, 0x00, 0xF3]);
        assert_eq!(decode_record(bytes), (0, 0, RecordKind::End));
    }

    #[test]
    fn test_low_bits_always_set() {
        for dx in [-121, -40, 0, 40, 121] {
            let bytes = encode_record(dx, 7, RecordKind::Stitch).expect("encode");
            assert_eq!(bytes[2] & 0b0000_0011, 0b0000_0011);
        }
    }

    #[test]
    fn test_every_delta_round_trips() {
        for dx in -121..=121 {
            for dy in [-121, -80, -13, -1, 0, 1, 13, 80, 121] {
                let bytes = encode_record(dx, dy, RecordKind::Stitch).expect("encode");
                assert_eq!(
                    decode_record(bytes),
                    (dx, dy, RecordKind::Stitch),
                    "delta ({dx}, {dy})"
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            encode_record(122, 0, RecordKind::Stitch),
            Err(DstError::DeltaRange { dx: 122, dy: 0 })
        ));
        assert!(matches!(
            encode_record(0, -122, RecordKind::Jump),
            Err(DstError::DeltaRange { .. })
        ));
    }

    #[test]
    fn test_color_change_decodes() {
        let bytes = encode_record(0, 0, RecordKind::ColorChange).expect("encode");
        assert_eq!(decode_record(bytes), (0, 0, RecordKind::ColorChange));
    }
}
