//! Tajima DST header.
//!
//! The header is a fixed 512-byte ASCII block of `XX:value\r` fields:
//! design label (`LA:`), stitch count (`ST:`), color-change count
//! (`CO:`), design extents in 0.1 mm units (`+X:`/`-X:`/`+Y:`/`-Y:`),
//! end-point offset (`AX:`/`AY:`), multi-volume offsets (`MX:`/`MY:`,
//! always zero here), and a `PD:` placeholder, followed by an 0x1A
//! end-of-text marker and space padding up to 512 bytes.

use crate::error::{DstError, DstResult};

/// Total header size in bytes.
pub const HEADER_LEN: usize = 512;

/// Width of the design label field.
pub const LABEL_LEN: usize = 16;

/// Parsed or to-be-written header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstHeader {
    /// Design label, at most [`LABEL_LEN`] ASCII characters.
    pub label: String,
    /// Number of movement records (jumps and stitches, end excluded).
    pub stitch_count: usize,
    /// Number of color changes. Always zero for a single-thread run.
    pub color_changes: usize,
    /// Extents relative to the start point, units of 0.1 mm.
    pub plus_x: i32,
    pub minus_x: i32,
    pub plus_y: i32,
    pub minus_y: i32,
    /// Offset from the first to the last needle position, units.
    pub end_x: i32,
    pub end_y: i32,
}

impl DstHeader {
    /// Render the fixed 512-byte header block.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = String::with_capacity(HEADER_LEN);
        text.push_str(&format!("LA:{:<16}\r", sanitize_label(&self.label)));
        text.push_str(&format!("ST:{:>7}\r", self.stitch_count));
        text.push_str(&format!("CO:{:>3}\r", self.color_changes));
        text.push_str(&format!("+X:{:>5}\r", self.plus_x));
        text.push_str(&format!("-X:{:>5}\r", self.minus_x));
        text.push_str(&format!("+Y:{:>5}\r", self.plus_y));
        text.push_str(&format!("-Y:{:>5}\r", self.minus_y));
        text.push_str(&format!("AX:{}{:>5}\r", sign(self.end_x), self.end_x.abs()));
        text.push_str(&format!("AY:{}{:>5}\r", sign(self.end_y), self.end_y.abs()));
        text.push_str(&format!("MX:+{:>5}\r", 0));
        text.push_str(&format!("MY:+{:>5}\r", 0));
        text.push_str("PD:******\r");

        let mut bytes = text.into_bytes();
        bytes.push(0x1A);
        bytes.resize(HEADER_LEN, b' ');
        bytes
    }

    /// Parse the fields back out of a header block.
    pub fn parse(bytes: &[u8]) -> DstResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(DstError::TruncatedHeader(bytes.len()));
        }
        let text = String::from_utf8_lossy(&bytes[..HEADER_LEN]);

        Ok(Self {
            label: field(&text, "LA:")
                .ok_or(DstError::MalformedHeader("LA"))?
                .trim_end()
                .to_string(),
            stitch_count: parse_field(&text, "ST:", "ST")?,
            color_changes: parse_field(&text, "CO:", "CO")?,
            plus_x: parse_field(&text, "+X:", "+X")?,
            minus_x: parse_field(&text, "-X:", "-X")?,
            plus_y: parse_field(&text, "+Y:", "+Y")?,
            minus_y: parse_field(&text, "-Y:", "-Y")?,
            end_x: parse_field(&text, "AX:", "AX")?,
            end_y: parse_field(&text, "AY:", "AY")?,
        })
    }
}

/// Replace non-printable-ASCII label characters and clamp to the field
/// width. Machines display this text verbatim.
fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.chars().take(LABEL_LEN).collect()
}

fn sign(value: i32) -> char {
    if value < 0 {
        '-'
    } else {
        '+'
    }
}

/// Raw text of the field following `tag`, up to the `\r` terminator.
fn field<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let start = text.find(tag)? + tag.len();
    let rest = &text[start..];
    let end = rest.find('\r')?;
    Some(&rest[..end])
}

fn parse_field<T: std::str::FromStr>(
    text: &str,
    tag: &str,
    name: &'static str,
) -> DstResult<T> {
    // Numeric fields are right-justified and the sign may be separated
    // from the digits, e.g. "AX:-   12".
    field(text, tag)
        .map(|raw| raw.replace(' ', ""))
        .and_then(|raw| raw.trim_start_matches('+').parse().ok())
        .ok_or(DstError::MalformedHeader(name))
}
