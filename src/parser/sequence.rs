//! Sequence Classification
//!
//! Decides what a finished `ESC ... m` sequence means. Only two forms are
//! recognized:
//!
//! - `ESC [ 38 ; 2 ; <r> ; <g> ; <b> m` (24-bit foreground color)
//! - `ESC [ m` (plain reset)
//!
//! A color sequence matches as soon as three integers have been read after
//! `ESC[38;2;`; whatever follows the blue component is ignored, so
//! `ESC[38;2;1;2;3;1m` is still a color. Each integer may be preceded by
//! whitespace and carries an optional sign. No range check is applied, except
//! that a negative component makes the sequence unrecognized.

use super::actions::Sequence;
use crate::core::Color;

/// Prefix of a 24-bit foreground color sequence
pub const RGB_PREFIX: &[u8] = b"\x1b[38;2;";

/// The plain reset sequence
pub const RESET: &[u8] = b"\x1b[m";

/// Classify a complete sequence, including its leading ESC and final `m`
pub fn classify(raw: &[u8]) -> Sequence {
    if let Some(color) = parse_rgb(raw) {
        if color.is_valid() {
            return Sequence::Color(color);
        }
    } else if raw == RESET {
        return Sequence::Reset;
    }
    Sequence::Unrecognized(raw.to_vec())
}

/// Read `ESC[38;2;<r>;<g>;<b>` from the start of a sequence
fn parse_rgb(raw: &[u8]) -> Option<Color> {
    let mut rest = raw.strip_prefix(RGB_PREFIX)?;

    let r = scan_int(&mut rest)?;
    rest = rest.strip_prefix(b";")?;
    let g = scan_int(&mut rest)?;
    rest = rest.strip_prefix(b";")?;
    let b = scan_int(&mut rest)?;

    Some(Color::new(r, g, b))
}

/// Read a signed decimal integer, skipping leading whitespace, and advance
/// `input` past it. Values that do not fit an `i32` are rejected.
fn scan_int(input: &mut &[u8]) -> Option<i32> {
    let bytes: &[u8] = *input;
    let start = bytes
        .iter()
        .position(|&b| !is_space(b))
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let sign_len = usize::from(matches!(rest.first(), Some(&(b'+' | b'-'))));
    let digit_len = rest[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digit_len == 0 {
        return None;
    }

    let end = sign_len + digit_len;
    let value = std::str::from_utf8(&rest[..end]).ok()?.parse().ok()?;
    *input = &rest[end..];
    Some(value)
}

/// ASCII whitespace, vertical tab included
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
