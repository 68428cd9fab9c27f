//! Legacy `key:type:value` profile format (read-only).
//!
//! Files saved by the Windows client may be UTF-16LE with a byte order mark.
//! Those are detected from the first line and decoded byte by byte: NUL and
//! BOM bytes are dropped, CR ends a line and LF is ignored.

use super::fields::{self, FieldAccess};
use crate::models::ConnectionProfile;

const BOM_FIRST: u8 = 0xFF;
const BOM_SECOND: u8 = 0xFE;

/// Upper bound on bytes scanned in a UTF-16 file
const UTF16_SCAN_LIMIT: usize = 1_000_000;

/// Parses legacy profile content. Never fails; unknown lines are ignored.
#[must_use]
pub fn parse(content: &[u8]) -> ConnectionProfile {
    let mut profile = ConnectionProfile::new();

    if is_utf16(content) {
        for line in utf16_lines(content) {
            apply_line(&mut profile, &line);
        }
    } else {
        for line in content.split_inclusive(|b| *b == b'\n') {
            apply_line(&mut profile, &String::from_utf8_lossy(line));
        }
    }

    profile
}

/// The first line of a UTF-16 file reads as a two or three byte C string
/// starting with the byte order mark.
fn is_utf16(content: &[u8]) -> bool {
    let first_line = content
        .iter()
        .position(|b| *b == b'\n')
        .map_or(content, |i| &content[..=i]);
    let c_len = first_line
        .iter()
        .position(|b| *b == 0)
        .unwrap_or(first_line.len());

    (c_len == 2 || c_len == 3) && first_line.starts_with(&[BOM_FIRST, BOM_SECOND])
}

fn utf16_lines(content: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for &byte in content.iter().take(UTF16_SCAN_LIMIT) {
        match byte {
            0 | BOM_FIRST | BOM_SECOND | b'\n' => {}
            b'\r' => lines.push(std::mem::take(&mut current)),
            other => current.push(char::from(other)),
        }
    }

    lines
}

/// Applies one `key:type:value` line.
///
/// Empty fields between colons collapse. The value runs to the end of the
/// line and may itself contain colons; one trailing CR is removed.
fn apply_line(profile: &mut ConnectionProfile, line: &str) {
    let Some((key, value)) = split_line(line) else {
        return;
    };
    let Some(field) = fields::by_legacy_key(key) else {
        return;
    };

    match field.access {
        FieldAccess::Text { set, .. } => set(profile, value.to_string()),
        FieldAccess::Int { set, .. } => set(profile, atoi(value)),
    }
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start_matches(':');
    if rest.is_empty() {
        return None;
    }

    let (key, rest) = rest.split_once(':').unwrap_or((rest, ""));

    // The type token is discarded.
    let rest = rest.trim_start_matches(':');
    let value = match rest.split_once(':') {
        Some((_, after_type)) => {
            let after_type = after_type.trim_start_matches('\n');
            let value = after_type.split('\n').next().unwrap_or("");
            value.strip_suffix('\r').unwrap_or(value)
        }
        None => "",
    };

    Some((key, value))
}

/// C `atoi`: leading whitespace, optional sign, then digits; anything else is 0.
fn atoi(value: &str) -> i32 {
    let trimmed = value.trim_start_matches([' ', '\t', '\n', '\u{0b}', '\u{0c}', '\r']);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        result = (result * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        result = -result;
    }

    result.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
