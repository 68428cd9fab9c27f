//! C-string escaping for values placed into client arguments.
//!
//! Backslash, double quote and control characters are escaped the way a C
//! string literal would spell them. This is not shell quoting: arguments are
//! handed to the client directly, and escaping does not make an arbitrary
//! value safe to paste into a shell.

/// Escapes `value` with C string literal rules.
///
/// `\b \f \n \r \t \v \\ \"` use their short forms, other control characters
/// and DEL become three-digit octal escapes. Non-ASCII characters are kept.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c < ' ' || c == '\u{7f}' => {
                out.push_str(&format!("\\{:03o}", u32::from(c)));
            }
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`].
///
/// Octal escapes are decoded as raw bytes, so sequences produced by writers
/// that escaped every non-ASCII byte decode back to UTF-8 text. Unknown
/// escapes yield the escaped character; a trailing lone backslash is dropped.
#[must_use]
pub fn unescape(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        let Some(&next) = bytes.get(i) else {
            break;
        };

        match next {
            b'0'..=b'7' => {
                let mut code: u32 = 0;
                let mut digits = 0;
                while digits < 3 && i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
                    code = code * 8 + u32::from(bytes[i] - b'0');
                    i += 1;
                    digits += 1;
                }
                out.push((code & 0xff) as u8);
                continue;
            }
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            other => out.push(other),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
