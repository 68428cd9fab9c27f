//! Structured (JSON object) profile format.

use serde_json::Value;
use thiserror::Error;

use super::fields::{self, FIELDS, FieldAccess};
use crate::escape;
use crate::models::ConnectionProfile;

/// Reasons a structured profile is rejected
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not a valid JSON document
    #[error("Invalid structured profile: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The top-level value is not an object
    #[error("Structured profile is not an object")]
    NotAnObject,

    /// A key does not name a profile field
    #[error("Unknown profile key '{0}'")]
    UnknownKey(String),

    /// A value has the wrong type for its field
    #[error("Profile key '{0}' has a value of the wrong type")]
    TypeMismatch(String),
}

/// Parses a structured profile into a fresh [`ConnectionProfile`].
///
/// Text that is not valid JSON is retried once with C-style string escapes
/// rewritten as JSON escapes, since older writers produced those.
///
/// # Errors
///
/// Returns an error on invalid syntax, a non-object document, an unknown key
/// or a value whose type does not match its field.
pub fn parse(text: &str) -> Result<ConnectionProfile, ParseError> {
    let document = match serde_json::from_str::<Value>(text) {
        Ok(document) => document,
        Err(err) => match normalize_c_escapes(text) {
            Some(rewritten) => serde_json::from_str(&rewritten)?,
            None => return Err(err.into()),
        },
    };

    let Value::Object(map) = document else {
        return Err(ParseError::NotAnObject);
    };

    let mut profile = ConnectionProfile::new();
    for (key, value) in map {
        let field = fields::by_name(&key).ok_or_else(|| ParseError::UnknownKey(key.clone()))?;
        match (field.access, value) {
            (FieldAccess::Text { set, .. }, Value::String(s)) => set(&mut profile, s),
            (FieldAccess::Int { set, .. }, Value::Number(n)) => {
                let v = n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| ParseError::TypeMismatch(key.clone()))?;
                set(&mut profile, v);
            }
            _ => return Err(ParseError::TypeMismatch(key)),
        }
    }

    Ok(profile)
}

/// Serializes a profile: one key per line, fixed order, trailing newline.
#[must_use]
pub fn to_string(profile: &ConnectionProfile) -> String {
    let body: Vec<String> = FIELDS
        .iter()
        .filter(|f| f.saved)
        .map(|f| {
            let value = match f.access {
                FieldAccess::Text { get, .. } => Value::from(get(profile)).to_string(),
                FieldAccess::Int { get, .. } => get(profile).to_string(),
            };
            format!("  \"{}\": {value}", f.name)
        })
        .collect();

    format!("{{\n{}\n}}\n", body.join(",\n"))
}

/// Rewrites string literals that use escapes JSON does not know.
///
/// Returns `None` when nothing needed rewriting or a literal is unterminated.
pub(crate) fn normalize_c_escapes(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut chars = text.char_indices();

    while let Some((start, c)) = chars.next() {
        if c != '"' {
            out.push(c);
            continue;
        }

        let mut end = None;
        let mut needs_rewrite = false;
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    end = Some(i);
                    break;
                }
                '\\' => {
                    let (_, escaped) = chars.next()?;
                    if !matches!(escaped, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u') {
                        needs_rewrite = true;
                    }
                }
                _ => {}
            }
        }

        let end = end?;
        let raw = &text[start + 1..end];
        if needs_rewrite {
            out.push_str(&Value::from(escape::unescape(raw)).to_string());
            changed = true;
        } else {
            out.push('"');
            out.push_str(raw);
            out.push('"');
        }
    }

    changed.then_some(out)
}
