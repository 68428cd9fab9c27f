//! Profile Store: reading, writing and listing profile files.
//!
//! Two on-disk formats are understood. The structured format (a JSON object)
//! is always written; the legacy `key:type:value` line format, including its
//! UTF-16 variant, is still read. Content whose first non-whitespace byte is
//! `{` is tried as structured first; anything it rejects is re-read from the
//! unmodified bytes as legacy, so loading never fails on content.

mod enumerate;
pub mod fields;
mod legacy;
pub(crate) mod structured;

use std::fs;
use std::path::{Path, PathBuf};

pub use enumerate::{ProfileLocation, enumerate_profile_locations, enumerate_profiles};
pub use structured::ParseError;

use crate::error::FileError;
use crate::models::ConnectionProfile;
use crate::tracing::span_names;

/// Detected format of profile content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    /// JSON object
    Structured,
    /// `key:type:value` lines
    Legacy,
}

/// Loads a profile from `path`.
///
/// # Errors
///
/// Returns [`FileError`] if the file cannot be read. Malformed content is
/// never an error; see [`parse_profile`].
pub fn load(path: &Path) -> Result<ConnectionProfile, FileError> {
    let _span = tracing::debug_span!(span_names::PROFILE_LOAD, path = %path.display()).entered();
    let content = fs::read(path).map_err(FileError::at(path))?;
    Ok(parse_profile(&content))
}

/// Loads a profile, treating a missing file as an all-defaults profile.
///
/// # Errors
///
/// Returns [`FileError`] for I/O failures other than "not found".
pub fn load_or_default(path: &Path) -> Result<ConnectionProfile, FileError> {
    match load(path) {
        Err(err) if err.is_not_found() => Ok(ConnectionProfile::new()),
        other => other,
    }
}

/// Parses profile content of either format.
///
/// Worst case, unparseable content yields a default profile.
#[must_use]
pub fn parse_profile(content: &[u8]) -> ConnectionProfile {
    parse_profile_with_format(content).0
}

/// Parses profile content and reports which format was accepted
#[must_use]
pub fn parse_profile_with_format(content: &[u8]) -> (ConnectionProfile, ProfileFormat) {
    if looks_structured(content) {
        match structured::parse(&String::from_utf8_lossy(content)) {
            Ok(profile) => return (profile, ProfileFormat::Structured),
            Err(err) => tracing::debug!(error = %err, "Falling back to legacy profile format"),
        }
    }
    (legacy::parse(content), ProfileFormat::Legacy)
}

fn looks_structured(content: &[u8]) -> bool {
    content.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
}

/// Serializes a profile in the structured format
#[must_use]
pub fn to_structured_string(profile: &ConnectionProfile) -> String {
    structured::to_string(profile)
}

/// Saves a profile to `path` in the structured format.
///
/// The content goes to a sibling temporary file which then replaces `path`,
/// so readers see either the old or the new file. Missing parent directories
/// are created. On Unix the file is readable by the owner only, since it may
/// hold a password.
///
/// # Errors
///
/// Returns [`FileError`] if any write, permission change or rename fails.
pub fn save(profile: &ConnectionProfile, path: &Path) -> Result<(), FileError> {
    let _span = tracing::debug_span!(span_names::PROFILE_SAVE, path = %path.display()).entered();
    write_atomic(path, structured::to_string(profile).as_bytes())?;
    tracing::info!(path = %path.display(), "Profile saved");
    Ok(())
}

/// Writes `content` to a sibling temporary file, then renames it over `path`
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<(), FileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(FileError::at(parent))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_private(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(FileError::new(path, source));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map_or_else(|| "profile".into(), |n| n.to_string_lossy());
    path.with_file_name(format!(".{file_name}.tmp"))
}

#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content)
}
