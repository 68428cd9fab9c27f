//! Most-recently-used server list.
//!
//! Stored as a JSON array of strings in `mru.tsc`. Older installations wrote
//! one server per line; those files are still read.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::FileError;
use crate::store::{self, structured};
use crate::tracing::span_names;

/// Maximum number of servers kept
pub const MRU_CAPACITY: usize = 10;

/// Ordered server list, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MruList {
    entries: Vec<String>,
}

impl MruList {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the list from `path`; a missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] for I/O failures other than "not found".
    pub fn load(path: &Path) -> Result<Self, FileError> {
        match fs::read(path) {
            Ok(content) => Ok(Self::parse(&String::from_utf8_lossy(&content))),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(source) => Err(FileError::new(path, source)),
        }
    }

    /// Parses either file format
    #[must_use]
    pub fn parse(content: &str) -> Self {
        if content.trim_start().starts_with('[') {
            if let Some(entries) = parse_array(content) {
                return Self::from_entries(entries);
            }
            tracing::debug!("MRU file is not a valid array, reading it line by line");
        }

        Self::from_entries(
            content
                .lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        )
    }

    fn from_entries(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: entries.into_iter().take(MRU_CAPACITY).collect(),
        }
    }

    /// Servers, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of servers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no server has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `server` to the front, dropping duplicates and the oldest
    /// entries beyond [`MRU_CAPACITY`]. Empty names are ignored.
    pub fn add(&mut self, server: &str) {
        if server.is_empty() {
            return;
        }
        self.entries.retain(|entry| entry != server);
        self.entries.insert(0, server.to_string());
        self.entries.truncate(MRU_CAPACITY);
    }

    /// Serializes the list as a JSON array, one entry per line
    #[must_use]
    pub fn to_file_string(&self) -> String {
        if self.entries.is_empty() {
            return "[]\n".to_string();
        }
        let body: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("  {}", Value::from(entry.as_str())))
            .collect();
        format!("[\n{}\n]\n", body.join(",\n"))
    }

    /// Writes the list to `path`
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        store::write_atomic(path, self.to_file_string().as_bytes())
    }
}

/// Records a successful connection to `server` in the list at `path`
///
/// # Errors
///
/// Returns [`FileError`] if the list cannot be read or written.
pub fn add_server(path: &Path, server: &str) -> Result<MruList, FileError> {
    let _span = tracing::debug_span!(span_names::MRU_UPDATE, server).entered();

    let mut list = MruList::load(path)?;
    if server.is_empty() {
        return Ok(list);
    }
    list.add(server);
    list.save(path)?;
    tracing::debug!(entries = list.len(), "MRU list updated");
    Ok(list)
}

fn parse_array(content: &str) -> Option<Vec<String>> {
    serde_json::from_str(content).ok().or_else(|| {
        structured::normalize_c_escapes(content)
            .and_then(|normalized| serde_json::from_str(&normalized).ok())
    })
}
