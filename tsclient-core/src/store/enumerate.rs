//! Recursive discovery of `.rdp` profile files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Suffix marking a profile file (case-sensitive)
pub const PROFILE_SUFFIX: &str = ".rdp";

/// Where a profile file was found relative to the search root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileLocation {
    /// Directly in the root directory
    Root,
    /// In a subdirectory, given relative to the root with `/` separators
    Subdir(String),
}

/// Lists profile files under `root` as `/`-separated relative paths.
///
/// Subdirectories are descended into as the directory iterator yields them,
/// so the order is filesystem-dependent. Unreadable directories are skipped,
/// and symbolic links to directories are not followed.
#[must_use]
pub fn enumerate_profiles(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    walk(root, "", &mut |dir: &str, name: &str| {
        found.push(if dir.is_empty() {
            name.to_string()
        } else {
            format!("{dir}/{name}")
        });
    });
    found
}

/// Maps each profile file name to the directory containing it.
///
/// When the same name occurs twice, the one visited last wins.
#[must_use]
pub fn enumerate_profile_locations(root: &Path) -> HashMap<String, ProfileLocation> {
    let mut found = HashMap::new();
    walk(root, "", &mut |dir: &str, name: &str| {
        let location = if dir.is_empty() {
            ProfileLocation::Root
        } else {
            ProfileLocation::Subdir(dir.to_string())
        };
        found.insert(name.to_string(), location);
    });
    found
}

fn walk(base: &Path, relative: &str, visit: &mut dyn FnMut(&str, &str)) {
    let dir = if relative.is_empty() {
        base.to_path_buf()
    } else {
        base.join(relative)
    };

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "Skipping unreadable directory");
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let child = if relative.is_empty() {
                name
            } else {
                format!("{relative}/{name}")
            };
            walk(base, &child, visit);
        } else if name.ends_with(PROFILE_SUFFIX) {
            visit(relative, &name);
        }
    }
}
