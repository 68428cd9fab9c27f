//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};

use tsclient_core::config::TsClientHome;
use tsclient_core::models::ConnectionProfile;
use tsclient_core::store;

use crate::error::CliError;

/// Resolves the tsclient directory from `--home`, `TSCLIENT_HOME` or `~/.tsclient`
pub fn resolve_home(home: Option<&Path>) -> Result<TsClientHome, CliError> {
    match home {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(TsClientHome::new(dir)),
        _ => Ok(TsClientHome::from_home_dir()?),
    }
}

/// A profile together with the file it came from
#[derive(Debug)]
pub struct LoadedProfile {
    /// Source file, `None` for built-in defaults
    pub path: Option<PathBuf>,
    /// The profile
    pub profile: ConnectionProfile,
}

/// Loads the profile named on the command line if it exists, otherwise the
/// startup profile, otherwise the defaults
pub fn load_profile(home: &TsClientHome, file: Option<&Path>) -> Result<LoadedProfile, CliError> {
    let path = match file {
        Some(file) if file.exists() => Some(file.to_path_buf()),
        Some(file) => {
            tracing::warn!(path = %file.display(), "Profile not found, using startup profile");
            home.startup_profile()
        }
        None => home.startup_profile(),
    };

    let profile = match &path {
        Some(path) => store::load(path)?,
        None => ConnectionProfile::new(),
    };
    Ok(LoadedProfile { path, profile })
}

/// Serializes `value` as pretty JSON
pub fn to_json(value: &serde_json::Value) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}
