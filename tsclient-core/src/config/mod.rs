//! Location of the per-user tsclient directory.
//!
//! Everything lives under `~/.tsclient/`: the default profile, the profile of
//! the last connection and the MRU list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FileError, TsClientError, TsClientResult};

/// Directory name under the home directory
pub const HOME_DIR_NAME: &str = ".tsclient";

/// Profile loaded at startup when present
pub const DEFAULT_PROFILE: &str = "default.tsc";

/// Profile written on every connect
pub const LAST_PROFILE: &str = "last.tsc";

/// Most-recently-used server list
pub const MRU_FILE: &str = "mru.tsc";

/// Root of the per-user tsclient files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsClientHome {
    root: PathBuf,
}

impl TsClientHome {
    /// Uses `root` as the tsclient directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `~/.tsclient`
    ///
    /// # Errors
    ///
    /// Returns [`TsClientError::HomeDirectory`] if the home directory is unknown.
    pub fn from_home_dir() -> TsClientResult<Self> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(HOME_DIR_NAME)))
            .ok_or(TsClientError::HomeDirectory)
    }

    /// The tsclient directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `default.tsc`
    #[must_use]
    pub fn default_profile(&self) -> PathBuf {
        self.root.join(DEFAULT_PROFILE)
    }

    /// Path of `last.tsc`
    #[must_use]
    pub fn last_profile(&self) -> PathBuf {
        self.root.join(LAST_PROFILE)
    }

    /// Path of `mru.tsc`
    #[must_use]
    pub fn mru_file(&self) -> PathBuf {
        self.root.join(MRU_FILE)
    }

    /// Creates the directory and an empty MRU file when missing
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] if the directory or file cannot be created.
    pub fn ensure(&self) -> Result<(), FileError> {
        create_private_dir(&self.root).map_err(FileError::at(&self.root))?;

        let mru = self.mru_file();
        if !mru.exists() {
            create_private_file(&mru).map_err(FileError::at(&mru))?;
            tracing::debug!(path = %mru.display(), "Created empty MRU file");
        }
        Ok(())
    }

    /// Profile to show at startup: `default.tsc`, else `last.tsc`
    #[must_use]
    pub fn startup_profile(&self) -> Option<PathBuf> {
        [self.default_profile(), self.last_profile()]
            .into_iter()
            .find(|path| path.is_file())
    }
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    if path.is_dir() {
        return Ok(());
    }
    fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn create_private_file(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map(drop)
}

#[cfg(not(unix))]
fn create_private_file(path: &Path) -> std::io::Result<()> {
    fs::File::create(path).map(drop)
}
