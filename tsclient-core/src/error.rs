//! Error types for the tsclient core library.
//!
//! Profile and MRU file access reports [`FileError`], launching reports
//! [`LaunchError`]. [`TsClientError`] aggregates both for callers that drive
//! a whole connect flow.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Protocol;

/// I/O failure while reading or writing a profile or MRU file
#[derive(Debug, Error)]
#[error("Failed to access {}: {source}", path.display())]
pub struct FileError {
    /// File that could not be accessed
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

impl FileError {
    /// Creates a new file error for `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// Returns a closure that wraps an `io::Error` for the given path.
    ///
    /// Intended for `map_err` chains.
    pub fn at(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::new(path, source)
    }

    /// Returns true when the file simply does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == std::io::ErrorKind::NotFound
    }
}

/// Errors produced while building or running a launch command
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The profile has no server address
    #[error("No computer name was given.\nPlease enter the address of the remote computer.")]
    MissingAddress,

    /// No installed client satisfies the selected protocol
    #[error("{}", .protocol.missing_client_message())]
    BinaryNotFound {
        /// Protocol whose client is missing
        protocol: Protocol,
    },

    /// Every candidate X display is in use
    #[error("Could not find a free X display.")]
    NoFreeDisplay,

    /// The operating system refused to start the client
    #[error("Failed to spawn {program}.\nPlease verify your installation.")]
    SpawnFailed {
        /// Program that could not be started
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The client exited unsuccessfully and wrote diagnostics to stderr
    #[error("{0}")]
    LaunchFailure(String),
}

/// Top-level error type for the tsclient core library
#[derive(Debug, Error)]
pub enum TsClientError {
    /// Profile or MRU file error
    #[error(transparent)]
    File(#[from] FileError),

    /// Launch error
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The user's home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeDirectory,
}

/// Result type alias for tsclient operations
pub type TsClientResult<T> = Result<T, TsClientError>;
