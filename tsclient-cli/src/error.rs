//! CLI error types and exit codes.

use tsclient_core::error::{FileError, LaunchError, TsClientError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, profile files, output
    pub const GENERAL_ERROR: i32 = 1;
    /// Launch failure - the client could not be found, started, or reported
    /// an error
    pub const LAUNCH_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile or MRU file error
    #[error(transparent)]
    File(#[from] FileError),

    /// Launch error
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Output formatting error
    #[error("Output error: {0}")]
    Output(String),
}

impl From<TsClientError> for CliError {
    fn from(err: TsClientError) -> Self {
        match err {
            TsClientError::File(e) => Self::File(e),
            TsClientError::Launch(e) => Self::Launch(e),
            TsClientError::HomeDirectory => Self::Config(err.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, files, output)
    /// - 2: Launch failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Launch(_) => exit_codes::LAUNCH_FAILURE,
            Self::Config(_) | Self::File(_) | Self::Output(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
