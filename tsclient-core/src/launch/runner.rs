//! Running client programs.

use std::process::{Command, Stdio};

use super::command::LaunchCommand;
use crate::error::LaunchError;
use crate::trace_operation;
use crate::tracing::span_names;

/// Captured result of a synchronous run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub status: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl RunOutput {
    /// Returns true when the client exited with a non-zero status and
    /// wrote something to stderr.
    ///
    /// Clients that exit non-zero silently are treated as a normal
    /// disconnect.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status != Some(0) && !self.stderr.is_empty()
    }

    /// Converts a failed run into [`LaunchError::LaunchFailure`] carrying stderr
    ///
    /// # Errors
    ///
    /// Returns the client's stderr output when [`Self::is_failure`] holds.
    pub fn into_result(self) -> Result<Self, LaunchError> {
        if self.is_failure() {
            Err(LaunchError::LaunchFailure(self.stderr))
        } else {
            Ok(self)
        }
    }
}

/// Executes launch commands
pub trait ProcessRunner {
    /// Runs the command and waits for it to exit
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::SpawnFailed`] if the process cannot be started.
    fn run_sync(&self, command: &LaunchCommand) -> Result<RunOutput, LaunchError>;

    /// Starts the command without waiting and returns its PID
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::SpawnFailed`] if the process cannot be started.
    fn spawn_detached(&self, command: &LaunchCommand) -> Result<u32, LaunchError>;
}

/// Runner backed by [`std::process::Command`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn command(command: &LaunchCommand) -> Command {
        let mut cmd = Command::new(&command.executable);
        cmd.args(&command.args).stdin(Stdio::null());
        cmd
    }
}

impl ProcessRunner for SystemRunner {
    fn run_sync(&self, command: &LaunchCommand) -> Result<RunOutput, LaunchError> {
        let _span = trace_operation!(span_names::LAUNCH_RUN, program = %command.program).entered();
        tracing::info!(command = %command.display_for_log(), "Running client");

        let output = Self::command(command)
            .output()
            .map_err(|source| LaunchError::SpawnFailed {
                program: command.program.clone(),
                source,
            })?;

        let result = RunOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if result.is_failure() {
            tracing::warn!(status = ?result.status, stderr = %result.stderr.trim_end(), "Client failed");
        } else {
            tracing::debug!(status = ?result.status, "Client exited");
        }
        Ok(result)
    }

    fn spawn_detached(&self, command: &LaunchCommand) -> Result<u32, LaunchError> {
        let _span = trace_operation!(span_names::LAUNCH_RUN, program = %command.program).entered();

        let child = Self::command(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::SpawnFailed {
                program: command.program.clone(),
                source,
            })?;

        let pid = child.id();
        tracing::info!(pid, command = %command.display_for_log(), "Client started");
        Ok(pid)
    }
}
