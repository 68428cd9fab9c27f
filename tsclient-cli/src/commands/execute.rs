//! Execute command: launch a profile file directly.

use std::path::Path;

use tsclient_core::launch::{LaunchCommandBuilder, ProcessRunner, SystemRunner};
use tsclient_core::store;

use crate::error::CliError;

/// Execute command handler.
///
/// Waits for the client and reports its stderr when it fails. With `detach`
/// the client is left running and only spawn errors are reported.
pub fn cmd_execute(path: &Path, detach: bool, dry_run: bool) -> Result<(), CliError> {
    let profile = store::load(path)?;
    let command = LaunchCommandBuilder::new().build(&profile)?;

    if dry_run {
        println!("{}", command.display_for_log());
        return Ok(());
    }

    let runner = SystemRunner::new();
    if detach {
        let pid = runner.spawn_detached(&command)?;
        println!("Started {} (pid {pid})", command.program);
    } else {
        runner.run_sync(&command)?.into_result()?;
    }
    Ok(())
}
