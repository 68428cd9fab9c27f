//! The "Connect" action: remember the profile, run the client, record the server.

use super::builder::LaunchCommandBuilder;
use super::detection::BinaryResolver;
use super::display::DisplayProbe;
use super::runner::{ProcessRunner, RunOutput};
use crate::config::TsClientHome;
use crate::error::TsClientResult;
use crate::models::ConnectionProfile;
use crate::{mru, store};

/// Connects with `profile` and waits for the client to exit.
///
/// The profile is saved as `last.tsc` before anything is launched. The
/// server is added to the MRU list only when the client did not fail.
///
/// # Errors
///
/// Returns an error if `last.tsc` cannot be written, the command cannot be
/// built or started, the client reports a failure on stderr, or the MRU list
/// cannot be updated.
pub fn connect<R: BinaryResolver, P: DisplayProbe>(
    home: &TsClientHome,
    profile: &ConnectionProfile,
    runner: &dyn ProcessRunner,
    builder: &LaunchCommandBuilder<R, P>,
) -> TsClientResult<RunOutput> {
    store::save(profile, &home.last_profile())?;

    let command = builder.build(profile)?;
    let output = runner.run_sync(&command)?.into_result()?;

    mru::add_server(&home.mru_file(), &profile.full_address)?;
    Ok(output)
}
