//! Connect command: save as last.tsc, run the client, record the server.

use std::path::Path;

use tsclient_core::config::TsClientHome;
use tsclient_core::launch::{self, LaunchCommandBuilder, SystemRunner};

use crate::error::CliError;
use crate::util::load_profile;

/// Connect command handler
pub fn cmd_connect(home: &TsClientHome, file: Option<&Path>, dry_run: bool) -> Result<(), CliError> {
    let loaded = load_profile(home, file)?;
    let profile = &loaded.profile;
    let builder = LaunchCommandBuilder::new();

    if dry_run {
        println!("{}", builder.build(profile)?.display_for_log());
        return Ok(());
    }

    println!(
        "Connecting to '{}' ({})...",
        profile.full_address, profile.protocol
    );
    launch::connect(home, profile, &SystemRunner::new(), &builder)?;
    Ok(())
}
