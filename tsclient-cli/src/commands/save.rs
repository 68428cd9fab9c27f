//! Save command: rewrite a profile in the structured format.

use std::path::Path;

use tsclient_core::config::TsClientHome;
use tsclient_core::store;

use crate::error::CliError;
use crate::util::load_profile;

/// Save command handler
pub fn cmd_save(home: &TsClientHome, file: Option<&Path>, target: &Path) -> Result<(), CliError> {
    let loaded = load_profile(home, file)?;
    store::save(&loaded.profile, target)?;
    println!("Saved profile to {}", target.display());
    Ok(())
}
