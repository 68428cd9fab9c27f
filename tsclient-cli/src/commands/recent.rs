//! Recent servers command.

use tsclient_core::config::TsClientHome;
use tsclient_core::mru::MruList;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::to_json;

/// Recent servers command handler
pub fn cmd_recent(home: &TsClientHome, format: OutputFormat) -> Result<(), CliError> {
    let mru = MruList::load(&home.mru_file())?;

    match format {
        OutputFormat::Text => {
            for server in mru.entries() {
                println!("{server}");
            }
        }
        OutputFormat::Json => println!("{}", to_json(&serde_json::json!(mru.entries()))?),
    }
    Ok(())
}
