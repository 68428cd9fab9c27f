//! Command handler modules for the CLI.

mod connect;
mod execute;
mod list;
mod recent;
mod save;
mod show;

use crate::cli::{Action, Cli};
use crate::error::CliError;
use crate::util::resolve_home;

/// Version line printed by `-v`
#[must_use]
pub fn version_text() -> String {
    format!("Terminal Server Client {}", env!("CARGO_PKG_VERSION"))
}

/// Dispatch the parsed command line to the appropriate handler.
pub fn dispatch(cli: &Cli) -> Result<(), CliError> {
    let action = cli.action();
    if action == Action::Version {
        println!("{}", version_text());
        return Ok(());
    }

    let home = resolve_home(cli.home.as_deref())?;
    home.ensure()?;

    let file = cli.file.as_deref();
    match action {
        Action::Version => Ok(()),
        Action::Execute(path) => {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Profile to execute does not exist");
                return show::cmd_show(&home, file, cli.format);
            }
            match execute::cmd_execute(&path, cli.detach, cli.dry_run) {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    show::cmd_show(&home, Some(&path), cli.format)
                }
            }
        }
        Action::Connect => connect::cmd_connect(&home, file, cli.dry_run),
        Action::List(dir) => list::cmd_list(dir.as_deref().unwrap_or(home.root()), cli.format),
        Action::Recent => recent::cmd_recent(&home, cli.format),
        Action::Save(target) => save::cmd_save(&home, file, &target),
        Action::Show => show::cmd_show(&home, file, cli.format),
    }
}
