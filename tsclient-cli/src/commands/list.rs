//! List profiles command.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::json;
use tsclient_core::store::{ProfileLocation, enumerate_profile_locations};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::to_json;

/// List profiles command handler
pub fn cmd_list(root: &Path, format: OutputFormat) -> Result<(), CliError> {
    let mut profiles: Vec<(String, ProfileLocation)> =
        enumerate_profile_locations(root).into_iter().collect();
    profiles.sort_by(|a, b| a.0.cmp(&b.0));

    match format {
        OutputFormat::Text => print!("{}", format_table(&profiles)),
        OutputFormat::Json => {
            let entries: Vec<_> = profiles
                .iter()
                .map(|(name, location)| {
                    json!({
                        "name": name,
                        "location": location_label(location),
                    })
                })
                .collect();
            println!("{}", to_json(&json!(entries))?);
        }
    }
    Ok(())
}

fn location_label(location: &ProfileLocation) -> &str {
    match location {
        ProfileLocation::Root => ".",
        ProfileLocation::Subdir(dir) => dir.as_str(),
    }
}

/// Format profiles as a table string
#[must_use]
pub fn format_table(profiles: &[(String, ProfileLocation)]) -> String {
    if profiles.is_empty() {
        return "No profiles found.\n".to_string();
    }

    let name_width = profiles
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    let _ = writeln!(output, "{:<name_width$}  LOCATION", "NAME");
    let _ = writeln!(output, "{:-<name_width$}  --------", "");
    for (name, location) in profiles {
        let _ = writeln!(output, "{name:<name_width$}  {}", location_label(location));
    }
    output
}
