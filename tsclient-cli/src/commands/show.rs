//! Show profile command, the default action.

use std::fmt::Write as _;
use std::path::Path;

use serde_json::json;
use tsclient_core::config::TsClientHome;
use tsclient_core::models::ConnectionProfile;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{LoadedProfile, load_profile, to_json};

/// Show profile command handler
pub fn cmd_show(
    home: &TsClientHome,
    file: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let loaded = load_profile(home, file)?;

    match format {
        OutputFormat::Text => print!("{}", format_profile(&loaded)),
        OutputFormat::Json => println!("{}", to_json(&profile_json(&loaded))?),
    }
    Ok(())
}

fn screen_label(profile: &ConnectionProfile) -> String {
    if profile.is_fullscreen() {
        "fullscreen".to_string()
    } else if profile.uses_default_size() {
        "default".to_string()
    } else {
        format!("{} x {} pixels", profile.desktop_width, profile.desktop_height)
    }
}

fn source_label(loaded: &LoadedProfile) -> String {
    loaded
        .path
        .as_ref()
        .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string())
}

/// Format the profile summary. Passwords are never printed.
#[must_use]
pub fn format_profile(loaded: &LoadedProfile) -> String {
    let profile = &loaded.profile;
    let mut output = String::new();

    let _ = writeln!(output, "Profile: {}", source_label(loaded));
    let _ = writeln!(output, "  Computer: {}", profile.full_address);
    let _ = writeln!(output, "  Protocol: {}", profile.protocol);
    let _ = writeln!(output, "  Screen:   {}", screen_label(profile));

    for (label, value) in [
        ("Username", &profile.username),
        ("Domain", &profile.domain),
        ("Client", &profile.client_hostname),
        ("Description", &profile.description),
    ] {
        if !value.is_empty() {
            let _ = writeln!(output, "  {label}: {value}");
        }
    }
    if profile.session_bpp > 0 {
        let _ = writeln!(output, "  Colors:   {} bpp", profile.session_bpp);
    }
    if !profile.password.is_empty() {
        let _ = writeln!(output, "  Password: saved");
    }
    output
}

fn profile_json(loaded: &LoadedProfile) -> serde_json::Value {
    let profile = &loaded.profile;
    json!({
        "source": loaded.path.as_ref().map(|p| p.display().to_string()),
        "full_address": profile.full_address,
        "protocol": profile.protocol,
        "username": profile.username,
        "domain": profile.domain,
        "client_hostname": profile.client_hostname,
        "description": profile.description,
        "screen": screen_label(profile),
        "session_bpp": profile.session_bpp,
        "password_saved": !profile.password.is_empty(),
    })
}
