//! Launch Command Builder: turns a profile into a client invocation.
//!
//! Each protocol has its own argument conventions. Free-text values placed
//! into arguments are C-escaped with [`escape`]; values passed as separate
//! arguments after a flag (`-V`, `-k`, `-L`, `-s`, `-c`) are passed as-is.
//!
//! Geometry is only emitted for a fixed set of widths per client. Other sizes,
//! including most entries of [`crate::models::SCREEN_PRESETS`], produce no
//! geometry argument and leave the size to the client.

use std::path::Path;

use super::command::LaunchCommand;
use super::detection::{BinaryResolver, SystemResolver, resolve_client};
use super::display::{DisplayProbe, FIRST_DISPLAY, X11DisplayProbe, find_free_display};
use crate::error::LaunchError;
use crate::escape::escape;
use crate::models::{AUDIO_LOCAL, AUDIO_REMOTE, ConnectionProfile, Protocol};
use crate::trace_operation;
use crate::tracing::span_names;

/// Window title suffix for rdesktop
pub const WINDOW_TITLE_SUFFIX: &str = "Terminal Server Client";

/// Desktop sizes rdesktop is given a `-g` argument for
pub const RDP_GEOMETRIES: [(i32, i32); 6] = [
    (640, 480),
    (800, 600),
    (1024, 768),
    (1152, 864),
    (1280, 960),
    (1400, 1050),
];

/// Desktop sizes VNC viewers, Xnest and wfica are given `-geometry` for
pub const X_GEOMETRIES: [(i32, i32); 5] = [
    (640, 480),
    (800, 600),
    (1024, 768),
    (1152, 864),
    (1280, 960),
];

fn geometry(table: &[(i32, i32)], width: i32) -> Option<(i32, i32)> {
    table.iter().copied().find(|&(w, _)| w == width)
}

/// Builds launch commands using a binary resolver and a display probe
#[derive(Debug, Clone, Default)]
pub struct LaunchCommandBuilder<R = SystemResolver, P = X11DisplayProbe> {
    resolver: R,
    probe: P,
}

impl LaunchCommandBuilder {
    /// Creates a builder backed by the real `PATH` and X server state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: BinaryResolver, P: DisplayProbe> LaunchCommandBuilder<R, P> {
    /// Creates a builder with custom lookup strategies
    #[must_use]
    pub fn with_parts(resolver: R, probe: P) -> Self {
        Self { resolver, probe }
    }

    /// Builds the command that connects with `profile`.
    ///
    /// # Errors
    ///
    /// - [`LaunchError::MissingAddress`] when `full_address` is empty
    /// - [`LaunchError::BinaryNotFound`] when no client for the protocol is installed
    /// - [`LaunchError::NoFreeDisplay`] when an XDMCP session finds no free display
    pub fn build(&self, profile: &ConnectionProfile) -> Result<LaunchCommand, LaunchError> {
        let protocol = profile.protocol;
        let _span = trace_operation!(span_names::LAUNCH_BUILD, protocol = %protocol).entered();

        if profile.full_address.is_empty() {
            return Err(LaunchError::MissingAddress);
        }

        let client = resolve_client(&self.resolver, protocol)
            .ok_or(LaunchError::BinaryNotFound { protocol })?;

        let args = match protocol {
            Protocol::RdpV5 | Protocol::RdpV4 => rdp_args(profile),
            Protocol::Vnc => vnc_args(profile, self.password_file_exists(profile)),
            Protocol::Xdmcp => {
                let display = find_free_display(&self.probe, FIRST_DISPLAY)
                    .ok_or(LaunchError::NoFreeDisplay)?;
                xnest_args(profile, display)
            }
            Protocol::Ica => ica_args(profile, self.password_file_exists(profile)),
        };

        let mut command = LaunchCommand::new(client.name, client.path, args);
        if let Some((secret, flag)) = password_arg(profile)
            && let Some(index) = command.args.iter().position(|arg| *arg == secret)
        {
            command = command.with_sensitive(index, flag);
        }
        tracing::debug!(command = %command.display_for_log(), "Launch command built");
        Ok(command)
    }

    fn password_file_exists(&self, profile: &ConnectionProfile) -> bool {
        !profile.proto_file.is_empty() && self.resolver.exists(Path::new(&profile.proto_file))
    }
}

/// rdesktop arguments for either RDP variant
#[must_use]
pub fn rdp_args(profile: &ConnectionProfile) -> Vec<String> {
    let mut args = vec![format!("-T{} - {WINDOW_TITLE_SUFFIX}", profile.full_address)];

    for (flag, value) in [
        ("-u", &profile.username),
        ("-p", &profile.password),
        ("-d", &profile.domain),
        ("-n", &profile.client_hostname),
    ] {
        if !value.is_empty() {
            args.push(format!("{flag}{}", escape(value)));
        }
    }

    if profile.is_fullscreen() {
        args.push("-f".into());
    } else if let Some((w, h)) = geometry(&RDP_GEOMETRIES, profile.desktop_width) {
        args.push(format!("-g{w}x{h}"));
    }

    if matches!(profile.session_bpp, 8 | 15 | 16 | 24) {
        args.push(format!("-a{}", profile.session_bpp));
    }

    args.push(
        match profile.audio_mode {
            AUDIO_LOCAL => "-rsound:local",
            AUDIO_REMOTE => "-rsound:remote",
            _ => "-rsound:off",
        }
        .into(),
    );
    args.push("-rclipboard:PRIMARYCLIPBOARD".into());

    push_flag(&mut args, profile.bitmap_cache_persist_enable, "-P");
    push_flag(&mut args, profile.disable_encryption, "-e");
    push_flag(&mut args, profile.disable_client_encryption, "-E");
    push_pair(&mut args, "-V", &profile.tls_version);
    push_flag(&mut args, profile.no_motion_events, "-m");
    push_flag(&mut args, profile.enable_wm_keys, "-K");
    push_flag(&mut args, profile.hide_wm_decorations, "-D");
    push_flag(&mut args, profile.attach_to_console, "-0");
    push_flag(&mut args, profile.force_bitmap_updates, "-b");
    push_flag(&mut args, profile.use_backing_store, "-B");

    push_pair(&mut args, "-k", &profile.keyboard_language);
    push_pair(&mut args, "-L", &profile.local_codepage);

    push_flag(&mut args, profile.disable_remote_ctrl, "-t");
    push_flag(&mut args, profile.sync_numlock, "-N");

    if profile.enable_alternate_shell {
        push_pair(&mut args, "-s", &profile.alternate_shell);
        push_pair(&mut args, "-c", &profile.shell_working_directory);
    }

    // Only the stored-as-0 variant gets -4.
    if profile.protocol == Protocol::RdpV5 {
        args.push("-4".into());
    }

    args.push(escape(&profile.full_address));
    args
}

/// VNC viewer arguments
#[must_use]
pub fn vnc_args(profile: &ConnectionProfile, password_file_exists: bool) -> Vec<String> {
    let mut args = Vec::new();

    if profile.is_fullscreen() {
        args.push("-fullscreen".into());
    } else {
        push_x_geometry(&mut args, profile.desktop_width);
    }

    push_flag(&mut args, profile.no_motion_events, "-v");
    push_password_file(&mut args, profile, password_file_exists);

    args.push(escape(&profile.full_address));
    args
}

/// Xnest arguments for an XDMCP session on display `:display`
#[must_use]
pub fn xnest_args(profile: &ConnectionProfile, display: u32) -> Vec<String> {
    let mut args = vec![format!(":{display}"), "-once".into()];
    push_x_geometry(&mut args, profile.desktop_width);
    args.push("-query".into());
    args.push(escape(&profile.full_address));
    args
}

/// wfica arguments
#[must_use]
pub fn ica_args(profile: &ConnectionProfile, password_file_exists: bool) -> Vec<String> {
    let mut args = Vec::new();

    for (flag, value) in [
        ("-username", &profile.username),
        ("-password", &profile.password),
        ("-domain", &profile.domain),
        ("-clientname", &profile.client_hostname),
    ] {
        if !value.is_empty() {
            args.push(format!("{flag} {}", escape(value)));
        }
    }

    push_x_geometry(&mut args, profile.desktop_width);

    if let Some(depth) = ica_depth(profile.session_bpp) {
        args.push("-depth".into());
        args.push(depth.into());
    }

    if profile.enable_alternate_shell {
        if !profile.alternate_shell.is_empty() {
            args.push(format!("-program {}", escape(&profile.alternate_shell)));
        }
        if !profile.shell_working_directory.is_empty() {
            args.push(format!("-directory {}", escape(&profile.shell_working_directory)));
        }
    }

    push_password_file(&mut args, profile, password_file_exists);

    args.push(format!("-description {}", escape(&profile.full_address)));
    args
}

/// The argument carrying the password and the flag it starts with
fn password_arg(profile: &ConnectionProfile) -> Option<(String, &'static str)> {
    if profile.password.is_empty() {
        return None;
    }
    let password = escape(&profile.password);
    match profile.protocol {
        Protocol::RdpV5 | Protocol::RdpV4 => Some((format!("-p{password}"), "-p")),
        Protocol::Ica => Some((format!("-password {password}"), "-password ")),
        Protocol::Vnc | Protocol::Xdmcp => None,
    }
}

/// wfica `-depth` value for a session color depth.
///
/// wfica counts colors differently from rdesktop: 8 bpp maps to 4.
#[must_use]
pub const fn ica_depth(session_bpp: i32) -> Option<&'static str> {
    match session_bpp {
        8 => Some("4"),
        15 => Some("8"),
        16 => Some("16"),
        24 => Some("24"),
        _ => None,
    }
}

fn push_flag(args: &mut Vec<String>, enabled: bool, flag: &str) {
    if enabled {
        args.push(flag.to_string());
    }
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    if !value.is_empty() {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

fn push_x_geometry(args: &mut Vec<String>, width: i32) {
    if let Some((w, h)) = geometry(&X_GEOMETRIES, width) {
        args.push("-geometry".into());
        args.push(format!("{w}x{h}"));
    }
}

fn push_password_file(args: &mut Vec<String>, profile: &ConnectionProfile, exists: bool) {
    if exists {
        args.push("-passwd".into());
        args.push(escape(&profile.proto_file));
    }
}
