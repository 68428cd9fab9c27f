//! Launch Command Builder and process execution.
//!
//! A [`LaunchCommandBuilder`] turns a [`ConnectionProfile`](crate::models::ConnectionProfile)
//! into a [`LaunchCommand`] for rdesktop, a VNC viewer, Xnest or wfica. A
//! [`ProcessRunner`] then starts it, either waiting for it to exit or detached.

mod builder;
mod command;
mod connect;
pub mod detection;
pub mod display;
mod runner;

pub use builder::{
    LaunchCommandBuilder, RDP_GEOMETRIES, WINDOW_TITLE_SUFFIX, X_GEOMETRIES, ica_args, ica_depth,
    rdp_args, vnc_args, xnest_args,
};
pub use command::LaunchCommand;
pub use connect::connect;
pub use detection::{BinaryResolver, ResolvedClient, SystemResolver, resolve_client};
pub use display::{DisplayProbe, X11DisplayProbe, find_free_display};
pub use runner::{ProcessRunner, RunOutput, SystemRunner};
