//! tsclient Core Library
//!
//! Connection profiles for the Terminal Server Client front end: reading and
//! writing profile files, remembering recent servers, and turning a profile
//! into a command line for rdesktop, a VNC viewer, Xnest or wfica.
//!
//! # Crate Structure
//!
//! - [`models`] - The connection profile, protocol codes and preset tables
//! - [`store`] - Profile Store: structured and legacy file formats, enumeration
//! - [`launch`] - Launch Command Builder, client discovery, process runner
//! - [`mru`] - Most-recently-used server list
//! - [`config`] - Location of `~/.tsclient` and its files
//! - [`escape`] - C-style string escaping for arguments
//! - [`tracing`] - Logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod escape;
pub mod launch;
pub mod models;
pub mod mru;
pub mod store;
pub mod tracing;

pub use config::TsClientHome;
pub use error::{FileError, LaunchError, TsClientError, TsClientResult};
pub use launch::{
    BinaryResolver, DisplayProbe, LaunchCommand, LaunchCommandBuilder, ProcessRunner, RunOutput,
    SystemResolver, SystemRunner, X11DisplayProbe, connect,
};
pub use models::{ConnectionProfile, Protocol, SCREEN_PRESETS, ScreenPreset};
pub use mru::{MRU_CAPACITY, MruList};
pub use store::{ProfileFormat, ProfileLocation};
