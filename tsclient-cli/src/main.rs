//! tsclient - command-line front end for Terminal Server Client
//!
//! Shows, saves and lists connection profiles, prints the recently used
//! servers, and launches rdesktop, a VNC viewer, Xnest or wfica for a profile.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use tsclient_core::tracing::{TracingConfig, TracingOutput, init_tracing};

fn tracing_config(cli: &Cli) -> TracingConfig {
    let output = cli
        .log_file
        .clone()
        .map_or(TracingOutput::Stderr, TracingOutput::File);
    TracingConfig::new()
        .with_output(output)
        .with_level_or_filter(&cli.log_level)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&tracing_config(&cli)) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = commands::dispatch(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
