//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

/// Terminal Server Client: connect to RDP, VNC, XDMCP and ICA servers
#[derive(Parser, Debug)]
#[command(name = "tsclient")]
#[command(about = "Terminal Server Client")]
#[command(disable_version_flag = true)]
#[command(group(
    ArgGroup::new("action")
        .args(["execute", "connect", "list", "recent", "save"])
))]
pub struct Cli {
    /// Profile to use instead of default.tsc or last.tsc
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Launch the client for FILE without further interaction
    #[arg(short = 'x', long, value_name = "FILE")]
    pub execute: Option<PathBuf>,

    /// Start the client for --execute in the background instead of waiting for it
    #[arg(long, requires = "execute")]
    pub detach: bool,

    /// Connect with the profile: save it as last.tsc, run the client, record the server
    #[arg(short, long)]
    pub connect: bool,

    /// Print the command that would be executed without running it
    #[arg(long)]
    pub dry_run: bool,

    /// List .rdp profiles under DIR (default: the tsclient directory)
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    pub list: Option<Option<PathBuf>>,

    /// Print the recently used servers
    #[arg(long)]
    pub recent: bool,

    /// Write the profile to FILE in the current format
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Output format for profile, list and recent output
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Directory holding default.tsc, last.tsc and mru.tsc
    #[arg(long, value_name = "DIR", env = "TSCLIENT_HOME")]
    pub home: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace) or a tracing filter
    #[arg(long, value_name = "LEVEL", env = "TSCLIENT_LOG", default_value = "warn")]
    pub log_level: String,

    /// Write log output to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// What the invocation asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the version line
    Version,
    /// Launch a profile file directly
    Execute(PathBuf),
    /// Run the connect flow
    Connect,
    /// Enumerate profiles
    List(Option<PathBuf>),
    /// Print the MRU list
    Recent,
    /// Re-save the profile
    Save(PathBuf),
    /// Print the resolved profile
    Show,
}

impl Cli {
    /// Resolves the flags into a single action
    #[must_use]
    pub fn action(&self) -> Action {
        if self.version {
            return Action::Version;
        }
        if let Some(file) = &self.execute {
            return Action::Execute(file.clone());
        }
        if self.connect {
            return Action::Connect;
        }
        if let Some(dir) = &self.list {
            return Action::List(dir.clone());
        }
        if self.recent {
            return Action::Recent;
        }
        if let Some(file) = &self.save {
            return Action::Save(file.clone());
        }
        Action::Show
    }
}

/// Output format for printed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
