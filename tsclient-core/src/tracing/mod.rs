//! Structured logging setup.
//!
//! The library only emits `tracing` events; binaries call [`init_tracing`]
//! once to install a subscriber writing to stderr or a log file.

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Crates whose events the default directive enables
const LOG_TARGETS: [&str; 2] = ["tsclient_core", "tsclient"];

/// Errors that can occur while installing the subscriber
#[derive(Debug, Error)]
pub enum TracingError {
    /// The custom filter string is not a valid `EnvFilter` directive
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Filter as given
        filter: String,
        /// Parser message
        message: String,
    },

    /// The log file could not be created
    #[error("Failed to create log file {}: {source}", path.display())]
    FileCreationFailed {
        /// Requested log file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Verbosity of tsclient's own events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    #[default]
    Warn,
    /// Saved files, started clients
    Info,
    /// Built commands, probed displays
    Debug,
    /// Everything
    Trace,
}

impl TracingLevel {
    /// Directive spelling of the level
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Standard error, colored
    #[default]
    Stderr,
    /// A file, truncated on startup, without ANSI colors
    File(PathBuf),
}

/// Subscriber settings
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Level applied to tsclient's crates
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Full `EnvFilter` directive; replaces `level` when set
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a configuration logging warnings to stderr
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter directive
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Applies a user-supplied `--log-level` value.
    ///
    /// A plain level name sets the level; anything else is kept as a filter
    /// directive and checked when the subscriber is installed.
    #[must_use]
    pub fn with_level_or_filter(self, value: &str) -> Self {
        match value.parse::<TracingLevel>() {
            Ok(level) => self.with_level(level),
            Err(_) => self.with_filter(value),
        }
    }

    /// Filter directive used when no custom filter is set
    #[must_use]
    pub fn default_directive(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Builds the `EnvFilter` this configuration selects
    ///
    /// # Errors
    ///
    /// Returns [`TracingError::InvalidFilter`] when the custom filter does not parse.
    pub fn env_filter(&self) -> TracingResult<EnvFilter> {
        let directive = self
            .filter
            .clone()
            .unwrap_or_else(|| self.default_directive());
        EnvFilter::try_new(&directive).map_err(|e| TracingError::InvalidFilter {
            filter: directive,
            message: e.to_string(),
        })
    }
}

/// Installs the global subscriber described by `config`
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be created,
/// or a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    let filter = config.env_filter()?;

    let (writer, ansi) = match &config.output {
        TracingOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        TracingOutput::File(path) => {
            let file = std::fs::File::create(path).map_err(|source| {
                TracingError::FileCreationFailed {
                    path: path.clone(),
                    source,
                }
            })?;
            (BoxMakeWriter::new(file), false)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, output = ?config.output, "Tracing initialized");
    Ok(())
}

/// Macro for creating operation spans with standard fields
///
/// # Examples
///
/// ```ignore
/// let _span = trace_operation!(span_names::LAUNCH_RUN, program = %command.program).entered();
/// ```
#[macro_export]
macro_rules! trace_operation {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Span names used across tsclient
pub mod span_names {
    /// Profile load span
    pub const PROFILE_LOAD: &str = "profile.load";
    /// Profile save span
    pub const PROFILE_SAVE: &str = "profile.save";
    /// Launch command construction span
    pub const LAUNCH_BUILD: &str = "launch.build";
    /// Client process execution span
    pub const LAUNCH_RUN: &str = "launch.run";
    /// Free X display search span
    pub const DISPLAY_PROBE: &str = "display.probe";
    /// MRU list update span
    pub const MRU_UPDATE: &str = "mru.update";
}
