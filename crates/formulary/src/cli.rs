//! CLI argument parsing, error classes and exit codes.

use clap::{Parser, Subcommand};
use miette::{Diagnostic, Report};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for success.
pub const EXIT_OK: i32 = 0;
/// Exit code for CLI, formula or platform errors.
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for install pipeline failures.
pub const EXIT_INSTALL: i32 = 3;

/// CLI-specific error types with proper exit code mapping.
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum CliError {
    /// CLI usage, formula or platform error (exit code 2).
    #[error("Configuration error: {message}")]
    #[diagnostic(code(formulary::cli::config))]
    Config {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Install pipeline failure (exit code 3).
    #[error("Install error: {message}")]
    #[diagnostic(code(formulary::cli::install))]
    Install {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
    /// Other unexpected error (exit code 3).
    #[error("Unexpected error: {message}")]
    #[diagnostic(code(formulary::cli::other))]
    Other {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text.
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new install error.
    #[must_use]
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new other error.
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to an existing error.
    #[must_use]
    pub fn with_help(self, help_text: impl Into<String>) -> Self {
        let help = Some(help_text.into());
        match self {
            Self::Config { message, .. } => Self::Config { message, help },
            Self::Install { message, .. } => Self::Install { message, help },
            Self::Other { message, .. } => Self::Other { message, help },
        }
    }
}

impl From<formulary_core::Error> for CliError {
    fn from(err: formulary_core::Error) -> Self {
        // Everything the descriptor layer reports is an authoring problem.
        Self::config(err.to_string())
    }
}

/// Map pipeline errors to CLI categories.
///
/// Unsupported platform, overwrite refusal and formula defects are
/// configuration errors (exit code 2); download, integrity, self-test
/// and I/O failures are install errors (exit code 3).
impl From<formulary_installer::Error> for CliError {
    fn from(err: formulary_installer::Error) -> Self {
        match err {
            formulary_installer::Error::UnsupportedPlatform { .. }
            | formulary_installer::Error::AlreadyInstalled { .. } => Self::config(err.to_string()),
            formulary_installer::Error::Formula(inner) => inner.into(),
            formulary_installer::Error::Download { .. }
            | formulary_installer::Error::IntegrityMismatch { .. }
            | formulary_installer::Error::SelfTestFailed { .. }
            | formulary_installer::Error::Io(_) => Self::install(err.to_string()),
        }
    }
}

/// Map CLI error to appropriate exit code.
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CONFIG,
        CliError::Install { .. } | CliError::Other { .. } => EXIT_INSTALL,
    }
}

/// Render error appropriately based on JSON flag.
pub fn render_error(err: &CliError, json_mode: bool) {
    if json_mode {
        let envelope = ErrorEnvelope::new(serde_json::json!({
            "code": match err {
                CliError::Config { .. } => "config",
                CliError::Install { .. } => "install",
                CliError::Other { .. } => "other",
            },
            "message": err.to_string()
        }));

        match serde_json::to_string(&envelope) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error serializing error response"),
        }
    } else {
        // Use miette for human-friendly error display
        let report = Report::new(err.clone());
        eprintln!("{report:?}");
        let _ = io::stderr().flush();
    }
}

/// Success response envelope for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkEnvelope<T> {
    /// Status indicator - always "ok" for success.
    pub status: &'static str,
    /// The actual data payload.
    pub data: T,
}

impl<T> OkEnvelope<T> {
    /// Create a new success envelope.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response envelope for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope<E> {
    /// Status indicator - always "error" for failures.
    pub status: &'static str,
    /// The error details.
    pub error: E,
}

impl<E> ErrorEnvelope<E> {
    /// Create a new error envelope.
    #[must_use]
    pub const fn new(error: E) -> Self {
        Self {
            status: "error",
            error,
        }
    }
}

/// Main CLI entry point for formulary.
///
/// A minimal formula-driven installer: fetch a prebuilt binary, verify
/// its SHA-256, place it on the PATH and run its version self-test.
#[derive(Parser, Debug)]
#[command(name = "formulary")]
#[command(about = "Fetch, verify and install prebuilt CLI binaries from formula files")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level.
    #[arg(
        short = 'L',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: crate::tracing::LogLevel,

    /// Log output format (defaults to pretty, or json with --json).
    #[arg(long, global = true, help = "Set log output format", value_enum)]
    pub log_format: Option<crate::tracing::TracingFormat>,

    /// Emit JSON envelopes instead of human-readable output.
    #[arg(long, global = true, help = "Emit JSON envelopes on stdout")]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the binary a formula describes.
    #[command(about = "Download, verify, install and self-test a formula's binary")]
    Install {
        /// Path to the formula TOML file.
        formula: PathBuf,
        /// Directory to install into (defaults to the user bin dir).
        #[arg(long)]
        bin_dir: Option<PathBuf>,
        /// Install for this platform instead of the current one.
        #[arg(long)]
        platform: Option<String>,
        /// Skip the post-install self-test.
        #[arg(long)]
        skip_test: bool,
        /// Overwrite an existing installed binary.
        #[arg(long)]
        force: bool,
    },

    /// Print a parsed formula.
    #[command(about = "Parse a formula and print its contents")]
    Show {
        /// Path to the formula TOML file.
        formula: PathBuf,
    },

    /// Validate a formula without installing anything.
    #[command(about = "Check a formula against the authoring rules")]
    Validate {
        /// Path to the formula TOML file.
        formula: PathBuf,
    },

    /// Render a formula as a Ruby Homebrew formula.
    #[command(about = "Render a formula as Ruby for a Homebrew tap")]
    Brew {
        /// Path to the formula TOML file.
        formula: PathBuf,
    },
}

/// Parse command line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
