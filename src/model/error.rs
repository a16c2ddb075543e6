//! Error types for vaultnav.
//!
//! One `thiserror` enum per failure domain, composed into [`AppError`] via
//! `From` so the `?` operator threads them upward.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from the application loop
//!   - [`SearchError`] - the external search tool is missing or failed
//!   - [`crate::config::ConfigError`] - config file unreadable or invalid
//!   - [`EditorError`] - invalid editor command, terminal loss during handoff
//!   - [`crate::logging::LoggingError`] - log file setup
//!   - `std::io::Error` - terminal failures
//! - [`MetadataError`] - per-document header read failure (never reaches `AppError`)
//! - [`EditorError`] - editor handoff failure (only the terminal variant is fatal)
//!
//! # Recovery
//!
//! Search failures end the current search session and are reported on the
//! main menu. Metadata failures leave the affected record with empty
//! metadata. Editor failures are reported on the detail screen. Terminal
//! failures are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Search tool unavailable or erroring.
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The editor command is unusable.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot continue.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures invoking the external search tool.
///
/// Any of these aborts aggregation: no partial result sequence is returned.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search program is not installed or not on `PATH`.
    #[error("search tool '{program}' not found")]
    ToolNotFound {
        /// Program name that was attempted.
        program: String,
    },

    /// The search program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program name that was attempted.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The corpus root is not an existing directory.
    #[error("search root {} is not a directory", .root.display())]
    MissingRoot {
        /// Root that was searched.
        root: PathBuf,
    },

    /// The search program exited with an error status.
    ///
    /// "No matches" exits are not errors and never produce this variant.
    #[error("'{program}' exited with {}: {stderr}", describe_exit(.code))]
    Failed {
        /// Program name.
        program: String,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Trimmed standard error output.
        stderr: String,
    },
}

/// Failure reading a document's metadata header.
///
/// Non-fatal: the record is created with empty metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Absolute document path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The header block is not valid structured data.
    #[error("invalid metadata header in {path}: {reason}")]
    InvalidHeader {
        /// Absolute document path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// Failures around the external editor handoff.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The editor command string is empty or cannot be split into words.
    #[error("invalid editor command '{command}': {reason}")]
    InvalidCommand {
        /// Configured command string.
        command: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The editor process could not be started.
    #[error("failed to launch editor '{program}': {source}")]
    Launch {
        /// Editor program.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The editor exited unsuccessfully.
    ///
    /// Non-fatal: the detail screen is re-entered regardless.
    #[error("editor '{program}' exited with {}", describe_exit(.code))]
    NonZeroExit {
        /// Editor program.
        program: String,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
    },

    /// The selected path is no longer among the in-memory results.
    #[error("'{path}' is no longer part of the search results")]
    StalePath {
        /// Corpus-relative path that was requested.
        path: String,
    },

    /// Suspending or restoring the terminal failed. Fatal.
    #[error("terminal error during editor handoff: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Render an exit code for error messages.
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "signal".to_string(),
    }
}

impl EditorError {
    /// Whether the error must abort the application.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EditorError::Terminal(_))
    }
}
