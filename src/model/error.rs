//! Error types for the pager shell.
//!
//! The navigation core never fails: a search without hits is the `NotFound`
//! mode, and bad goto-line input is ignored. Errors only exist at the edges,
//! where input is opened, configuration is loaded, and the terminal is driven.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error wrapping all shell failures
//!   - [`InputError`] - File/stdin opening failures
//!   - [`ConfigError`](crate::config::loader::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Log file setup failures
//!   - [`TuiError`](crate::view::TuiError) - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All shell errors convert into `AppError` via `From`, so startup code can
/// use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open the content to page through. Fatal.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// The configuration file exists but could not be used. Fatal.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::loader::ConfigError),

    /// Log file setup failed. Fatal.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] crate::view::TuiError),
}

/// Errors encountered when opening content from files or stdin.
///
/// Once a source is open, read failures during streaming are not errors:
/// the reader logs them and marks the content as complete.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use pagr::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No file argument was given and stdin is an interactive terminal.
    #[error("No input source: provide a file path or pipe data into pagr")]
    NoInput,

    /// Generic I/O failure while opening the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
