//! Error types for gopkg-search.
//!
//! This module defines the centralized error type [`GopkgError`] and a type alias
//! [`Result`] used throughout the crate. Errors raised inside background tasks are
//! never propagated with `?` into the event loop; they travel back as typed
//! completion events and end up in the final message.

use thiserror::Error;

/// The main error type for gopkg-search operations.
///
/// The variants follow the failure taxonomy of the selection engine:
///
/// - [`Transport`](Self::Transport) is fatal for the load and ends the run.
/// - [`Decode`](Self::Decode) is recovered per index line and only logged.
/// - [`SinkUnavailable`](Self::SinkUnavailable),
///   [`SinkExecution`](Self::SinkExecution) and
///   [`UnsupportedPlatform`](Self::UnsupportedPlatform) end a confirmed copy with
///   a non-zero exit.
///
/// # Examples
///
/// ```
/// use gopkg_search::GopkgError;
///
/// let err = GopkgError::SinkUnavailable {
///     command: "xclip".to_string(),
///     stderr: String::new(),
/// };
/// assert!(err.to_string().contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum GopkgError {
    /// Fetching or reading the module index failed.
    ///
    /// Covers connection failures, non-200 responses and unreadable response
    /// bodies. The string carries the full human-readable cause.
    #[error("{0}")]
    Transport(String),

    /// A single index line could not be decoded.
    ///
    /// Never fatal: the line is skipped and the load continues.
    #[error("malformed index line {line}: {reason}")]
    Decode {
        /// One-based line number within the response body.
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// The clipboard utility is not installed or not on `PATH`.
    #[error("clipboard command '{command}' not found. Please ensure it's installed and in your PATH. (Stderr: {stderr})")]
    SinkUnavailable {
        /// Utility name, e.g. `xclip`.
        command: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The clipboard utility ran but did not succeed.
    #[error("clipboard command '{command}' exited with error {}: (Stderr: {stderr})", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    SinkExecution {
        /// Utility name, e.g. `pbcopy`.
        command: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// No clipboard utility is known for this operating system.
    #[error("unsupported operating system for clipboard: {0}")]
    UnsupportedPlatform(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The terminal could not be put into or taken out of raw mode.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// A specialized `Result` type for gopkg-search operations.
pub type Result<T> = std::result::Result<T, GopkgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_execution_reports_exit_code_and_stderr() {
        let err = GopkgError::SinkExecution {
            command: "xclip".to_string(),
            code: Some(1),
            stderr: "Error: Can't open display".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'xclip' exited with error 1"));
        assert!(message.contains("Can't open display"));
    }

    #[test]
    fn sink_execution_without_code_mentions_signal() {
        let err = GopkgError::SinkExecution {
            command: "pbcopy".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("exited with error signal"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: GopkgError = io.into();
        assert!(matches!(err, GopkgError::Io(_)));
    }
}
