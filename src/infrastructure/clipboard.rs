//! System clipboard access through the platform's clipboard utility.
//!
//! | OS      | Command                          |
//! |---------|----------------------------------|
//! | macOS   | `pbcopy`                         |
//! | Linux   | `xclip -selection clipboard -i`  |
//! | Windows | `cmd /c clip`                    |
//!
//! The text is written to the utility's standard input, which is then closed;
//! standard error is captured for the failure message.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::domain::error::{GopkgError, Result};

/// Destination for the confirmed selection.
pub trait CopySink: Send + Sync {
    /// Places `text` on the clipboard, blocking until the utility exits.
    ///
    /// # Errors
    ///
    /// Returns a sink error when the utility is missing, fails, or no utility
    /// is known for the platform.
    fn copy(&self, text: &str) -> Result<()>;
}

/// A clipboard utility invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    /// Name shown in error messages.
    pub name: String,
    /// Program to execute.
    pub program: String,
    /// Arguments passed to `program`.
    pub args: Vec<String>,
}

impl ClipboardCommand {
    /// Creates an invocation from its parts.
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Picks the utility for an operating system name as in [`std::env::consts::OS`].
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::UnsupportedPlatform`] for any other OS.
    ///
    /// # Examples
    ///
    /// ```
    /// use gopkg_search::infrastructure::clipboard::ClipboardCommand;
    ///
    /// let cmd = ClipboardCommand::for_os("linux").unwrap();
    /// assert_eq!(cmd.program, "xclip");
    /// assert!(ClipboardCommand::for_os("plan9").is_err());
    /// ```
    pub fn for_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(Self::new("pbcopy", "pbcopy", &[])),
            "linux" => Ok(Self::new("xclip", "xclip", &["-selection", "clipboard", "-i"])),
            "windows" => Ok(Self::new("clip", "cmd", &["/c", "clip"])),
            other => Err(GopkgError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Picks the utility for the running platform.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::UnsupportedPlatform`] when no utility is known.
    pub fn detect() -> Result<Self> {
        Self::for_os(std::env::consts::OS)
    }
}

impl CopySink for ClipboardCommand {
    fn copy(&self, text: &str) -> Result<()> {
        let _span = tracing::debug_span!("clipboard_copy", command = %self.name, len = text.len()).entered();

        let mut child = match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GopkgError::SinkUnavailable {
                    command: self.name.clone(),
                    stderr: String::new(),
                });
            }
            Err(e) => return Err(GopkgError::Io(e)),
        };

        // stdin must be closed before waiting, or the utility never sees EOF
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                tracing::debug!(error = %e, "writing to clipboard utility failed");
            }
        }

        let output = child.wait_with_output()?;
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        match output.status.code() {
            Some(0) => {
                tracing::debug!("clipboard updated");
                Ok(())
            }
            // shells report a missing program as 127
            Some(127) => Err(GopkgError::SinkUnavailable {
                command: self.name.clone(),
                stderr,
            }),
            code => Err(GopkgError::SinkExecution {
                command: self.name.clone(),
                code,
                stderr,
            }),
        }
    }
}

/// The clipboard utility of the running platform, resolved on each copy.
///
/// An unsupported platform only surfaces as an error when a copy is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl CopySink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        ClipboardCommand::detect()?.copy(text)
    }
}
