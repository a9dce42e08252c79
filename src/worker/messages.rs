//! Background task protocol.
//!
//! The transition function requests work with a [`Task`] inside
//! [`Action::Spawn`](crate::app::Action::Spawn); the runner answers with
//! exactly one [`TaskEvent`] per task, which re-enters the event loop as
//! [`Event::Task`](crate::app::Event::Task).

use crate::domain::{Entry, GopkgError};

/// Work requested from the background runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Fetch and decode the full package index.
    Load,

    /// Place `text` on the system clipboard.
    Copy {
        /// Text to copy, the selected package path.
        text: String,
    },
}

impl Task {
    /// Short name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Copy { .. } => "copy",
        }
    }
}

/// Completion reported by the background runner.
#[derive(Debug)]
pub enum TaskEvent {
    /// The index was fetched; entries are in feed order, deduplicated.
    LoadCompleted {
        /// Decoded entries.
        entries: Vec<Entry>,
    },

    /// Fetching or decoding the index failed.
    LoadFailed {
        /// Cause of the failure.
        error: GopkgError,
    },

    /// The clipboard accepted the text.
    CopyCompleted {
        /// Text that was copied.
        text: String,
    },

    /// The clipboard command could not be run or exited with an error.
    CopyFailed {
        /// Cause of the failure.
        error: GopkgError,
    },
}
