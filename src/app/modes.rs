//! Lifecycle phase of the selection engine.
//!
//! # State Machine
//!
//! ```text
//! Loading ──LoadCompleted──▶ Ready ──KeyConfirm / KeyQuit──▶ Quitting
//!    │                         │
//!    └──LoadFailed──▶ Failed   └──(re-filter, stays Ready)
//! ```
//!
//! `KeyQuit` also leads from `Loading` straight to `Quitting`. The phase only
//! ever moves forward; nothing returns to `Loading`.

/// Top-level lifecycle state of the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the index load to finish.
    ///
    /// Only `LoadCompleted`, `LoadFailed`, `KeyQuit` and resizes are honored.
    Loading,

    /// Entries are loaded and the user is filtering and navigating.
    Ready,

    /// The run is ending, possibly waiting for a copy task to complete.
    Quitting,

    /// The load failed; the run ends with a non-zero exit.
    Failed,
}

impl Phase {
    /// Whether the run has reached a phase it can never leave.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Quitting | Self::Failed)
    }
}
