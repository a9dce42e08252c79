//! Actions representing side effects to be executed by the event loop.
//!
//! The transition function never performs I/O. Instead it returns a
//! `Vec<Action>` describing what should happen next, and the event loop
//! executes them in order after the new state is in place.
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::app::Action;
//! use gopkg_search::worker::Task;
//!
//! let actions = vec![
//!     Action::Spawn(Task::Copy { text: "golang.org/x/text".to_string() }),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::Task;

/// Commands representing side effects to be executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Runs a background task.
    ///
    /// The task reports back with exactly one completion event through the
    /// loop's queue.
    Spawn(Task),

    /// Stops the event loop and ends the process with `code`.
    ///
    /// The final message to print is read from the state at that point.
    Exit {
        /// Process exit code: 0 for a clean quit or successful copy.
        code: i32,
    },
}
