//! Event handling and state transition logic.
//!
//! [`transition`] is the only place the selection state changes. It consumes
//! the current state and one [`Event`], and returns the next state together
//! with the side effects to perform. It does no I/O itself, which keeps every
//! key sequence reproducible in a unit test.
//!
//! # Event Types
//!
//! - **Input**: `KeyTyped`, `KeyBackspace`
//! - **Navigation**: `KeyUp`, `KeyDown`
//! - **Lifecycle**: `KeyConfirm`, `KeyQuit`
//! - **Layout**: `ViewportResized`
//! - **Tasks**: `Task` wrapping a [`TaskEvent`] completion
//!
//! Events that make no sense in the current [`Phase`] (typing while loading,
//! navigation after quitting, a load result arriving after quit) are ignored:
//! the state comes back unchanged and no action is emitted.
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::app::{transition, Event, SelectionState};
//! use gopkg_search::worker::TaskEvent;
//! use gopkg_search::Entry;
//!
//! let state = SelectionState::new(20);
//! let loaded = Event::Task(TaskEvent::LoadCompleted {
//!     entries: vec![Entry::new("golang.org/x/text")],
//! });
//! let (state, actions) = transition(state, loaded);
//! assert!(actions.is_empty());
//! assert_eq!(state.matches.len(), 1);
//! ```

use super::modes::Phase;
use super::{Action, SelectionState};
use crate::worker::{Task, TaskEvent};

/// Message printed when the user quits without selecting.
pub const QUIT_MESSAGE: &str = "Exiting Go Package Search CLI.";

/// Events triggered by user input, terminal changes, or task completions.
#[derive(Debug)]
pub enum Event {
    /// Appends a printable character to the query.
    KeyTyped(char),
    /// Removes the last query character.
    KeyBackspace,
    /// Moves the selection up one row (wraps to bottom).
    KeyUp,
    /// Moves the selection down one row (wraps to top).
    KeyDown,
    /// Accepts the highlighted entry and copies it.
    KeyConfirm,
    /// Ends the run without selecting.
    KeyQuit,
    /// Sets the number of visible rows.
    ViewportResized(usize),
    /// Completion of a background task.
    Task(TaskEvent),
}

/// Applies `event` to `state` and returns the next state and the actions to run.
///
/// Actions are returned in execution order. An [`Action::Exit`] is always the
/// last action of the transition that emits it.
///
/// # Example
///
/// ```rust
/// use gopkg_search::app::{transition, Action, Event, SelectionState};
///
/// let (state, actions) = transition(SelectionState::new(20), Event::KeyQuit);
/// assert_eq!(actions, vec![Action::Exit { code: 0 }]);
/// assert_eq!(state.final_message.as_deref(), Some("Exiting Go Package Search CLI."));
/// ```
#[must_use]
pub fn transition(mut state: SelectionState, event: Event) -> (SelectionState, Vec<Action>) {
    let _span = tracing::debug_span!("transition", phase = ?state.phase, event = ?event).entered();

    let actions = match (state.phase, event) {
        (_, Event::ViewportResized(size)) => {
            state.resize_viewport(size);
            vec![]
        }

        (Phase::Loading, Event::Task(TaskEvent::LoadCompleted { entries })) => {
            tracing::debug!(entry_count = entries.len(), "entries loaded");
            state.load(entries);
            vec![]
        }
        (Phase::Loading, Event::Task(TaskEvent::LoadFailed { error })) => {
            tracing::debug!(error = %error, "load failed");
            state.phase = Phase::Failed;
            state.failed = true;
            state.final_message = Some(format!("Error: {error}"));
            vec![Action::Exit { code: 1 }]
        }

        (Phase::Loading | Phase::Ready, Event::KeyQuit) => {
            tracing::debug!("quit requested");
            state.phase = Phase::Quitting;
            state.final_message = Some(QUIT_MESSAGE.to_string());
            vec![Action::Exit { code: 0 }]
        }

        (Phase::Ready, Event::KeyTyped(c)) => {
            state.push_query_char(c);
            vec![]
        }
        (Phase::Ready, Event::KeyBackspace) => {
            state.pop_query_char();
            vec![]
        }
        (Phase::Ready, Event::KeyUp) => {
            state.move_selection_up();
            vec![]
        }
        (Phase::Ready, Event::KeyDown) => {
            state.move_selection_down();
            vec![]
        }
        (Phase::Ready, Event::KeyConfirm) => match state.selected_entry() {
            Some(entry) => {
                let text = entry.id.clone();
                tracing::debug!(selection = %text, "selection confirmed");
                state.phase = Phase::Quitting;
                state.pending_copy = Some(text.clone());
                vec![Action::Spawn(Task::Copy { text })]
            }
            None => {
                tracing::debug!("confirm with nothing selected");
                vec![]
            }
        },

        (Phase::Quitting, Event::Task(TaskEvent::CopyCompleted { text })) if state.pending_copy.is_some() => {
            let id = state.pending_copy.take().unwrap_or(text);
            tracing::debug!(selection = %id, "copy completed");
            state.final_message = Some(format!("'{id}' copied to clipboard!"));
            vec![Action::Exit { code: 0 }]
        }
        (Phase::Quitting, Event::Task(TaskEvent::CopyFailed { error })) if state.pending_copy.is_some() => {
            tracing::debug!(error = %error, "copy failed");
            state.pending_copy = None;
            state.failed = true;
            state.final_message = Some(format!("Error: {error}"));
            vec![Action::Exit { code: 1 }]
        }

        (phase, event) => {
            tracing::trace!(?phase, ?event, "event ignored in current phase");
            vec![]
        }
    };

    (state, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::assert_invariants;
    use crate::domain::{Entry, GopkgError};

    fn loaded(ids: &[&str]) -> SelectionState {
        let entries = ids.iter().map(|id| Entry::new(*id)).collect();
        let (state, actions) = transition(
            SelectionState::new(20),
            Event::Task(TaskEvent::LoadCompleted { entries }),
        );
        assert!(actions.is_empty());
        state
    }

    fn feed(mut state: SelectionState, events: Vec<Event>) -> (SelectionState, Vec<Action>) {
        let mut all = Vec::new();
        for event in events {
            let (next, actions) = transition(state, event);
            assert_invariants(&next);
            state = next;
            all.extend(actions);
        }
        (state, all)
    }

    fn typed(text: &str) -> Vec<Event> {
        text.chars().map(Event::KeyTyped).collect()
    }

    fn selected_id(state: &SelectionState) -> Option<&str> {
        state.selected_entry().map(|e| e.id.as_str())
    }

    const CORPUS: [&str; 3] = ["foo/bar", "foo/baz", "qux"];

    #[test]
    fn load_completes_into_ready() {
        let state = loaded(&CORPUS);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.matches.len(), 3);
        assert_eq!(selected_id(&state), Some("foo/bar"));
    }

    #[test]
    fn down_then_confirm_copies_second_entry() {
        let (state, actions) = feed(loaded(&CORPUS), vec![Event::KeyDown, Event::KeyConfirm]);
        assert_eq!(
            actions,
            vec![Action::Spawn(Task::Copy { text: "foo/baz".to_string() })]
        );
        assert_eq!(state.phase, Phase::Quitting);
        assert_eq!(state.pending_copy.as_deref(), Some("foo/baz"));
        assert!(state.final_message.is_none());
    }

    #[test]
    fn exit_waits_for_copy_completion() {
        let (state, actions) = feed(loaded(&CORPUS), typed("fbr"));
        assert!(actions.is_empty());
        assert_eq!(selected_id(&state), Some("foo/bar"));

        let (state, actions) = transition(state, Event::KeyConfirm);
        assert_eq!(actions, vec![Action::Spawn(Task::Copy { text: "foo/bar".to_string() })]);

        let (state, actions) = transition(
            state,
            Event::Task(TaskEvent::CopyCompleted { text: "foo/bar".to_string() }),
        );
        assert_eq!(actions, vec![Action::Exit { code: 0 }]);
        assert_eq!(state.final_message.as_deref(), Some("'foo/bar' copied to clipboard!"));
        assert!(state.pending_copy.is_none());
        assert!(!state.failed);
    }

    #[test]
    fn copy_failure_exits_nonzero_with_cause() {
        let (state, _) = feed(loaded(&CORPUS), vec![Event::KeyConfirm]);
        let error = GopkgError::SinkUnavailable {
            command: "xclip".to_string(),
            stderr: String::new(),
        };
        let (state, actions) = transition(state, Event::Task(TaskEvent::CopyFailed { error }));
        assert_eq!(actions, vec![Action::Exit { code: 1 }]);
        assert_eq!(state.phase, Phase::Quitting);
        assert!(state.failed);
        let message = state.final_message.unwrap_or_default();
        assert!(message.starts_with("Error: clipboard command 'xclip' not found"), "{message}");
    }

    #[test]
    fn query_with_no_match_then_confirm_does_nothing() {
        let (state, actions) = feed(loaded(&CORPUS), typed("zzz"));
        assert!(actions.is_empty());
        assert!(state.matches.is_empty());
        assert_eq!(state.selected, None);

        let (state, actions) = transition(state, Event::KeyConfirm);
        assert!(actions.is_empty());
        assert_eq!(state.phase, Phase::Ready);
    }

    #[test]
    fn backspace_widens_results() {
        let (state, _) = feed(loaded(&CORPUS), typed("fbr"));
        assert_eq!(state.matches.len(), 1);
        let (state, _) = feed(state, vec![Event::KeyBackspace]);
        assert_eq!(state.query, "fb");
        assert_eq!(state.matches.len(), 2);
        let (state, _) = feed(state, vec![Event::KeyBackspace, Event::KeyBackspace, Event::KeyBackspace]);
        assert_eq!(state.query, "");
        assert_eq!(state.matches.len(), 3);
    }

    #[test]
    fn quit_while_loading_exits_cleanly() {
        let (state, actions) = transition(SelectionState::new(20), Event::KeyQuit);
        assert_eq!(actions, vec![Action::Exit { code: 0 }]);
        assert_eq!(state.phase, Phase::Quitting);
        assert_eq!(state.final_message.as_deref(), Some(QUIT_MESSAGE));
    }

    #[test]
    fn late_load_after_quit_is_discarded() {
        let (state, _) = transition(SelectionState::new(20), Event::KeyQuit);
        let (state, actions) = transition(
            state,
            Event::Task(TaskEvent::LoadCompleted { entries: vec![Entry::new("foo/bar")] }),
        );
        assert!(actions.is_empty());
        assert!(state.store().is_none());
        assert_eq!(state.phase, Phase::Quitting);
    }

    #[test]
    fn load_failure_ends_run() {
        let error = GopkgError::Transport("received non-OK status from Go index: 503 Service Unavailable".to_string());
        let (state, actions) = transition(SelectionState::new(20), Event::Task(TaskEvent::LoadFailed { error }));
        assert_eq!(actions, vec![Action::Exit { code: 1 }]);
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(
            state.final_message.as_deref(),
            Some("Error: received non-OK status from Go index: 503 Service Unavailable")
        );
    }

    #[test]
    fn keys_while_loading_are_ignored() {
        let (state, actions) = feed(
            SelectionState::new(20),
            vec![Event::KeyTyped('a'), Event::KeyDown, Event::KeyConfirm, Event::KeyBackspace],
        );
        assert!(actions.is_empty());
        assert_eq!(state.phase, Phase::Loading);
        assert!(state.query.is_empty());
    }

    #[test]
    fn input_after_confirm_is_ignored() {
        let (state, _) = feed(loaded(&CORPUS), vec![Event::KeyConfirm]);
        let (state, actions) = feed(
            state,
            vec![Event::KeyTyped('x'), Event::KeyDown, Event::KeyConfirm, Event::KeyQuit],
        );
        assert!(actions.is_empty());
        assert!(state.query.is_empty());
        assert_eq!(state.pending_copy.as_deref(), Some("foo/bar"));
    }

    #[test]
    fn stray_copy_completion_without_pending_copy_is_ignored() {
        let (state, _) = transition(SelectionState::new(20), Event::KeyQuit);
        let (state, actions) = transition(
            state,
            Event::Task(TaskEvent::CopyCompleted { text: "foo/bar".to_string() }),
        );
        assert!(actions.is_empty());
        assert_eq!(state.final_message.as_deref(), Some(QUIT_MESSAGE));
    }

    #[test]
    fn resize_is_honored_in_every_phase() {
        let (state, _) = transition(SelectionState::new(20), Event::ViewportResized(7));
        assert_eq!(state.viewport_size, 7);
        let (state, _) = transition(state, Event::KeyQuit);
        let (state, actions) = transition(state, Event::ViewportResized(3));
        assert!(actions.is_empty());
        assert_eq!(state.viewport_size, 3);
    }

    #[test]
    fn repeated_resize_changes_nothing() {
        let (state, _) = feed(loaded(&CORPUS), vec![Event::ViewportResized(2), Event::KeyUp]);
        let (again, actions) = transition(state.clone(), Event::ViewportResized(2));
        assert!(actions.is_empty());
        assert_eq!(again.viewport_size, state.viewport_size);
        assert_eq!(again.viewport_offset, state.viewport_offset);
        assert_eq!(again.selected, state.selected);
    }

    #[test]
    fn long_navigation_then_filter_keeps_invariants() {
        let ids: Vec<String> = (0..40).map(|i| format!("example.com/mod{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut events = vec![Event::ViewportResized(5)];
        events.extend((0..25).map(|_| Event::KeyDown));
        events.extend(typed("mod3"));
        events.push(Event::KeyUp);
        let (state, _) = feed(loaded(&refs), events);
        assert!(state.matches.len() >= 11);
        assert!(state.selected.is_some());
    }
}
