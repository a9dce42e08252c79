//! Selection state and its bookkeeping operations.
//!
//! [`SelectionState`] is the single source of truth for the interactive session:
//! the query, the ranked matches, the selected row, the scroll window and the
//! lifecycle [`Phase`]. It separates core data (the entry store) from derived
//! data (matches, selection, viewport) so that every derived field can be
//! recomputed from the core after any change.
//!
//! # Invariants
//!
//! After every public method returns:
//!
//! - `selected` is `Some(i)` with `i < matches.len()` iff `matches` is non-empty
//! - `viewport_offset <= max(0, matches.len() - 1)`
//! - `viewport_offset <= i < viewport_offset + viewport_size` for `selected == Some(i)`
//! - `viewport_size >= 1`
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::app::SelectionState;
//! use gopkg_search::Entry;
//!
//! let mut state = SelectionState::new(20);
//! state.load(vec![Entry::new("foo/bar"), Entry::new("qux")]);
//! state.push_query_char('q');
//! assert_eq!(state.selected_entry().map(|e| e.id.as_str()), Some("qux"));
//! ```

use super::modes::Phase;
use crate::domain::{Entry, EntryStore};
use crate::search::{match_entries, Match};

/// Central state of the selection engine.
///
/// Fields are public for reading by the renderer and tests; mutation goes
/// through the methods below so the invariants hold.
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Loaded entries, `None` until the load completes.
    store: Option<EntryStore>,

    /// Current query text.
    pub query: String,

    /// Matches for `query`, best first (or store order for the empty query).
    pub matches: Vec<Match>,

    /// Index into `matches` of the highlighted row.
    pub selected: Option<usize>,

    /// Index into `matches` of the first visible row.
    pub viewport_offset: usize,

    /// Number of rows the viewport can show, at least 1.
    pub viewport_size: usize,

    /// Lifecycle phase.
    pub phase: Phase,

    /// Id handed to the copy task, set while waiting for its completion.
    pub pending_copy: Option<String>,

    /// Message shown once the run ends.
    pub final_message: Option<String>,

    /// Whether the run ended because something failed.
    pub failed: bool,
}

impl SelectionState {
    /// Creates the start-of-run state in the `Loading` phase.
    #[must_use]
    pub fn new(viewport_size: usize) -> Self {
        Self {
            store: None,
            query: String::new(),
            matches: Vec::new(),
            selected: None,
            viewport_offset: 0,
            viewport_size: viewport_size.max(1),
            phase: Phase::Loading,
            pending_copy: None,
            final_message: None,
            failed: false,
        }
    }

    /// Returns the entry store once the load has completed.
    #[must_use]
    pub const fn store(&self) -> Option<&EntryStore> {
        self.store.as_ref()
    }

    /// Total number of loaded entries, 0 before the load completes.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.store.as_ref().map_or(0, EntryStore::len)
    }

    /// Installs the loaded entries and switches to `Ready`.
    ///
    /// Does nothing once a store is present: the store is written exactly once.
    pub fn load(&mut self, entries: Vec<Entry>) {
        if self.store.is_some() {
            tracing::debug!("entry store already populated, ignoring load");
            return;
        }

        self.store = Some(EntryStore::new(entries));
        self.phase = Phase::Ready;
        self.apply_search_filter();
    }

    /// Returns the entry behind a match.
    #[must_use]
    pub fn entry_for(&self, m: &Match) -> Option<&Entry> {
        self.store.as_ref()?.get(m.entry_index)
    }

    /// Returns the currently selected entry, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&Entry> {
        let m = self.matches.get(self.selected?)?;
        self.entry_for(m)
    }

    /// Appends a character to the query and re-filters.
    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        tracing::trace!(query = %self.query, char = %c, "search query updated");
        self.apply_search_filter();
    }

    /// Removes the last query character and re-filters.
    ///
    /// Returns `false` when the query was already empty.
    pub fn pop_query_char(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.apply_search_filter();
        true
    }

    /// Moves the selection down one row, wrapping from the last row to the first.
    ///
    /// No-op when there are no matches.
    pub fn move_selection_down(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % self.matches.len());
        self.selected = Some(next);
        self.clamp_viewport();
    }

    /// Moves the selection up one row, wrapping from the first row to the last.
    ///
    /// No-op when there are no matches.
    pub fn move_selection_up(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        let next = match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        };
        self.selected = Some(next);
        self.clamp_viewport();
    }

    /// Sets the viewport height (minimum 1) and re-clamps the window.
    pub fn resize_viewport(&mut self, size: usize) {
        self.viewport_size = size.max(1);
        self.clamp_viewport();
    }

    /// Recomputes `matches` from the query and the store, then re-clamps.
    ///
    /// # Selection Reset
    ///
    /// The previous selection index is kept when it is still in bounds.
    /// Otherwise the selection moves to the first row, or to `None` when
    /// nothing matches.
    pub fn apply_search_filter(&mut self) {
        let Some(store) = self.store.as_ref() else {
            self.matches.clear();
            self.selected = None;
            self.viewport_offset = 0;
            return;
        };

        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_entries = store.len(),
            query_len = self.query.len()
        )
        .entered();

        self.matches = match_entries(&self.query, store.ids());

        self.selected = match self.selected {
            _ if self.matches.is_empty() => None,
            Some(i) if i < self.matches.len() => Some(i),
            _ => Some(0),
        };
        self.clamp_viewport();

        tracing::debug!(filtered_count = self.matches.len(), "search filter applied");
    }

    /// Shifts the viewport by the minimum amount that keeps the selection visible.
    fn clamp_viewport(&mut self) {
        let Some(selected) = self.selected else {
            self.viewport_offset = 0;
            return;
        };

        if selected < self.viewport_offset {
            self.viewport_offset = selected;
        } else if selected >= self.viewport_offset + self.viewport_size {
            self.viewport_offset = selected + 1 - self.viewport_size;
        }
    }

    /// Range of `matches` indices currently visible.
    #[must_use]
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let start = self.viewport_offset.min(self.matches.len());
        let end = (self.viewport_offset + self.viewport_size).min(self.matches.len());
        start..end
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn assert_invariants(state: &SelectionState) {
        assert!(state.viewport_size >= 1);
        match state.selected {
            None => {
                assert!(state.matches.is_empty(), "selection missing with matches present");
                assert_eq!(state.viewport_offset, 0);
            }
            Some(i) => {
                assert!(i < state.matches.len(), "selection {i} out of bounds");
                assert!(state.viewport_offset <= i);
                assert!(i < state.viewport_offset + state.viewport_size);
                assert!(state.viewport_offset <= state.matches.len() - 1);
            }
        }
    }

    fn ready(ids: &[&str], viewport: usize) -> SelectionState {
        let mut state = SelectionState::new(viewport);
        state.load(ids.iter().map(|id| Entry::new(*id)).collect());
        state
    }

    fn numbered(n: usize, viewport: usize) -> SelectionState {
        let ids: Vec<String> = (0..n).map(|i| format!("pkg/{i:03}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        ready(&refs, viewport)
    }

    #[test]
    fn load_selects_first_entry_in_store_order() {
        let state = ready(&["foo/bar", "foo/baz", "qux"], 5);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.selected, Some(0));
        let order: Vec<usize> = state.matches.iter().map(|m| m.entry_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_invariants(&state);
    }

    #[test]
    fn load_is_write_once() {
        let mut state = ready(&["a"], 5);
        state.load(vec![Entry::new("b"), Entry::new("c")]);
        assert_eq!(state.total_entries(), 1);
    }

    #[test]
    fn empty_load_has_no_selection() {
        let state = ready(&[], 5);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.selected, None);
        assert_invariants(&state);
    }

    #[test]
    fn wraparound_at_both_ends() {
        let mut state = numbered(4, 2);
        state.move_selection_up();
        assert_eq!(state.selected, Some(3));
        assert_eq!(state.viewport_offset, 2);
        state.move_selection_down();
        assert_eq!(state.selected, Some(0));
        assert_eq!(state.viewport_offset, 0);
        assert_invariants(&state);
    }

    #[test]
    fn navigation_on_empty_matches_is_noop() {
        let mut state = ready(&["foo"], 3);
        state.push_query_char('z');
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected, None);
        assert_invariants(&state);
    }

    #[test]
    fn viewport_scrolls_minimally() {
        let mut state = numbered(10, 3);
        for expected_offset in [0, 0, 1, 2] {
            state.move_selection_down();
            assert_eq!(state.viewport_offset, expected_offset);
        }
        assert_eq!(state.selected, Some(4));
        assert_eq!(state.viewport_offset, 2);

        state.move_selection_up();
        state.move_selection_up();
        assert_eq!(state.selected, Some(2));
        assert_eq!(state.viewport_offset, 2);

        state.move_selection_up();
        assert_eq!(state.selected, Some(1));
        assert_eq!(state.viewport_offset, 1);
        assert_invariants(&state);
    }

    #[test]
    fn filter_keeps_valid_selection_and_resets_invalid_one() {
        let mut state = ready(&["foo/bar", "foo/baz", "qux"], 5);
        state.move_selection_down();
        state.push_query_char('f');
        assert_eq!(state.selected, Some(1));

        state.move_selection_down();
        state.push_query_char('o');
        state.push_query_char('o');
        state.push_query_char('/');
        state.push_query_char('b');
        state.push_query_char('a');
        state.push_query_char('r');
        assert_eq!(state.matches.len(), 1);
        assert_eq!(state.selected, Some(0));
        assert_invariants(&state);
    }

    #[test]
    fn no_matches_clears_selection_and_recovers() {
        let mut state = ready(&["foo/bar", "foo/baz", "qux"], 5);
        for c in "zzz".chars() {
            state.push_query_char(c);
        }
        assert!(state.matches.is_empty());
        assert_eq!(state.selected, None);
        assert!(state.selected_entry().is_none());
        assert_invariants(&state);

        while state.pop_query_char() {}
        assert_eq!(state.matches.len(), 3);
        assert_eq!(state.selected, Some(0));
        assert_invariants(&state);
    }

    #[test]
    fn pop_on_empty_query_reports_false() {
        let mut state = ready(&["a"], 5);
        assert!(!state.pop_query_char());
    }

    #[test]
    fn resize_is_idempotent_and_keeps_selection_visible() {
        let mut state = numbered(50, 20);
        for _ in 0..30 {
            state.move_selection_down();
        }
        assert_eq!(state.selected, Some(30));
        assert_eq!(state.viewport_offset, 11);

        state.resize_viewport(5);
        assert_eq!(state.viewport_offset, 26);
        let snapshot = (state.selected, state.viewport_offset);
        state.resize_viewport(5);
        assert_eq!((state.selected, state.viewport_offset), snapshot);

        state.resize_viewport(0);
        assert_eq!(state.viewport_size, 1);
        assert_eq!(state.viewport_offset, 30);
        assert_invariants(&state);
    }

    #[test]
    fn visible_range_is_bounded_by_matches() {
        let mut state = numbered(3, 10);
        assert_eq!(state.visible_range(), 0..3);
        state.push_query_char('z');
        assert_eq!(state.visible_range(), 0..0);
    }
}
