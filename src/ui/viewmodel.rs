//! View model types representing renderable UI state.
//!
//! View models are computed from [`SelectionState`] and consumed by the
//! component renderers. They hold display-ready data only: visible rows,
//! highlight ranges, counts and message text. All of it derives from the state
//! plus the index source name and the current time.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use gopkg_search::app::SelectionState;
//! use gopkg_search::ui::UIViewModel;
//!
//! let state = SelectionState::new(20);
//! let vm = UIViewModel::compute(&state, "index.golang.org/index", Utc::now());
//! assert!(matches!(vm, UIViewModel::Loading(_)));
//! ```

use chrono::{DateTime, Utc};

use crate::app::{Phase, SelectionState};
use crate::search::coalesce_positions;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UIViewModel {
    /// The index is still being fetched.
    Loading(LoadingInfo),

    /// Entries are loaded; query, rows and status line.
    Browsing(BrowseInfo),

    /// The selection was confirmed and the copy is in flight.
    Copying {
        /// Id being copied.
        text: String,
    },

    /// The run has ended.
    Finished(FinalMessage),
}

/// Loading frame contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingInfo {
    /// Human-readable name of the index being fetched.
    pub source: String,
}

/// Browsing frame contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseInfo {
    /// Search prompt.
    pub search_bar: SearchBarInfo,
    /// Visible rows, top to bottom.
    pub display_items: Vec<DisplayItem>,
    /// Shown instead of rows when nothing matches.
    pub empty_state: Option<EmptyState>,
    /// Status line.
    pub footer: FooterInfo,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Entry id (package path).
    pub id: String,

    /// Version label, if the index had one.
    pub label: Option<String>,

    /// Relative age such as `3h ago`.
    pub age: Option<String>,

    /// Whether this row holds the selection.
    pub is_selected: bool,

    /// Character ranges to highlight, `(start, end)` with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Search prompt display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,
}

/// Status line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Number of entries matching the query.
    pub matched: usize,
    /// Number of loaded entries.
    pub total: usize,
}

impl FooterInfo {
    /// Status text with counts and key hints.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "Found {} packages (filtered from {}). Use ↑↓ to navigate, Enter to copy path and quit, Q or Ctrl+C to quit.",
            self.matched, self.total
        )
    }
}

/// Empty result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Message text.
    pub message: String,
}

/// Message printed when the run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalMessage {
    /// Message text.
    pub message: String,
    /// Whether the run ended with a failure.
    pub failed: bool,
}

impl UIViewModel {
    /// Projects `state` into a view model.
    ///
    /// `source` names the index in the loading frame; `now` anchors the
    /// relative ages.
    #[must_use]
    pub fn compute(state: &SelectionState, source: &str, now: DateTime<Utc>) -> Self {
        if let Some(message) = &state.final_message {
            return Self::Finished(FinalMessage {
                message: message.clone(),
                failed: state.failed,
            });
        }

        match (state.phase, &state.pending_copy) {
            (Phase::Loading, _) => Self::Loading(LoadingInfo {
                source: source.to_string(),
            }),
            (Phase::Quitting, Some(text)) => Self::Copying { text: text.clone() },
            _ => Self::Browsing(Self::browse_info(state, now)),
        }
    }

    fn browse_info(state: &SelectionState, now: DateTime<Utc>) -> BrowseInfo {
        let display_items: Vec<DisplayItem> = state
            .visible_range()
            .filter_map(|index| {
                let m = &state.matches[index];
                let entry = state.entry_for(m)?;
                Some(DisplayItem {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                    age: entry.age(now),
                    is_selected: state.selected == Some(index),
                    highlight_ranges: coalesce_positions(&m.matched_positions),
                })
            })
            .collect();

        let empty_state = state.matches.is_empty().then(|| EmptyState {
            message: if state.query.is_empty() {
                "No packages loaded.".to_string()
            } else {
                "No packages found matching your query.".to_string()
            },
        });

        BrowseInfo {
            search_bar: SearchBarInfo {
                query: state.query.clone(),
            },
            display_items,
            empty_state,
            footer: FooterInfo {
                matched: state.matches.len(),
                total: state.total_entries(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{transition, Event};
    use crate::domain::Entry;
    use crate::worker::TaskEvent;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn loaded(entries: Vec<Entry>, viewport: usize) -> SelectionState {
        let (state, _) = transition(
            SelectionState::new(viewport),
            Event::Task(TaskEvent::LoadCompleted { entries }),
        );
        state
    }

    fn browse(state: &SelectionState) -> BrowseInfo {
        match UIViewModel::compute(state, "index.golang.org/index", now()) {
            UIViewModel::Browsing(info) => info,
            other => panic!("expected browsing frame, got {other:?}"),
        }
    }

    #[test]
    fn loading_frame_names_source() {
        let vm = UIViewModel::compute(&SelectionState::new(5), "index.golang.org/index", now());
        assert_eq!(
            vm,
            UIViewModel::Loading(LoadingInfo {
                source: "index.golang.org/index".to_string()
            })
        );
    }

    #[test]
    fn rows_carry_label_age_and_highlights() {
        let entries = vec![
            Entry::new("foo/bar")
                .with_label("v1.2.0")
                .with_observed_at(now() - Duration::hours(3)),
            Entry::new("qux"),
        ];
        let mut state = loaded(entries, 5);
        state.push_query_char('b');
        state.push_query_char('a');

        let info = browse(&state);
        assert_eq!(info.display_items.len(), 1);
        let row = &info.display_items[0];
        assert_eq!(row.id, "foo/bar");
        assert_eq!(row.label.as_deref(), Some("v1.2.0"));
        assert_eq!(row.age.as_deref(), Some("3h ago"));
        assert!(row.is_selected);
        assert_eq!(row.highlight_ranges, vec![(4, 6)]);
        assert_eq!(info.footer, FooterInfo { matched: 1, total: 2 });
        assert!(info.empty_state.is_none());
    }

    #[test]
    fn only_viewport_rows_are_projected() {
        let entries = (0..10).map(|i| Entry::new(format!("pkg/{i}"))).collect();
        let mut state = loaded(entries, 3);
        for _ in 0..4 {
            state.move_selection_down();
        }
        let info = browse(&state);
        let ids: Vec<&str> = info.display_items.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["pkg/2", "pkg/3", "pkg/4"]);
        assert!(info.display_items[2].is_selected);
    }

    #[test]
    fn empty_messages_depend_on_query() {
        let state = loaded(vec![], 5);
        assert_eq!(browse(&state).empty_state.unwrap().message, "No packages loaded.");

        let mut state = loaded(vec![Entry::new("foo")], 5);
        state.push_query_char('z');
        assert_eq!(
            browse(&state).empty_state.unwrap().message,
            "No packages found matching your query."
        );
    }

    #[test]
    fn copying_then_finished() {
        let state = loaded(vec![Entry::new("foo/bar")], 5);
        let (state, _) = transition(state, Event::KeyConfirm);
        assert_eq!(
            UIViewModel::compute(&state, "", now()),
            UIViewModel::Copying { text: "foo/bar".to_string() }
        );

        let (state, _) = transition(
            state,
            Event::Task(TaskEvent::CopyCompleted { text: "foo/bar".to_string() }),
        );
        assert_eq!(
            UIViewModel::compute(&state, "", now()),
            UIViewModel::Finished(FinalMessage {
                message: "'foo/bar' copied to clipboard!".to_string(),
                failed: false,
            })
        );
    }

    #[test]
    fn footer_text_lists_counts() {
        let footer = FooterInfo { matched: 2, total: 3 };
        assert!(footer.text().starts_with("Found 2 packages (filtered from 3)."));
    }
}
