//! Empty state component.
//!
//! Shown in place of the rows when the current query matches nothing, or when
//! the index returned no entries at all.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message.
#[must_use]
pub fn render_empty_state(empty: &EmptyState, theme: &Theme) -> String {
    paint(&empty.message, &theme.colors.empty_state_fg)
}
