//! Search prompt component.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Renders the search prompt as `Search: <query>|`, with the cursor bar in the
/// input color.
///
/// # Example
///
/// ```rust
/// use gopkg_search::ui::components::render_search_bar;
/// use gopkg_search::ui::{SearchBarInfo, Theme};
///
/// let search = SearchBarInfo { query: "gorilla".to_string() };
/// assert_eq!(render_search_bar(&search, &Theme::plain()), "Search: gorilla|");
/// ```
#[must_use]
pub fn render_search_bar(search: &SearchBarInfo, theme: &Theme) -> String {
    format!("Search: {}{}", search.query, paint("|", &theme.colors.input_fg))
}
