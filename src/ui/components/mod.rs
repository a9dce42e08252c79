//! Composable UI component renderers.
//!
//! Each component turns one part of a view model into styled text lines. None
//! of them write to the terminal; the renderer assembles their output into a
//! frame and the screen draws it.
//!
//! # Components
//!
//! - [`search`]: search prompt
//! - [`table`]: visible result rows
//! - [`footer`]: status line with counts and key hints
//! - [`empty`]: message for an empty result list
//! - [`message`]: loading, copying and final messages
//!
//! # Layout
//!
//! ```text
//! Search: <query>|
//!
//!   <row>
//!   <row>
//!   ...
//!
//!  Found N packages (filtered from M). ...
//! ```

mod empty;
mod footer;
mod message;
mod search;
mod table;

pub use empty::render_empty_state;
pub use footer::render_footer;
pub use message::{render_copying, render_final_message, render_loading};
pub use search::render_search_bar;
pub use table::render_table_rows;

use crate::ui::theme::Theme;
use crate::ui::viewmodel::BrowseInfo;

/// Number of lines the browsing layout uses besides the rows.
pub const BROWSE_CHROME_LINES: usize = 4;

/// Renders the browsing layout: prompt, rows (or empty state), status line.
#[must_use]
pub fn render_browse(info: &BrowseInfo, theme: &Theme) -> Vec<String> {
    let mut lines = Vec::with_capacity(info.display_items.len() + BROWSE_CHROME_LINES);

    lines.push(render_search_bar(&info.search_bar, theme));
    lines.push(String::new());

    match &info.empty_state {
        Some(empty) => lines.push(render_empty_state(empty, theme)),
        None => lines.extend(render_table_rows(&info.display_items, theme)),
    }

    lines.push(String::new());
    lines.push(render_footer(&info.footer, theme));
    lines
}
