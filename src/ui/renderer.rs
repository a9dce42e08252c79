//! Top-level rendering coordinator.
//!
//! Rendering is a pure projection in two steps:
//!
//! 1. **View model computation**: [`SelectionState`] into [`UIViewModel`]
//! 2. **Component rendering**: view model into styled lines
//!
//! The returned lines are a full frame; the screen replaces whatever it showed
//! before with them.
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::app::SelectionState;
//! use gopkg_search::ui::{render, Theme};
//!
//! let state = SelectionState::new(20);
//! let frame = render(&state, &Theme::plain(), "index.golang.org/index");
//! assert_eq!(frame, vec![" Loading Go packages from index.golang.org/index... Please wait. "]);
//! ```

use chrono::Utc;

use crate::app::SelectionState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders `state` into a frame of styled lines.
///
/// `source` names the index in the loading frame.
#[must_use]
pub fn render(state: &SelectionState, theme: &Theme, source: &str) -> Vec<String> {
    let viewmodel = UIViewModel::compute(state, source, Utc::now());

    render_viewmodel(&viewmodel, theme)
}

/// Renders a view model with the layout matching its kind.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme) -> Vec<String> {
    match vm {
        UIViewModel::Loading(loading) => vec![components::render_loading(loading, theme)],
        UIViewModel::Browsing(info) => components::render_browse(info, theme),
        UIViewModel::Copying { text } => vec![components::render_copying(text, theme)],
        UIViewModel::Finished(message) => vec![components::render_final_message(message, theme)],
    }
}
