//! Single-line status messages: loading, copying and the final message.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FinalMessage, LoadingInfo};

/// Renders the loading notice naming the index being fetched.
#[must_use]
pub fn render_loading(loading: &LoadingInfo, theme: &Theme) -> String {
    paint(
        &format!(" Loading Go packages from {}... Please wait. ", loading.source),
        &theme.colors.status_fg,
    )
}

/// Renders the notice shown while the copy task runs.
#[must_use]
pub fn render_copying(text: &str, theme: &Theme) -> String {
    paint(&format!(" Copying '{text}' to clipboard... "), &theme.colors.status_fg)
}

/// Renders the message printed once the run ends.
///
/// Failures use the error color; anything else is bold in the success color.
///
/// # Example
///
/// ```rust
/// use gopkg_search::ui::components::render_final_message;
/// use gopkg_search::ui::{FinalMessage, Theme};
///
/// let done = FinalMessage { message: "Exiting Go Package Search CLI.".to_string(), failed: false };
/// assert_eq!(render_final_message(&done, &Theme::plain()), " Exiting Go Package Search CLI. ");
/// ```
#[must_use]
pub fn render_final_message(message: &FinalMessage, theme: &Theme) -> String {
    let text = format!(" {} ", message.message);
    if message.failed {
        return paint(&text, &theme.colors.error_fg);
    }

    let color = Theme::fg(&theme.colors.success_fg);
    if color.is_empty() {
        return text;
    }
    format!("{}{color}{text}{}", Theme::bold(), Theme::reset())
}
