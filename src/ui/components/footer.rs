//! Status line component.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the status line with match counts and key hints.
#[must_use]
pub fn render_footer(footer: &FooterInfo, theme: &Theme) -> String {
    paint(&format!(" {} ", footer.text()), &theme.colors.status_fg)
}
