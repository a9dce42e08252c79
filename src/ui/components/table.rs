//! Result list component.
//!
//! Each row shows the package path with fuzzy match highlights, followed by
//! the version label and relative age in the label color:
//!
//! ```text
//!   golang.org/x/text (v0.14.0, 3d ago)
//! ```
//!
//! The selected row switches to the selection colors in bold. Highlights stay
//! visible on it; after each highlighted run the row style is restored.

use crate::ui::helpers::{highlight_text, paint};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Left padding of every row.
const ROW_INDENT: &str = "  ";

/// Renders all visible rows, top to bottom.
#[must_use]
pub fn render_table_rows(items: &[DisplayItem], theme: &Theme) -> Vec<String> {
    items.iter().map(|item| render_table_row(item, theme)).collect()
}

fn row_style(item: &DisplayItem, theme: &Theme) -> String {
    if item.is_selected {
        let colors = format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        );
        // a colorless theme renders rows as plain text
        if colors.is_empty() {
            return colors;
        }
        format!("{}{colors}", Theme::bold())
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn suffix(item: &DisplayItem) -> Option<String> {
    match (&item.label, &item.age) {
        (Some(label), Some(age)) => Some(format!("({label}, {age})")),
        (Some(label), None) => Some(format!("({label})")),
        (None, Some(age)) => Some(format!("({age})")),
        (None, None) => None,
    }
}

fn render_table_row(item: &DisplayItem, theme: &Theme) -> String {
    let style = row_style(item, theme);
    let mut line = String::new();

    line.push_str(&style);
    line.push_str(ROW_INDENT);
    line.push_str(&highlight_text(&item.id, &item.highlight_ranges, theme, &style));

    if let Some(suffix) = suffix(item) {
        line.push(' ');
        if item.is_selected {
            line.push_str(&suffix);
        } else {
            line.push_str(&paint(&suffix, &theme.colors.label_fg));
        }
    }

    if !style.is_empty() {
        line.push_str(&Theme::reset());
    }
    line
}
