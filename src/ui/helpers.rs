//! Shared rendering utilities.
//!
//! Fuzzy match highlighting works on character indices, not bytes, so module
//! paths with non-ASCII characters highlight the right glyphs.
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::ui::helpers::highlight_text;
//! use gopkg_search::ui::Theme;
//!
//! let theme = Theme::plain();
//! assert_eq!(highlight_text("foo/bar", &[(0, 1), (4, 5)], &theme, ""), "foo/bar");
//! ```

use crate::ui::theme::Theme;

/// Wraps `text` in a foreground color and a reset.
#[must_use]
pub fn paint(text: &str, hex: &str) -> String {
    let color = Theme::fg(hex);
    if color.is_empty() {
        return text.to_string();
    }
    format!("{color}{text}{}", Theme::reset())
}

/// Renders `text` with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices with an exclusive end, sorted
/// and non-overlapping. After each highlighted run the `restore` sequence is
/// emitted so the surrounding row style (normal or selected) continues.
#[must_use]
pub fn highlight_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let highlight = format!(
        "{}{}",
        Theme::fg(&theme.colors.match_highlight_fg),
        theme
            .colors
            .match_highlight_bg
            .as_deref()
            .map(Theme::bg)
            .unwrap_or_default()
    );

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 32);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);

        if highlight.is_empty() {
            out.extend(&chars[start..end]);
        } else {
            out.push_str(&highlight);
            out.extend(&chars[start..end]);
            out.push_str(&Theme::reset());
            out.push_str(restore);
        }

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
