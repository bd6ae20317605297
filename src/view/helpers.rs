//! Small text helpers shared by the renderers.

use ratatui::text::Line;
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// A blank line.
pub fn empty_line() -> Line<'static> {
    Line::from("")
}

/// Cut `text` to at most `max_width` terminal columns, ending in `…` if cut.
///
/// Wide characters are never split: if the next one does not fit it is dropped
/// together with everything after it.
pub fn truncate_to_width(text: &str, max_width: usize) -> Cow<'_, str> {
    if text.width() <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(max_width);
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}
