//! Unicode-aware width and truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to `max_width` cells, ending with `…` when cut.
///
/// Newlines are flattened to spaces so previews stay on one row.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let flat: String = s.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
    if visual_width(&flat) <= max_width {
        return flat;
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Pad or truncate to exactly `width` cells.
pub fn fit_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let pad = width.saturating_sub(visual_width(&out));
    out.extend(std::iter::repeat(' ').take(pad));
    out
}
