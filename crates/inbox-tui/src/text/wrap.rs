//! Text wrapping into ratatui lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Wrap plain text to `width` columns. Explicit newlines are kept.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    text.split('\n')
        .flat_map(|para| {
            let wrapped = textwrap::wrap(para, width);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

/// Wrap text into styled lines, each prefixed with `indent`.
pub fn wrap_styled(text: &str, width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    let avail = width.saturating_sub(indent.chars().count()).max(1);
    wrap_text(text, avail)
        .into_iter()
        .map(|l| {
            Line::from(vec![
                Span::raw(indent.to_string()),
                Span::styled(l, style),
            ])
        })
        .collect()
}

/// Like [`wrap_styled`], with a trailing marker span (e.g. a cursor block)
/// appended to the final line.
pub fn wrap_with_marker(
    text: &str,
    width: usize,
    indent: &str,
    style: Style,
    marker: Span<'static>,
) -> Vec<Line<'static>> {
    let mut lines = wrap_styled(text, width.saturating_sub(marker.width()), indent, style);
    match lines.last_mut() {
        Some(last) => last.spans.push(marker),
        None => lines.push(Line::from(vec![Span::raw(indent.to_string()), marker])),
    }
    lines
}
