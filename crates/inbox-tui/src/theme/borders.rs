//! Border sets for Unicode and ASCII fallback.

use ratatui::symbols::border;

use super::icons::IconMode;

/// Plain ASCII borders.
pub const ASCII: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// ASCII borders for the focused pane.
pub const ASCII_FOCUSED: border::Set = border::Set {
    horizontal_top: "=",
    horizontal_bottom: "=",
    ..ASCII
};

/// Border set based on icon mode.
#[derive(Debug, Clone)]
pub struct BorderSet {
    mode: IconMode,
}

impl Default for BorderSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl BorderSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Normal (unfocused) borders: rounded for Unicode, `+-|` for ASCII.
    pub fn normal(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::ROUNDED,
            IconMode::Ascii => ASCII,
        }
    }

    /// Focused borders: thick for Unicode, `=` rules for ASCII.
    pub fn focused(&self) -> border::Set {
        match self.mode {
            IconMode::Unicode => border::THICK,
            IconMode::Ascii => ASCII_FOCUSED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unicode() {
        assert_eq!(BorderSet::default().mode(), IconMode::Unicode);
    }

    #[test]
    fn test_unicode_borders() {
        let borders = BorderSet::new(IconMode::Unicode);
        assert_eq!(borders.normal().top_left, "╭");
        assert_eq!(borders.focused().top_left, "┏");
    }

    #[test]
    fn test_ascii_borders() {
        let borders = BorderSet::new(IconMode::Ascii);
        assert_eq!(borders.normal().top_left, "+");
        assert_eq!(borders.normal().vertical_left, "|");
        assert_eq!(borders.normal().horizontal_top, "-");
        assert_eq!(borders.focused().horizontal_top, "=");
        assert_eq!(borders.focused().vertical_right, "|");
    }

    #[test]
    fn test_ascii_borders_render_without_box_drawing() {
        use ratatui::{
            buffer::Buffer,
            layout::Rect,
            widgets::{Block, Borders, Widget},
        };

        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        Block::default()
            .borders(Borders::ALL)
            .border_set(BorderSet::new(IconMode::Ascii).focused())
            .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert_eq!(text, "+====+|    |+====+");
    }
}
