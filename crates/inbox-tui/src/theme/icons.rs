//! Icon sets for Unicode and ASCII fallback.

use inbox_engine::{IconStyle, Presence};

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback, also used with `NO_COLOR`.
    Ascii,
}

impl From<IconStyle> for IconMode {
    fn from(style: IconStyle) -> Self {
        match style.resolve() {
            IconStyle::Unicode => Self::Unicode,
            IconStyle::Ascii => Self::Ascii,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone)]
pub struct IconSet {
    mode: IconMode,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(IconMode::default())
    }
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IconMode {
        self.mode
    }

    /// Unread conversation / unseen mention marker.
    pub fn unread(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "●",
            IconMode::Ascii => "*",
        }
    }

    pub fn presence(&self, status: Presence) -> &'static str {
        match (self.mode, status) {
            (IconMode::Unicode, Presence::Online) => "●",
            (IconMode::Unicode, Presence::Away) => "◐",
            (IconMode::Unicode, Presence::Offline) => "○",
            (IconMode::Ascii, Presence::Online) => "+",
            (IconMode::Ascii, Presence::Away) => "~",
            (IconMode::Ascii, Presence::Offline) => "-",
        }
    }

    pub fn collapsed(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▸",
            IconMode::Ascii => ">",
        }
    }

    pub fn expanded(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▾",
            IconMode::Ascii => "v",
        }
    }

    /// Block drawn after text that is still being revealed.
    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▍",
            IconMode::Ascii => "_",
        }
    }

    pub fn assistant(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "✦",
            IconMode::Ascii => "AI",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "│",
            IconMode::Ascii => "|",
        }
    }

    pub fn selected(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "▌",
            IconMode::Ascii => ">",
        }
    }
}
