//! Layout modes and pane focus.
//!
//! - Wide: sidebar | mentions (optional) | thread | assistant (or rail)
//! - Narrow: one column at a time, chosen by focus

/// Width class of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Wide,
    Narrow,
}

impl LayoutMode {
    /// Classify a terminal width against the breakpoint.
    pub fn for_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPane {
    Sidebar,
    Mentions,
    /// The thread and its composer.
    #[default]
    Thread,
    Assistant,
}

impl FocusedPane {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sidebar => "Inbox",
            Self::Mentions => "Mentions",
            Self::Thread => "Thread",
            Self::Assistant => "Copilot",
        }
    }

    /// Next pane among `visible`, wrapping around.
    #[must_use]
    pub fn cycle(self, visible: &[Self], forward: bool) -> Self {
        let Some(pos) = visible.iter().position(|p| *p == self) else {
            return visible.first().copied().unwrap_or(self);
        };
        let len = visible.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        visible[next]
    }
}

/// Tabs of the assistant panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantTab {
    #[default]
    Copilot,
    Details,
}

impl AssistantTab {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Copilot => Self::Details,
            Self::Details => Self::Copilot,
        }
    }
}
