//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub info: Color,

    // Message attribution
    pub user_message: Color,
    pub admin_message: Color,
    pub assistant: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(69, 71, 90),

            text: Color::Rgb(205, 214, 244),
            subtext: Color::Rgb(166, 173, 200),
            muted: Color::Rgb(108, 112, 134),

            primary: Color::Rgb(180, 190, 254),   // lavender
            secondary: Color::Rgb(148, 226, 213), // teal

            success: Color::Rgb(166, 227, 161),
            warning: Color::Rgb(249, 226, 175),
            info: Color::Rgb(137, 180, 250),

            user_message: Color::Rgb(205, 214, 244),
            admin_message: Color::Rgb(137, 180, 250),
            assistant: Color::Rgb(203, 166, 247), // mauve

            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(180, 190, 254),
        }
    }

    /// High contrast theme, used when colors are unwanted.
    pub fn high_contrast() -> Self {
        Self {
            base: Color::Black,
            surface: Color::Black,
            overlay: Color::Black,

            text: Color::White,
            subtext: Color::Gray,
            muted: Color::DarkGray,

            primary: Color::White,
            secondary: Color::White,

            success: Color::White,
            warning: Color::White,
            info: Color::White,

            user_message: Color::White,
            admin_message: Color::White,
            assistant: Color::White,

            border: Color::Gray,
            border_focused: Color::White,
        }
    }
}
