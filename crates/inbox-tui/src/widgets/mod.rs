//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`Sidebar`] - Navigation and conversation list
//! - [`ThreadView`] - Selected conversation with its composer
//! - [`MentionsPanel`] - Mention summaries
//! - [`AssistantPanel`] / [`AssistantRail`] - Copilot and Details tabs
//! - [`FooterHints`] - Bottom status line and keybinding hints
//! - [`Pane`], [`InputBox`] - Shared building blocks

mod assistant;
mod footer_hints;
mod input_box;
mod mentions;
mod pane;
mod sidebar;
mod text_input;
mod thread;

pub use assistant::{AssistantPanel, AssistantRail, DETAIL_SECTIONS};
pub use footer_hints::{hints_for_focus, FooterHints};
pub use input_box::InputBox;
pub use mentions::MentionsPanel;
pub use pane::Pane;
pub use sidebar::Sidebar;
pub use text_input::TextInputState;
pub use thread::ThreadView;
