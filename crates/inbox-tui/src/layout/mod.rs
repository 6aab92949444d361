//! Layout components for the TUI.
//!
//! This module provides:
//! - [`render_shell`] / [`render_app`] - Main shell layout renderer
//! - [`LayoutMode`] - Wide and narrow layouts
//! - [`FocusedPane`] - Which pane has keyboard focus
//! - [`AssistantTab`] - Copilot or Details

mod modes;
mod shell;

pub use modes::{AssistantTab, FocusedPane, LayoutMode};
pub use shell::{render_app, render_shell};
