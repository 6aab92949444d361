//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette
//! - [`IconSet`] - Icons with Unicode/ASCII modes
//! - [`BorderSet`] - Border characters with Unicode/ASCII fallback

mod borders;
mod colors;
mod icons;

pub use borders::BorderSet;
pub use colors::Theme;
pub use icons::{IconMode, IconSet};
