//! Text rendering utilities.
//!
//! - [`wrap_text`], [`wrap_styled`], [`wrap_with_marker`] - wrapping into lines
//! - [`truncate_to_width`], [`fit_width`] - unicode-safe truncation

mod width;
mod wrap;

pub use width::{fit_width, truncate_to_width, visual_width};
pub use wrap::{wrap_styled, wrap_text, wrap_with_marker};
