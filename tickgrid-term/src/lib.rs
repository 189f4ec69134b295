//! Crossterm frontend for `tickgrid`: a raw-mode diff-rendering terminal
//! plus conversion from crossterm input events to the widget event types.

pub mod convert;
pub mod terminal;

pub use convert::{convert_button, convert_event, convert_key, convert_modifiers, InputEvent};
pub use terminal::Terminal;
