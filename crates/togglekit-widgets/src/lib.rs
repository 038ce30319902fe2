//! Widget implementations for the togglekit widget toolkit.

pub mod switch;

pub use switch::{CornerStyle, SwitchChanged, ToggleSwitch};
