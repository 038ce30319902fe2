//! Core types and traits for the togglekit widget toolkit.
//!
//! This crate provides the foundational pieces widgets are built from:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - The [`Widget`] trait and [`Canvas`] paint abstraction
//! - Retained draw commands: [`DrawCommand`]
//! - Animation: easing, keyframe tracks, and redirectable [`Transition`]s

pub mod animation;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod widget;

pub use animation::{EasedValue, Easing, Interpolate, Keyframe, KeyframeTrack, Transition};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, Shadow, StrokeStyle, Transform2D};
pub use event::{Event, MouseButton, TouchId};
pub use geometry::{Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, LayoutResult, TypeId, Widget, WidgetId,
};
