//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and extracts the
//! terminal cell of a left click so the view can hit-test it.

pub mod map;

pub use xiangqi_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
