//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal play.
//! It renders into a simple framebuffer that can be flushed to a terminal
//! backend, without any widget/layout library.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the board the way a Xiangqi board looks: pieces on intersections,
//!   a river band, palace diagonals
//! - Handle double-width CJK glyphs so the Chinese script lines up

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use xiangqi_core as core;
pub use xiangqi_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, HitTarget, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
