//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the Xiangqi rules engine, the board it reasons about,
//! and the game state that drives it. It has **zero dependencies** on UI or
//! I/O, making it:
//!
//! - **Deterministic**: the same board and move always get the same answer
//! - **Testable**: every piece rule is covered by unit and integration tests
//! - **Portable**: can run in any environment (terminal, GUI, headless)
//! - **Allocation-free**: destinations come back in a fixed-capacity `ArrayVec`
//!
//! # Module Structure
//!
//! - [`board`]: 10x9 grid of intersections and the opening layout
//! - [`rules`]: the move-legality engine (`is_legal_move`, `legal_moves_from`)
//! - [`game_state`]: side to move, selection, cursor; applies approved moves
//! - [`snapshot`]: render-ready copy of the game state
//!
//! # Rules
//!
//! The engine is a positional checker:
//!
//! - **Own pieces**: a piece never lands on a friendly piece
//! - **Flying general**: a general may take the enemy general along an open file
//! - **Per-kind geometry**: soldiers, rooks, horses (leg blocking), elephants
//!   (river and eye blocking), advisors and generals (palace), cannons (screen)
//! - **No check rule**: moves that expose one's own general are still legal
//!
//! # Example
//!
//! ```
//! use xiangqi_core::{rules, Board};
//! use xiangqi_core::types::{PieceKind, Side, Square};
//!
//! let board = Board::opening();
//! let horse = Square::new(9, 1).unwrap();
//!
//! let moves = rules::legal_moves_from(&board, PieceKind::Horse, Side::Red, horse);
//! assert_eq!(
//!     moves.as_slice(),
//!     &[Square::new(7, 0).unwrap(), Square::new(7, 2).unwrap()]
//! );
//! ```

pub mod board;
pub mod game_state;
pub mod rules;
pub mod snapshot;

pub use xiangqi_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, SelectOutcome};
pub use rules::{
    count_pieces_in_path, is_legal_move, is_path_clear, legal_moves_from, Destinations,
};
pub use snapshot::GameSnapshot;
