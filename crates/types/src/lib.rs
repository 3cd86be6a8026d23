//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain values with no I/O, making them usable in any context
//! (rules engine, game state, terminal rendering, input mapping).
//!
//! # Board Geometry
//!
//! Xiangqi is played on the intersections of a 9x10 grid:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 10 (indexed 0-9). Row 0 is the black back rank, row 9 the red one.
//! - **River**: between rows 4 and 5. Black's half is rows 0-4, red's half rows 5-9.
//! - **Palaces**: columns 3-5, rows 0-2 (black) and 7-9 (red).
//!
//! # Examples
//!
//! ```
//! use xiangqi_types::{Piece, PieceKind, Side, Square, BOARD_COLS, BOARD_ROWS};
//!
//! let horse = Piece::new(PieceKind::Horse, Side::Red);
//! assert_eq!(horse.chinese_char(), '傌');
//!
//! let sq = Square::new(9, 1).unwrap();
//! assert_eq!((sq.row(), sq.col()), (9, 1));
//! assert!(Square::new(10, 0).is_err());
//!
//! assert_eq!(BOARD_ROWS, 10);
//! assert_eq!(BOARD_COLS, 9);
//! ```

use std::fmt;

/// Number of rows (ranks) on the board
pub const BOARD_ROWS: u8 = 10;

/// Number of columns (files) on the board
pub const BOARD_COLS: u8 = 9;

/// Total number of intersections
pub const BOARD_SQUARES: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// Last row on black's side of the river
pub const BLACK_RIVER_ROW: i8 = 4;

/// First row on red's side of the river
pub const RED_RIVER_ROW: i8 = 5;

/// Palace columns (inclusive), shared by both sides
pub const PALACE_COLS: (i8, i8) = (3, 5);

/// Upper bound on the squares `legal_moves_from` can report.
///
/// A rook or cannon reaches at most every other square on its row (8) and
/// column (9). The engine does not re-read `start`, so when it is empty or
/// holds some other piece a straight-line mover also accepts `start` itself,
/// which makes 18.
pub const MAX_DESTINATIONS: usize = 18;

/// Default event poll interval in milliseconds (~30 redraws per second)
pub const TICK_MS: u32 = 33;

/// Errors raised when raw coordinates enter the system.
///
/// Illegal moves are not errors: the rules engine reports them as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("square ({row}, {col}) is outside the 10x9 board")]
    OutOfBounds { row: i8, col: i8 },
}

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// The other side
    pub fn opponent(&self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row direction this side's soldiers advance in.
    ///
    /// Black starts at row 0 and moves down the board (+1); red moves up (-1).
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// Whether `row` is on this side's own half of the river
    pub fn owns_row(&self, row: i8) -> bool {
        match self {
            Side::Red => row >= RED_RIVER_ROW,
            Side::Black => row <= BLACK_RIVER_ROW,
        }
    }

    /// Palace rows (inclusive) for this side
    pub fn palace_rows(&self) -> (i8, i8) {
        match self {
            Side::Red => (7, 9),
            Side::Black => (0, 2),
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::Black => "black",
        }
    }

    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Black => "Black",
        }
    }
}

/// The seven Xiangqi piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    General,
    Advisor,
    Elephant,
    Horse,
    Rook,
    Cannon,
    Soldier,
}

impl PieceKind {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::General => "general",
            PieceKind::Advisor => "advisor",
            PieceKind::Elephant => "elephant",
            PieceKind::Horse => "horse",
            PieceKind::Rook => "rook",
            PieceKind::Cannon => "cannon",
            PieceKind::Soldier => "soldier",
        }
    }

    /// Single letter drawn in the English script
    pub fn letter(&self) -> char {
        match self {
            PieceKind::General => 'G',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'E',
            PieceKind::Horse => 'H',
            PieceKind::Rook => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'S',
        }
    }
}

/// A piece on the board: kind plus owning side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Traditional character; red and black use different glyphs for most kinds
    pub fn chinese_char(&self) -> char {
        match (self.side, self.kind) {
            (Side::Red, PieceKind::General) => '帥',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Horse) => '傌',
            (Side::Red, PieceKind::Rook) => '俥',
            (Side::Red, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Black, PieceKind::General) => '將',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Horse) => '馬',
            (Side::Black, PieceKind::Rook) => '車',
            (Side::Black, PieceKind::Cannon) => '砲',
            (Side::Black, PieceKind::Soldier) => '卒',
        }
    }

    /// Glyph for the given script
    pub fn glyph(&self, script: Script) -> char {
        match script {
            Script::Chinese => self.chinese_char(),
            Script::English => self.kind.letter(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side.as_str(), self.kind.as_str())
    }
}

/// A board intersection, valid by construction.
///
/// Use [`Square::new`] or `TryFrom<(i8, i8)>` to build one from raw
/// coordinates; both fail with [`RulesError::OutOfBounds`] off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: i8,
    col: i8,
}

impl Square {
    /// Red general's opening square
    pub const RED_GENERAL_START: Square = Square { row: 9, col: 4 };

    /// Black general's opening square
    pub const BLACK_GENERAL_START: Square = Square { row: 0, col: 4 };

    /// Create a square, checking it lies on the 10x9 grid
    ///
    /// # Examples
    ///
    /// ```
    /// use xiangqi_types::{RulesError, Square};
    ///
    /// assert!(Square::new(0, 8).is_ok());
    /// assert_eq!(
    ///     Square::new(3, 9),
    ///     Err(RulesError::OutOfBounds { row: 3, col: 9 })
    /// );
    /// ```
    pub fn new(row: i8, col: i8) -> Result<Self, RulesError> {
        if Self::in_bounds(row, col) {
            Ok(Self { row, col })
        } else {
            Err(RulesError::OutOfBounds { row, col })
        }
    }

    /// Whether raw coordinates fall on the grid
    #[inline(always)]
    pub fn in_bounds(row: i8, col: i8) -> bool {
        (0..BOARD_ROWS as i8).contains(&row) && (0..BOARD_COLS as i8).contains(&col)
    }

    /// Square for a row-major index (`row * 9 + col`)
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= BOARD_SQUARES {
            return None;
        }
        let cols = BOARD_COLS as usize;
        Some(Self {
            row: (index / cols) as i8,
            col: (index % cols) as i8,
        })
    }

    #[inline(always)]
    pub fn row(&self) -> i8 {
        self.row
    }

    #[inline(always)]
    pub fn col(&self) -> i8 {
        self.col
    }

    /// Row-major index into a flat board array
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (BOARD_COLS as usize) + (self.col as usize)
    }

    /// Shift by a row/column delta, or `None` if that leaves the grid
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::new(self.row + d_row, self.col + d_col).ok()
    }

    /// Whether this square lies in `side`'s palace
    pub fn in_palace(&self, side: Side) -> bool {
        let (top, bottom) = side.palace_rows();
        let (left, right) = PALACE_COLS;
        (top..=bottom).contains(&self.row) && (left..=right).contains(&self.col)
    }

    /// Every square in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES).filter_map(Square::from_index)
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = RulesError;

    fn try_from((row, col): (i8, i8)) -> Result<Self, Self::Error> {
        Square::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A candidate move, always judged against a board snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Glyph set used to draw pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Script {
    #[default]
    Chinese,
    English,
}

impl Script {
    pub fn toggled(&self) -> Self {
        match self {
            Script::Chinese => Script::English,
            Script::English => Script::Chinese,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chinese" | "zh" | "cn" => Some(Script::Chinese),
            "english" | "en" => Some(Script::English),
            _ => None,
        }
    }

    /// Label shown on the toggle button
    pub fn label(&self) -> &'static str {
        match self {
            Script::Chinese => "中文",
            Script::English => "English",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Select,
    Cancel,
    ToggleScript,
    Restart,
}

/// Cell on the board (None = empty intersection)
pub type Cell = Option<Piece>;
