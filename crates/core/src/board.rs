//! Board module - holds the position
//!
//! The board is the 9x10 grid of intersections, each empty or holding one piece.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..=9 (black back rank to red back rank)
//! and col ranges 0..=8 (left to right).
//!
//! The board owns no rules. Legality lives in [`crate::rules`], which only ever
//! borrows a board immutably.

use crate::types::{
    Cell, Piece, PieceKind, RulesError, Side, Square, BOARD_COLS, BOARD_ROWS, BOARD_SQUARES,
};

/// Back rank order, left to right, identical for both sides
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Rook,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Rook,
];

const CANNON_COLS: [i8; 2] = [1, 7];
const SOLDIER_COLS: [i8; 5] = [0, 2, 4, 6, 8];

/// The game board - 9 columns x 10 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SQUARES],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SQUARES],
        }
    }

    /// Create a board with the standard opening layout
    pub fn opening() -> Self {
        let mut board = Self::new();
        for side in [Side::Black, Side::Red] {
            // (back rank, cannon row, soldier row) from black's top edge or red's bottom edge
            let (back, cannon, soldier) = match side {
                Side::Black => (0, 2, 3),
                Side::Red => (9, 7, 6),
            };
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.set(back, col as i8, Some(Piece::new(*kind, side)));
            }
            for col in CANNON_COLS {
                board.set(cannon, col, Some(Piece::new(PieceKind::Cannon, side)));
            }
            for col in SOLDIER_COLS {
                board.set(soldier, col, Some(Piece::new(PieceKind::Soldier, side)));
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if !Square::in_bounds(row, col) {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    /// Number of rows on the board
    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    /// Number of columns on the board
    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Piece at a square
    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    /// Piece at raw coordinates, failing with `OutOfBounds` off the grid
    pub fn try_piece_at(&self, row: i8, col: i8) -> Result<Option<Piece>, RulesError> {
        self.get(row, col)
            .ok_or(RulesError::OutOfBounds { row, col })
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Place (or clear) a cell at a square
    pub fn put(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index()] = cell;
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if position is within bounds and holds a piece
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Move whatever stands on `from` to `to`, clearing `from`.
    ///
    /// Returns the piece previously on `to`, if any. No legality checks: callers
    /// apply only moves the rules engine approved.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.cells[from.index()].take();
        std::mem::replace(&mut self.cells[to.index()], moving)
    }

    /// Iterate over occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| Some((Square::from_index(idx)?, (*cell)?)))
    }

    /// Square of `side`'s general, if it is on the board
    pub fn general_square(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::General && p.side == side)
            .map(|(sq, _)| sq)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
