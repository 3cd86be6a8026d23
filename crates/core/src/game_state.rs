//! Game state module - the caller side of the rules engine
//!
//! Owns the board and the side to move, tracks the current selection and a
//! keyboard cursor, and applies only the moves [`crate::rules`] approves.
//! Every rule question is answered by the engine against a borrowed board;
//! the board is mutated here and nowhere else.

use log::{debug, trace};

use crate::board::Board;
use crate::rules::{self, Destinations};
use crate::snapshot::{home_cursor, GameSnapshot};
use crate::types::*;

/// Result of selecting a square (a click, or `Select` at the cursor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectOutcome {
    /// A piece of the side to move was picked up
    Selected(Square),
    /// The selected piece moved; `captured` is whatever stood on the target
    Moved { mv: Move, captured: Option<Piece> },
    /// The selected piece cannot go there; the selection was dropped
    Rejected(Move),
    /// Nothing selectable on that square
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Side,
    selected: Option<Square>,
    /// Destinations of the selected piece, cached when it was picked up
    valid_moves: Destinations,
    cursor: Square,
    last_outcome: Option<SelectOutcome>,
}

impl GameState {
    /// Create a new game from the standard opening, red to move
    pub fn new() -> Self {
        Self::from_board(Board::opening(), Side::Red)
    }

    /// Start from an arbitrary position
    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            selected: None,
            valid_moves: Destinations::new(),
            cursor: home_cursor(),
            last_outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn cursor(&self) -> Square {
        self.cursor
    }

    pub fn last_outcome(&self) -> Option<SelectOutcome> {
        self.last_outcome
    }

    /// Ask the engine whether a move is legal on the current board
    pub fn is_valid_move(&self, kind: PieceKind, side: Side, start: Square, end: Square) -> bool {
        rules::is_legal_move(&self.board, kind, side, start, end)
    }

    /// Ask the engine for every destination of a piece on the current board
    pub fn valid_moves_for(&self, kind: PieceKind, side: Side, start: Square) -> Destinations {
        rules::legal_moves_from(&self.board, kind, side, start)
    }

    /// Move the piece on `start` to `end` and pass the turn.
    ///
    /// Returns the captured piece, if any. Legality must already be settled.
    pub fn make_move(&mut self, start: Square, end: Square) -> Option<Piece> {
        let captured = self.board.move_piece(start, end);
        debug!(
            "{} moved {} -> {}{}",
            self.turn.as_str(),
            start,
            end,
            captured
                .map(|p| format!(", captured {}", p))
                .unwrap_or_default()
        );
        self.turn = self.turn.opponent();
        captured
    }

    /// Select a square: pick up a piece, or try to move the one already held.
    ///
    /// With a selection, the held piece moves to `square` if the engine allows
    /// it; either way the selection is dropped afterwards. Without one, only a
    /// piece belonging to the side to move can be picked up.
    pub fn select(&mut self, square: Square) -> SelectOutcome {
        let outcome = match self.selected.take() {
            Some(start) => {
                self.valid_moves.clear();
                let mv = Move::new(start, square);
                match self.board.piece_at(start) {
                    Some(piece) if self.is_valid_move(piece.kind, piece.side, start, square) => {
                        let captured = self.make_move(start, square);
                        SelectOutcome::Moved { mv, captured }
                    }
                    _ => {
                        debug!("rejected {}", mv);
                        SelectOutcome::Rejected(mv)
                    }
                }
            }
            None => match self.board.piece_at(square) {
                Some(piece) if piece.side == self.turn => {
                    self.valid_moves = self.valid_moves_for(piece.kind, piece.side, square);
                    trace!(
                        "{} at {} has {} destinations",
                        piece,
                        square,
                        self.valid_moves.len()
                    );
                    self.selected = Some(square);
                    SelectOutcome::Selected(square)
                }
                _ => SelectOutcome::Ignored,
            },
        };
        self.last_outcome = Some(outcome);
        outcome
    }

    /// [`GameState::select`] from raw coordinates
    pub fn select_at(&mut self, row: i8, col: i8) -> Result<SelectOutcome, RulesError> {
        let square = Square::new(row, col)?;
        Ok(self.select(square))
    }

    /// Drop the current selection, if any
    pub fn cancel_selection(&mut self) -> bool {
        self.valid_moves.clear();
        self.selected.take().is_some()
    }

    /// Move the cursor by a delta, staying on the board
    pub fn move_cursor(&mut self, d_row: i8, d_col: i8) -> bool {
        match self.cursor.offset(d_row, d_col) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    /// Start over from the opening
    pub fn restart(&mut self) {
        debug!("restarting game");
        *self = Self::new();
    }

    /// Apply a game action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::Select => self.select(self.cursor) != SelectOutcome::Ignored,
            GameAction::Cancel => self.cancel_selection(),
            GameAction::Restart => {
                self.restart();
                true
            }
            // Handled by the view.
            GameAction::ToggleScript => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (row, cells) in out.board.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self
                    .board
                    .get(row as i8, col as i8)
                    .flatten();
            }
        }
        out.turn = self.turn;
        out.selected = self.selected;
        out.valid_moves.clone_from(&self.valid_moves);
        out.cursor = self.cursor;
        out.last_outcome = self.last_outcome;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
