use arrayvec::ArrayVec;

use crate::game_state::SelectOutcome;
use crate::types::{Cell, Side, Square, BOARD_COLS, BOARD_ROWS, MAX_DESTINATIONS};

/// Render-ready copy of a [`crate::GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub turn: Side,
    pub selected: Option<Square>,
    pub valid_moves: ArrayVec<Square, MAX_DESTINATIONS>,
    pub cursor: Square,
    pub last_outcome: Option<SelectOutcome>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.turn = Side::Red;
        self.selected = None;
        self.valid_moves.clear();
        self.cursor = home_cursor();
        self.last_outcome = None;
    }

    pub fn cell(&self, sq: Square) -> Cell {
        self.board[sq.row() as usize][sq.col() as usize]
    }

    pub fn is_destination(&self, sq: Square) -> bool {
        self.valid_moves.contains(&sq)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS as usize]; BOARD_ROWS as usize],
            turn: Side::Red,
            selected: None,
            valid_moves: ArrayVec::new(),
            cursor: home_cursor(),
            last_outcome: None,
        }
    }
}

/// Where the cursor starts: on the red general
pub(crate) fn home_cursor() -> Square {
    Square::RED_GENERAL_START
}
