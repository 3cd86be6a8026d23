//! Rules module - move legality for every piece kind
//!
//! Pure functions over a borrowed [`Board`]. Nothing here mutates the board or
//! keeps state between calls, so the same inputs always give the same answer.
//!
//! The checks are positional only: a move that leaves the mover's own general
//! exposed is still reported legal.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{PieceKind, Side, Square, MAX_DESTINATIONS};

/// Destinations of a single piece, in row-major order
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

/// Whether `kind`/`side` standing on `start` may move to `end`.
///
/// The caller guarantees `start` holds that piece; it is not re-checked.
pub fn is_legal_move(board: &Board, kind: PieceKind, side: Side, start: Square, end: Square) -> bool {
    // Never onto a friendly piece.
    if matches!(board.piece_at(end), Some(p) if p.side == side) {
        return false;
    }

    // Generals facing each other on an open file: the mover may take the other one.
    if kind == PieceKind::General && is_flying_general(board, start, end) {
        return true;
    }

    match kind {
        PieceKind::Soldier => valid_soldier_move(side, start, end),
        PieceKind::Rook => valid_rook_move(board, start, end),
        PieceKind::Horse => valid_horse_move(board, start, end),
        PieceKind::Elephant => valid_elephant_move(board, side, start, end),
        PieceKind::Advisor => valid_advisor_move(side, start, end),
        PieceKind::General => valid_general_move(side, start, end),
        PieceKind::Cannon => valid_cannon_move(board, start, end),
    }
}

/// Every square `kind`/`side` on `start` may move to, scanned in row-major order
pub fn legal_moves_from(board: &Board, kind: PieceKind, side: Side, start: Square) -> Destinations {
    let mut out = Destinations::new();
    for end in Square::all() {
        if is_legal_move(board, kind, side, start, end) {
            // 17 real squares, plus `start` for a rook or cannon when `start`
            // does not hold that piece.
            out.push(end);
        }
    }
    out
}

/// True if no piece stands strictly between `start` and `end`.
///
/// Meant for squares sharing a row or column.
pub fn is_path_clear(board: &Board, start: Square, end: Square) -> bool {
    count_pieces_in_path(board, start, end) == 0
}

/// Number of pieces strictly between `start` and `end`.
///
/// Walks columns when both squares share a row, otherwise walks rows along
/// `start`'s column. Endpoints are never counted.
pub fn count_pieces_in_path(board: &Board, start: Square, end: Square) -> usize {
    if start.row() == end.row() {
        let row = start.row();
        between(start.col(), end.col())
            .filter(|&col| board.is_occupied(row, col))
            .count()
    } else {
        let col = start.col();
        between(start.row(), end.row())
            .filter(|&row| board.is_occupied(row, col))
            .count()
    }
}

/// Coordinates strictly between `a` and `b`, in either direction
fn between(a: i8, b: i8) -> impl Iterator<Item = i8> {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    (lo + 1)..hi
}

#[inline(always)]
fn deltas(start: Square, end: Square) -> (i8, i8) {
    (end.row() - start.row(), end.col() - start.col())
}

#[inline(always)]
fn is_straight(start: Square, end: Square) -> bool {
    start.row() == end.row() || start.col() == end.col()
}

fn is_flying_general(board: &Board, start: Square, end: Square) -> bool {
    if start.col() != end.col() || !is_path_clear(board, start, end) {
        return false;
    }
    // Own pieces on `end` were already rejected.
    matches!(board.piece_at(end), Some(p) if p.kind == PieceKind::General)
}

fn valid_soldier_move(side: Side, start: Square, end: Square) -> bool {
    let (d_row, d_col) = deltas(start, end);
    let forward = side.forward();
    let step_forward = d_row == forward && d_col == 0;

    if side.owns_row(start.row()) {
        step_forward
    } else {
        step_forward || (d_row == 0 && d_col.abs() == 1)
    }
}

fn valid_rook_move(board: &Board, start: Square, end: Square) -> bool {
    is_straight(start, end) && is_path_clear(board, start, end)
}

fn valid_horse_move(board: &Board, start: Square, end: Square) -> bool {
    let (d_row, d_col) = deltas(start, end);
    // The leg is the neighbour along the long side of the L.
    match (d_row.abs(), d_col.abs()) {
        (2, 1) => board.is_empty_at(start.row() + d_row / 2, start.col()),
        (1, 2) => board.is_empty_at(start.row(), start.col() + d_col / 2),
        _ => false,
    }
}

fn valid_elephant_move(board: &Board, side: Side, start: Square, end: Square) -> bool {
    if !side.owns_row(end.row()) {
        return false;
    }
    let (d_row, d_col) = deltas(start, end);
    d_row.abs() == 2
        && d_col.abs() == 2
        && board.is_empty_at(
            (start.row() + end.row()) / 2,
            (start.col() + end.col()) / 2,
        )
}

fn valid_advisor_move(side: Side, start: Square, end: Square) -> bool {
    let (d_row, d_col) = deltas(start, end);
    end.in_palace(side) && d_row.abs() == 1 && d_col.abs() == 1
}

fn valid_general_move(side: Side, start: Square, end: Square) -> bool {
    let (d_row, d_col) = deltas(start, end);
    end.in_palace(side) && d_row.abs() + d_col.abs() == 1
}

fn valid_cannon_move(board: &Board, start: Square, end: Square) -> bool {
    if !is_straight(start, end) {
        return false;
    }
    let screens = count_pieces_in_path(board, start, end);
    match board.piece_at(end) {
        None => screens == 0,
        Some(_) => screens == 1,
    }
}
