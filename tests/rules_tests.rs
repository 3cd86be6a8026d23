//! Rules tests - move legality for every piece kind

use xiangqi::core::{count_pieces_in_path, is_legal_move, is_path_clear, legal_moves_from, Board};
use xiangqi::types::{Piece, PieceKind, Side, Square, MAX_DESTINATIONS};

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col).unwrap()
}

fn place(board: &mut Board, row: i8, col: i8, kind: PieceKind, side: Side) {
    assert!(board.set(row, col, Some(Piece::new(kind, side))));
}

/// Board with a single piece on it.
fn lone(row: i8, col: i8, kind: PieceKind, side: Side) -> Board {
    let mut board = Board::new();
    place(&mut board, row, col, kind, side);
    board
}

fn moves(board: &Board, row: i8, col: i8) -> Vec<Square> {
    let piece = board
        .piece_at(sq(row, col))
        .expect("test square should hold a piece");
    legal_moves_from(board, piece.kind, piece.side, sq(row, col)).to_vec()
}

#[test]
fn test_opening_red_soldier() {
    let board = Board::opening();
    assert_eq!(moves(&board, 6, 0), vec![sq(5, 0)]);
}

#[test]
fn test_opening_red_horse() {
    let board = Board::opening();
    // (8, 3) is blocked by the elephant on the leg square (9, 2).
    assert_eq!(moves(&board, 9, 1), vec![sq(7, 0), sq(7, 2)]);
}

#[test]
fn test_opening_red_rook_and_cannon() {
    let board = Board::opening();
    assert_eq!(moves(&board, 9, 0), vec![sq(7, 0), sq(8, 0)]);

    let cannon = moves(&board, 7, 1);
    // Over the black cannon onto the black horse.
    assert!(cannon.contains(&sq(0, 1)));
    assert!(!cannon.contains(&sq(2, 1)));
    assert!(cannon.contains(&sq(7, 4)));
    assert!(!cannon.contains(&sq(7, 7)));
    assert!(!cannon.contains(&sq(9, 1)));
}

#[test]
fn test_own_pieces_are_never_captured() {
    let board = Board::opening();
    for (start, piece) in board.pieces() {
        for end in Square::all() {
            if matches!(board.piece_at(end), Some(p) if p.side == piece.side) {
                assert!(
                    !is_legal_move(&board, piece.kind, piece.side, start, end),
                    "{} on {} must not take its own piece on {}",
                    piece,
                    start,
                    end
                );
            }
        }
    }
}

#[test]
fn test_legal_moves_match_single_checks() {
    let board = Board::opening();
    for (start, piece) in board.pieces() {
        let expected: Vec<Square> = Square::all()
            .filter(|&end| is_legal_move(&board, piece.kind, piece.side, start, end))
            .collect();
        let got = legal_moves_from(&board, piece.kind, piece.side, start);
        assert_eq!(got.as_slice(), expected.as_slice(), "{} on {}", piece, start);
    }
}

#[test]
fn test_engine_is_deterministic_and_read_only() {
    let board = Board::opening();
    let before = board.clone();
    for (start, piece) in board.pieces() {
        let first = legal_moves_from(&board, piece.kind, piece.side, start);
        let second = legal_moves_from(&board, piece.kind, piece.side, start);
        assert_eq!(first, second);
    }
    assert_eq!(board, before);
}

#[test]
fn test_soldier_before_river_only_advances() {
    let board = lone(6, 4, PieceKind::Soldier, Side::Red);
    assert_eq!(moves(&board, 6, 4), vec![sq(5, 4)]);

    // Still on its own side at row 5.
    let board = lone(5, 4, PieceKind::Soldier, Side::Red);
    assert_eq!(moves(&board, 5, 4), vec![sq(4, 4)]);

    let board = lone(3, 4, PieceKind::Soldier, Side::Black);
    assert_eq!(moves(&board, 3, 4), vec![sq(4, 4)]);
}

#[test]
fn test_soldier_after_river_moves_sideways() {
    let board = lone(4, 4, PieceKind::Soldier, Side::Red);
    assert_eq!(moves(&board, 4, 4), vec![sq(3, 4), sq(4, 3), sq(4, 5)]);

    let board = lone(5, 4, PieceKind::Soldier, Side::Black);
    assert_eq!(moves(&board, 5, 4), vec![sq(5, 3), sq(5, 5), sq(6, 4)]);
}

#[test]
fn test_soldier_never_retreats() {
    for (row, side) in [(6, Side::Red), (2, Side::Red), (3, Side::Black), (7, Side::Black)] {
        let board = lone(row, 4, PieceKind::Soldier, side);
        let back = sq(row - side.forward(), 4);
        assert!(
            !is_legal_move(&board, PieceKind::Soldier, side, sq(row, 4), back),
            "{:?} soldier on row {} moved backwards",
            side,
            row
        );
    }
}

#[test]
fn test_soldier_on_last_rank_slides() {
    let board = lone(0, 0, PieceKind::Soldier, Side::Red);
    assert_eq!(moves(&board, 0, 0), vec![sq(0, 1)]);
}

#[test]
fn test_horse_leg_blocking() {
    let mut board = lone(4, 4, PieceKind::Horse, Side::Red);
    assert!(is_legal_move(&board, PieceKind::Horse, Side::Red, sq(4, 4), sq(2, 5)));
    assert_eq!(moves(&board, 4, 4).len(), 8);

    // A piece of either side on the leg blocks it.
    place(&mut board, 3, 4, PieceKind::Soldier, Side::Black);
    assert!(!is_legal_move(&board, PieceKind::Horse, Side::Red, sq(4, 4), sq(2, 5)));
    assert!(!is_legal_move(&board, PieceKind::Horse, Side::Red, sq(4, 4), sq(2, 3)));
    assert_eq!(moves(&board, 4, 4).len(), 6);

    // A piece diagonal to the horse does not.
    let mut board = lone(4, 4, PieceKind::Horse, Side::Red);
    place(&mut board, 3, 5, PieceKind::Rook, Side::Red);
    assert!(is_legal_move(&board, PieceKind::Horse, Side::Red, sq(4, 4), sq(2, 5)));
}

#[test]
fn test_horse_in_corner() {
    let board = lone(0, 0, PieceKind::Horse, Side::Black);
    assert_eq!(moves(&board, 0, 0), vec![sq(1, 2), sq(2, 1)]);
}

#[test]
fn test_rook_stops_at_first_piece() {
    let mut board = lone(4, 0, PieceKind::Rook, Side::Red);
    place(&mut board, 4, 3, PieceKind::Horse, Side::Black);
    place(&mut board, 1, 0, PieceKind::Cannon, Side::Red);

    assert!(is_legal_move(&board, PieceKind::Rook, Side::Red, sq(4, 0), sq(4, 3)));
    assert!(!is_legal_move(&board, PieceKind::Rook, Side::Red, sq(4, 0), sq(4, 4)));
    assert!(!is_legal_move(&board, PieceKind::Rook, Side::Red, sq(4, 0), sq(1, 0)));
    assert!(is_legal_move(&board, PieceKind::Rook, Side::Red, sq(4, 0), sq(2, 0)));
    assert!(!is_legal_move(&board, PieceKind::Rook, Side::Red, sq(4, 0), sq(5, 1)));
}

#[test]
fn test_cannon_screen_rule() {
    let mut board = lone(5, 0, PieceKind::Cannon, Side::Red);
    let cannon = |board: &Board, end| is_legal_move(board, PieceKind::Cannon, Side::Red, sq(5, 0), end);

    // Open line: slides like a rook.
    assert!(cannon(&board, sq(5, 8)));

    place(&mut board, 5, 4, PieceKind::Soldier, Side::Black);
    assert!(!cannon(&board, sq(5, 8)), "cannot slide past a screen");
    assert!(!cannon(&board, sq(5, 4)), "cannot take without a screen");
    assert!(cannon(&board, sq(5, 3)));

    place(&mut board, 5, 8, PieceKind::Rook, Side::Black);
    assert!(cannon(&board, sq(5, 8)), "exactly one screen captures");

    place(&mut board, 5, 6, PieceKind::Horse, Side::Black);
    assert!(!cannon(&board, sq(5, 8)), "two screens block the capture");
    assert!(cannon(&board, sq(5, 6)));
}

#[test]
fn test_flying_general() {
    let mut board = lone(9, 4, PieceKind::General, Side::Red);
    place(&mut board, 0, 4, PieceKind::General, Side::Black);

    assert!(is_legal_move(&board, PieceKind::General, Side::Red, sq(9, 4), sq(0, 4)));
    assert!(is_legal_move(&board, PieceKind::General, Side::Black, sq(0, 4), sq(9, 4)));

    place(&mut board, 5, 4, PieceKind::Soldier, Side::Red);
    assert!(!is_legal_move(&board, PieceKind::General, Side::Red, sq(9, 4), sq(0, 4)));
    assert!(!is_legal_move(&board, PieceKind::General, Side::Black, sq(0, 4), sq(9, 4)));
}

#[test]
fn test_flying_general_needs_a_general() {
    let mut board = lone(9, 4, PieceKind::General, Side::Red);
    place(&mut board, 0, 4, PieceKind::Rook, Side::Black);
    assert!(!is_legal_move(&board, PieceKind::General, Side::Red, sq(9, 4), sq(0, 4)));
}

#[test]
fn test_general_stays_in_palace() {
    let board = lone(9, 4, PieceKind::General, Side::Red);
    assert_eq!(moves(&board, 9, 4), vec![sq(8, 4), sq(9, 3), sq(9, 5)]);

    let board = lone(7, 3, PieceKind::General, Side::Red);
    assert_eq!(moves(&board, 7, 3), vec![sq(7, 4), sq(8, 3)]);

    let board = lone(2, 5, PieceKind::General, Side::Black);
    assert_eq!(moves(&board, 2, 5), vec![sq(1, 5), sq(2, 4)]);
}

#[test]
fn test_advisor_moves_diagonally_in_palace() {
    let board = lone(9, 3, PieceKind::Advisor, Side::Red);
    assert_eq!(moves(&board, 9, 3), vec![sq(8, 4)]);

    let board = lone(1, 4, PieceKind::Advisor, Side::Black);
    assert_eq!(
        moves(&board, 1, 4),
        vec![sq(0, 3), sq(0, 5), sq(2, 3), sq(2, 5)]
    );
}

#[test]
fn test_elephant_cannot_cross_river() {
    let board = lone(3, 2, PieceKind::Elephant, Side::Black);
    assert!(!is_legal_move(&board, PieceKind::Elephant, Side::Black, sq(3, 2), sq(5, 4)));
    assert_eq!(moves(&board, 3, 2), vec![sq(1, 0), sq(1, 4)]);

    let board = lone(5, 6, PieceKind::Elephant, Side::Red);
    assert_eq!(moves(&board, 5, 6), vec![sq(7, 4), sq(7, 8)]);
}

#[test]
fn test_elephant_eye_blocking() {
    let mut board = lone(9, 2, PieceKind::Elephant, Side::Red);
    assert_eq!(moves(&board, 9, 2), vec![sq(7, 0), sq(7, 4)]);

    place(&mut board, 8, 3, PieceKind::Soldier, Side::Black);
    assert_eq!(moves(&board, 9, 2), vec![sq(7, 0)]);
}

#[test]
fn test_rook_reaches_seventeen_squares() {
    let board = lone(4, 4, PieceKind::Rook, Side::Red);
    assert_eq!(moves(&board, 4, 4).len(), 17);
}

#[test]
fn test_path_scanners() {
    let board = Board::opening();
    // Red cannon to black horse: only the black cannon in between.
    assert_eq!(count_pieces_in_path(&board, sq(7, 1), sq(0, 1)), 1);
    assert!(is_path_clear(&board, sq(7, 1), sq(3, 1)));
    // Along the back rank between the rooks.
    assert_eq!(count_pieces_in_path(&board, sq(9, 0), sq(9, 8)), 7);
    assert_eq!(count_pieces_in_path(&board, sq(9, 8), sq(9, 0)), 7);
    // Between the generals.
    assert_eq!(count_pieces_in_path(&board, sq(9, 4), sq(0, 4)), 2);
}

#[test]
fn test_soldier_blocked_by_own_piece_ahead() {
    let mut board = lone(6, 4, PieceKind::Soldier, Side::Red);
    place(&mut board, 5, 4, PieceKind::Horse, Side::Red);
    assert!(moves(&board, 6, 4).is_empty());

    let mut board = lone(3, 2, PieceKind::Soldier, Side::Black);
    place(&mut board, 4, 2, PieceKind::Cannon, Side::Black);
    assert!(moves(&board, 3, 2).is_empty());
}

#[test]
fn test_empty_start_square_lists_start_for_straight_movers() {
    let board = Board::new();
    for kind in [PieceKind::Rook, PieceKind::Cannon] {
        let got = legal_moves_from(&board, kind, Side::Red, sq(4, 4));
        assert_eq!(got.len(), MAX_DESTINATIONS);
        assert!(got.contains(&sq(4, 4)));

        let expected: Vec<Square> = Square::all()
            .filter(|&end| is_legal_move(&board, kind, Side::Red, sq(4, 4), end))
            .collect();
        assert_eq!(got.as_slice(), expected.as_slice());
    }
}

#[test]
fn test_mismatched_start_piece_matches_single_checks() {
    let board = Board::opening();
    // Every kind and side asked about every square, whatever stands there.
    for start in Square::all() {
        for kind in [
            PieceKind::General,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Rook,
            PieceKind::Cannon,
            PieceKind::Soldier,
        ] {
            for side in [Side::Red, Side::Black] {
                let got = legal_moves_from(&board, kind, side, start);
                let expected: Vec<Square> = Square::all()
                    .filter(|&end| is_legal_move(&board, kind, side, start, end))
                    .collect();
                assert_eq!(got.as_slice(), expected.as_slice(), "{:?} {:?} on {}", side, kind, start);
            }
        }
    }
}
