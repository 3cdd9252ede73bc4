//! King steps and castling destinations.
//!
//! Castling destinations produced here only satisfy the structural
//! conditions (rights held, pieces home, path empty). Check-related castling
//! conditions are enforced by the legality filter.

use crate::game_state::chess_rules::{castle_king_target, king_home, rook_home};
use crate::game_state::chess_types::*;
use crate::moves::knight_moves::{on_board, square_index};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KING_TARGETS: [[Option<Position>; 8]; 64] = generate_king_targets();

#[inline]
pub fn king_targets(square: Position) -> impl Iterator<Item = Position> {
    KING_TARGETS[square_index(square)].into_iter().flatten()
}

pub fn king_moves(
    board: &Board,
    from: Position,
    color: Color,
    rights: CastlingRights,
    out: &mut Vec<Position>,
) {
    for to in king_targets(from) {
        match board.get(to) {
            Some(piece) if piece.color == color => {}
            _ => out.push(to),
        }
    }

    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if castling_path_clear(board, from, color, rights, side) {
            out.push(castle_king_target(color, side));
        }
    }
}

/// Right held, king and rook on their home squares, nothing in between.
pub fn castling_path_clear(
    board: &Board,
    king_from: Position,
    color: Color,
    rights: CastlingRights,
    side: CastleSide,
) -> bool {
    if !rights.has(color, side) || king_from != king_home(color) {
        return false;
    }
    let rook_square = rook_home(color, side);
    if board.get(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }

    let (lo, hi) = if rook_square.col() < king_from.col() {
        (rook_square.col() + 1, king_from.col())
    } else {
        (king_from.col() + 1, rook_square.col())
    };
    (lo..hi)
        .filter_map(|col| Position::new(king_from.row(), col))
        .all(|square| board.is_empty(square))
}

const fn generate_king_targets() -> [[Option<Position>; 8]; 64] {
    let mut table = [[None; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut i = 0usize;
        while i < 8 {
            let (dr, dc) = KING_OFFSETS[i];
            table[sq][i] = on_board(row + dr, col + dc);
            i += 1;
        }
        sq += 1;
    }

    table
}
