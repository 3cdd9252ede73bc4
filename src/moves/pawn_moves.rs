//! Pawn movement: pushes, double pushes, diagonal captures and en passant.

use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::*;

/// Diagonal squares a pawn of `color` standing on `from` attacks.
#[inline]
pub fn pawn_attacks(from: Position, color: Color) -> impl Iterator<Item = Position> {
    let dir = color.pawn_direction();
    [from.offset(dir, -1), from.offset(dir, 1)].into_iter().flatten()
}

pub fn pawn_moves(
    board: &Board,
    from: Position,
    color: Color,
    en_passant_target: Option<Position>,
    out: &mut Vec<Position>,
) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|p| board.is_empty(*p)) {
        out.push(one);
        if from.row() == pawn_start_row(color) {
            if let Some(two) = one.offset(dir, 0).filter(|p| board.is_empty(*p)) {
                out.push(two);
            }
        }
    }

    for to in pawn_attacks(from, color) {
        match board.get(to) {
            Some(target) if target.color != color => out.push(to),
            Some(_) => {}
            None if Some(to) == en_passant_target && is_en_passant_capture(board, from, to, color) => {
                out.push(to)
            }
            None => {}
        }
    }
}

/// The pawn taken en passant sits beside the capturer, on the destination column.
#[inline]
pub fn en_passant_victim_square(from: Position, to: Position) -> Option<Position> {
    Position::new(from.row(), to.col())
}

fn is_en_passant_capture(board: &Board, from: Position, to: Position, color: Color) -> bool {
    en_passant_victim_square(from, to)
        .and_then(|square| board.get(square))
        .is_some_and(|victim| victim.is(PieceKind::Pawn, color.opposite()))
}
