use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::rook_moves::rook_moves;

#[inline]
pub fn queen_moves(board: &Board, from: Position, color: Color, out: &mut Vec<Position>) {
    rook_moves(board, from, color, out);
    bishop_moves(board, from, color, out);
}
