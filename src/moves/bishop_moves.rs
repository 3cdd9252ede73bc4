use crate::game_state::chess_types::*;
use crate::moves::rook_moves::trace_ray;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub fn bishop_moves(board: &Board, from: Position, color: Color, out: &mut Vec<Position>) {
    for (dr, dc) in BISHOP_DIRECTIONS {
        trace_ray(board, from, color, dr, dc, out);
    }
}
