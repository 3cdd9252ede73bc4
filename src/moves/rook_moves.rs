use crate::game_state::chess_types::*;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub fn rook_moves(board: &Board, from: Position, color: Color, out: &mut Vec<Position>) {
    for (dr, dc) in ROOK_DIRECTIONS {
        trace_ray(board, from, color, dr, dc, out);
    }
}

/// Walks one ray from `from`: empty squares are kept, the first enemy piece is
/// kept and stops the ray, a friendly piece stops it without being kept.
pub fn trace_ray(
    board: &Board,
    from: Position,
    color: Color,
    row_step: i8,
    col_step: i8,
    out: &mut Vec<Position>,
) {
    let mut cursor = from.offset(row_step, col_step);
    while let Some(to) = cursor {
        match board.get(to) {
            None => out.push(to),
            Some(piece) => {
                if piece.color != color {
                    out.push(to);
                }
                break;
            }
        }
        cursor = to.offset(row_step, col_step);
    }
}

/// First occupied square along a ray, if any.
pub fn first_blocker(
    board: &Board,
    from: Position,
    row_step: i8,
    col_step: i8,
) -> Option<(Position, Piece)> {
    let mut cursor = from.offset(row_step, col_step);
    while let Some(square) = cursor {
        if let Some(piece) = board.get(square) {
            return Some((square, piece));
        }
        cursor = square.offset(row_step, col_step);
    }
    None
}
