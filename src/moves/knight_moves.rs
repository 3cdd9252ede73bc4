use crate::game_state::chess_types::*;

/// `(row, col)` jumps of a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KNIGHT_TARGETS: [[Option<Position>; 8]; 64] = generate_knight_targets();

/// On-board knight destinations from `square`, ignoring occupancy.
#[inline]
pub fn knight_targets(square: Position) -> impl Iterator<Item = Position> {
    KNIGHT_TARGETS[square_index(square)].into_iter().flatten()
}

/// Pseudo-legal knight moves: every jump that does not land on a friendly piece.
pub fn knight_moves(board: &Board, from: Position, color: Color, out: &mut Vec<Position>) {
    for to in knight_targets(from) {
        match board.get(to) {
            Some(piece) if piece.color == color => {}
            _ => out.push(to),
        }
    }
}

#[inline]
pub(crate) const fn square_index(square: Position) -> usize {
    square.row() as usize * 8 + square.col() as usize
}

const fn generate_knight_targets() -> [[Option<Position>; 8]; 64] {
    let mut table = [[None; 8]; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut i = 0usize;
        while i < 8 {
            let (dr, dc) = KNIGHT_OFFSETS[i];
            table[sq][i] = on_board(row + dr, col + dc);
            i += 1;
        }
        sq += 1;
    }

    table
}

pub(crate) const fn on_board(row: i8, col: i8) -> Option<Position> {
    if row < 0 || row > 7 || col < 0 || col > 7 {
        return None;
    }
    Some(Position::new_unchecked(row as u8, col as u8))
}
