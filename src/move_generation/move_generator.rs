//! Move generator abstraction and pseudo-legal dispatch.
//!
//! Search and session code stay generic over `MoveGenerator` so alternate
//! generators (or failing ones, in tests) can be swapped in.

use crate::errors::{MoveGenResult, MoveGenerationError};
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

pub trait MoveGenerator: Send + Sync {
    /// Legal destinations for the piece on `from`. Empty when the square is empty.
    fn legal_moves_from(&self, game_state: &GameState, from: Position) -> MoveGenResult<Vec<Position>>;

    /// Every legal move for `color`, origins in row-major order.
    fn all_legal_moves(&self, game_state: &GameState, color: Color) -> MoveGenResult<Vec<Move>> {
        let mut moves = Vec::with_capacity(48);
        for (from, _) in game_state.board().pieces_of(color) {
            for to in self.legal_moves_from(game_state, from)? {
                moves.push(Move::new(from, to));
            }
        }
        Ok(moves)
    }
}

pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn legal_moves_from(&self, _game_state: &GameState, _from: Position) -> MoveGenResult<Vec<Position>> {
        Err(MoveGenerationError::NotImplemented)
    }
}

/// Destinations reachable by the piece on `from`, ignoring self-check.
pub fn pseudo_moves(game_state: &GameState, from: Position) -> Vec<Position> {
    let mut out = Vec::with_capacity(28);
    pseudo_moves_into(game_state, from, &mut out);
    out
}

pub fn pseudo_moves_into(game_state: &GameState, from: Position, out: &mut Vec<Position>) {
    let board = game_state.board();
    let Some(piece) = board.get(from) else {
        return;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, game_state.en_passant_target(), out),
        PieceKind::Knight => knight_moves(board, from, piece.color, out),
        PieceKind::Bishop => bishop_moves(board, from, piece.color, out),
        PieceKind::Rook => rook_moves(board, from, piece.color, out),
        PieceKind::Queen => queen_moves(board, from, piece.color, out),
        PieceKind::King => king_moves(board, from, piece.color, game_state.castling_rights(), out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_has_twenty_pseudo_moves_per_side() {
        let game = GameState::new_game();
        for color in [Color::White, Color::Black] {
            let total: usize = game
                .board()
                .pieces_of(color)
                .map(|(from, _)| pseudo_moves(&game, from).len())
                .sum();
            assert_eq!(total, 20, "{color} pseudo-move count");
        }
    }

    #[test]
    fn empty_square_has_no_pseudo_moves() {
        let game = GameState::new_game();
        let e4 = Position::new(4, 4).expect("valid");
        assert!(pseudo_moves(&game, e4).is_empty());
    }

    #[test]
    fn null_generator_reports_not_implemented() {
        let game = GameState::new_game();
        let err = NullMoveGenerator
            .all_legal_moves(&game, Color::White)
            .expect_err("null generator always fails");
        assert_eq!(err, MoveGenerationError::NotImplemented);
    }
}
