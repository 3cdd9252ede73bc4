//! Pluggable board evaluation.
//!
//! Search stays modular by delegating static scoring to this trait. Scores
//! are always from White's point of view: positive favours White.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;

/// Penalty applied to the side currently in check.
pub const CHECK_PENALTY: i32 = 50;

pub trait BoardScorer: Send + Sync {
    fn score(&self, game_state: &GameState) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 10,
            PieceKind::Knight => 30,
            PieceKind::Bishop => 30,
            PieceKind::Rook => 50,
            PieceKind::Queen => 90,
            PieceKind::King => 900,
        }
    }

    pub fn material_balance_white_minus_black(board: &Board) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| {
                let value = Self::piece_value(piece.kind);
                if piece.color.is_white() {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let mut score = Self::material_balance_white_minus_black(game_state.board());
        if is_king_in_check(game_state, Color::White) {
            score -= CHECK_PENALTY;
        }
        if is_king_in_check(game_state, Color::Black) {
            score += CHECK_PENALTY;
        }
        score
    }
}
