//! Legal move generation.
//!
//! Pseudo-legal destinations are played on a scratch copy of the state and
//! kept only when the mover's king is not attacked afterwards. Castling also
//! requires the king not to start, pass through or land on an attacked square.

use crate::errors::{MoveGenResult, MoveGenerationError};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::move_generator::{pseudo_moves_into, MoveGenerator};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn legal_moves_from(&self, game_state: &GameState, from: Position) -> MoveGenResult<Vec<Position>> {
        let Some(piece) = game_state.piece_at(from) else {
            return Ok(Vec::new());
        };
        let color = piece.color;
        let king_square = game_state.king_position(color);
        if game_state.piece_at(king_square) != Some(Piece::new(PieceKind::King, color)) {
            return Err(MoveGenerationError::MissingKing(color));
        }

        let mut pseudo = Vec::with_capacity(28);
        pseudo_moves_into(game_state, from, &mut pseudo);
        if pseudo.is_empty() {
            return Ok(pseudo);
        }

        let enemy = color.opposite();
        let mut scratch = game_state.clone();
        let mut legal = Vec::with_capacity(pseudo.len());

        for to in pseudo {
            let mv = Move::new(from, to);
            if piece.kind == PieceKind::King
                && from.col().abs_diff(to.col()) == 2
                && !castle_path_safe(game_state.board(), from, to, enemy)
            {
                continue;
            }

            let undo = make_move(&mut scratch, mv, None)
                .map_err(|e| MoveGenerationError::InvalidState(format!("make_move failed: {e}")))?;
            let safe = !is_square_attacked(scratch.board(), scratch.king_position(color), enemy);
            unmake_move(&mut scratch, undo);

            if safe {
                legal.push(to);
            }
        }

        Ok(legal)
    }
}

/// Start, transit and destination squares of a castling king are all unattacked.
fn castle_path_safe(board: &Board, from: Position, to: Position, enemy: Color) -> bool {
    let (lo, hi) = if from.col() < to.col() {
        (from.col(), to.col())
    } else {
        (to.col(), from.col())
    };
    (lo..=hi)
        .filter_map(|col| Position::new(from.row(), col))
        .all(|square| !is_square_attacked(board, square, enemy))
}
