use crate::errors::MoveGenResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::king_targets;
use crate::moves::knight_moves::knight_targets;
use crate::moves::rook_moves::{first_blocker, ROOK_DIRECTIONS};

/// True iff some piece of `attacker` could capture on `square`.
///
/// Pawns attack their forward diagonals whether or not anything stands there;
/// kings attack adjacent squares only (castling never attacks).
pub fn is_square_attacked(board: &Board, square: Position, attacker: Color) -> bool {
    let back = -attacker.pawn_direction();
    for d_col in [-1i8, 1] {
        if let Some(origin) = square.offset(back, d_col) {
            if board.get(origin) == Some(Piece::new(PieceKind::Pawn, attacker)) {
                return true;
            }
        }
    }

    let knight = Piece::new(PieceKind::Knight, attacker);
    if knight_targets(square).any(|p| board.get(p) == Some(knight)) {
        return true;
    }

    let king = Piece::new(PieceKind::King, attacker);
    if king_targets(square).any(|p| board.get(p) == Some(king)) {
        return true;
    }

    let slider_hits = |directions: [(i8, i8); 4], kind: PieceKind| {
        directions.into_iter().any(|(dr, dc)| {
            matches!(
                first_blocker(board, square, dr, dc),
                Some((_, piece)) if piece.color == attacker
                    && (piece.kind == kind || piece.kind == PieceKind::Queen)
            )
        })
    };

    slider_hits(ROOK_DIRECTIONS, PieceKind::Rook) || slider_hits(BISHOP_DIRECTIONS, PieceKind::Bishop)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state.board(), game_state.king_position(color), color.opposite())
}

/// True when `color` has at least one legal move anywhere on the board.
pub fn has_any_legal_move(game_state: &GameState, color: Color) -> MoveGenResult<bool> {
    for (from, _) in game_state.board().pieces_of(color) {
        if !LegalMoveGenerator.legal_moves_from(game_state, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// In check with no legal move for any piece. A side with no moves that is
/// not in check is deliberately not reported here.
pub fn is_checkmate(game_state: &GameState, color: Color) -> MoveGenResult<bool> {
    if !is_king_in_check(game_state, color) {
        return Ok(false);
    }
    Ok(!has_any_legal_move(game_state, color)?)
}
