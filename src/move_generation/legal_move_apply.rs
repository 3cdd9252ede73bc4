//! Rule-aware move application.
//!
//! `make_move` is the single place where castling, en passant, promotion and
//! the castling/en-passant bookkeeping happen. `apply_move` and
//! `apply_legal_move` are thin checked wrappers around it, and `unmake_move`
//! restores the exact prior state from the returned `UndoState`.

use crate::errors::{RuleError, RuleResult};
use crate::game_state::chess_rules::{
    castle_right_for_rook_home, castle_rook_target, castle_side_for_target_col, promotion_row,
    rook_home,
};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::SpecialMove;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::pawn_moves::en_passant_victim_square;

/// Applies `mv` for the side to move without checking it against the legal
/// set, and returns the captured piece, if any.
///
/// A pawn reaching its last row becomes `promotion` (queen when `None`).
pub fn apply_move(
    game_state: &mut GameState,
    mv: Move,
    promotion: Option<PieceKind>,
) -> RuleResult<Option<Piece>> {
    let piece = game_state
        .piece_at(mv.from)
        .ok_or(RuleError::EmptySquare(mv.from))?;
    if piece.color != game_state.side_to_move {
        return Err(RuleError::WrongSide {
            position: mv.from,
            expected: game_state.side_to_move,
        });
    }
    Ok(make_move(game_state, mv, promotion)?.captured_piece)
}

/// Like [`apply_move`], but rejects anything outside the legal move set.
/// The state is untouched on error.
pub fn apply_legal_move(
    game_state: &mut GameState,
    mv: Move,
    promotion: Option<PieceKind>,
) -> RuleResult<Option<Piece>> {
    let piece = game_state
        .piece_at(mv.from)
        .ok_or(RuleError::EmptySquare(mv.from))?;
    if piece.color != game_state.side_to_move {
        return Err(RuleError::WrongSide {
            position: mv.from,
            expected: game_state.side_to_move,
        });
    }
    if !LegalMoveGenerator
        .legal_moves_from(game_state, mv.from)?
        .contains(&mv.to)
    {
        return Err(RuleError::IllegalMove(mv));
    }
    apply_move(game_state, mv, promotion)
}

/// Performs `mv` for whichever side owns the moving piece and records how to
/// take it back. The opponent of the mover is to move afterwards.
pub fn make_move(
    game_state: &mut GameState,
    mv: Move,
    promotion: Option<PieceKind>,
) -> RuleResult<UndoState> {
    let moved_piece = game_state
        .piece_at(mv.from)
        .ok_or(RuleError::EmptySquare(mv.from))?;
    if let Some(kind) = promotion {
        if !kind.is_promotion_target() {
            return Err(RuleError::InvalidPromotion(kind));
        }
    }

    let color = moved_piece.color;
    let mut undo = UndoState {
        mv,
        moved_piece,
        captured_piece: None,
        captured_square: mv.to,
        special: SpecialMove::None,
        prev_side_to_move: game_state.side_to_move,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_target: game_state.en_passant_target,
        prev_king_positions: game_state.king_positions,
    };

    let board = &mut game_state.board;
    let is_castle = moved_piece.kind == PieceKind::King && mv.from.col().abs_diff(mv.to.col()) == 2;
    let is_en_passant = moved_piece.kind == PieceKind::Pawn
        && Some(mv.to) == game_state.en_passant_target
        && mv.from.col() != mv.to.col()
        && board.is_empty(mv.to);

    if is_castle {
        let side = castle_side_for_target_col(mv.to.col()).ok_or(RuleError::IllegalMove(mv))?;
        let rook_from = rook_home(color, side);
        let rook_to = castle_rook_target(color, side);
        board.relocate(mv.from, mv.to);
        board.relocate(rook_from, rook_to);
        undo.special = SpecialMove::Castle { rook_from, rook_to };
    } else if is_en_passant {
        let victim = en_passant_victim_square(mv.from, mv.to).ok_or(RuleError::IllegalMove(mv))?;
        undo.captured_piece = board.take(victim);
        undo.captured_square = victim;
        board.relocate(mv.from, mv.to);
        undo.special = SpecialMove::EnPassant;
    } else {
        undo.captured_piece = board.relocate(mv.from, mv.to);
        if moved_piece.kind == PieceKind::Pawn && mv.to.row() == promotion_row(color) {
            let kind = promotion.unwrap_or(PieceKind::Queen);
            board.set(mv.to, Some(Piece::new(kind, color)));
            undo.special = SpecialMove::Promotion(kind);
        }
    }

    update_castling_rights(game_state, moved_piece, mv, undo.captured_piece.is_some());

    game_state.en_passant_target = if moved_piece.kind == PieceKind::Pawn
        && mv.from.row().abs_diff(mv.to.row()) == 2
    {
        Position::new((mv.from.row() + mv.to.row()) / 2, mv.from.col())
    } else {
        None
    };

    if moved_piece.kind == PieceKind::King {
        game_state.king_positions[color.index()] = mv.to;
    }
    game_state.side_to_move = color.opposite();

    Ok(undo)
}

/// Exact inverse of the `make_move` call that produced `undo`.
pub fn unmake_move(game_state: &mut GameState, undo: UndoState) {
    let board = &mut game_state.board;
    let mv = undo.mv;

    if let SpecialMove::Castle { rook_from, rook_to } = undo.special {
        board.relocate(rook_to, rook_from);
    }
    board.set(mv.to, None);
    board.set(mv.from, Some(undo.moved_piece));
    if let Some(captured) = undo.captured_piece {
        board.set(undo.captured_square, Some(captured));
    }

    game_state.side_to_move = undo.prev_side_to_move;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_target = undo.prev_en_passant_target;
    game_state.king_positions = undo.prev_king_positions;
}

fn update_castling_rights(game_state: &mut GameState, moved: Piece, mv: Move, captured: bool) {
    let rights = &mut game_state.castling_rights;
    match moved.kind {
        PieceKind::King => rights.clear_color(moved.color),
        PieceKind::Rook => {
            if let Some((color, side)) = castle_right_for_rook_home(mv.from) {
                if color == moved.color {
                    rights.clear(color, side);
                }
            }
        }
        _ => {}
    }

    // Taking a rook on its home square removes that rook's right.
    if captured {
        if let Some((color, side)) = castle_right_for_rook_home(mv.to) {
            rights.clear(color, side);
        }
    }
}
