use crate::game_state::chess_types::*;

/// How a move deviated from a plain relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMove {
    None,
    Castle { rook_from: Position, rook_to: Position },
    EnPassant,
    Promotion(PieceKind),
}

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, Copy)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    /// Equal to `mv.to` except for en passant.
    pub captured_square: Position,
    pub special: SpecialMove,

    pub prev_side_to_move: Color,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Position>,
    pub prev_king_positions: [Position; 2],
}
