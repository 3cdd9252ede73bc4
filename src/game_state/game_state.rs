//! Authoritative game state.
//!
//! `GameState` wraps the piece grid with the bookkeeping the rules need: side
//! to move, cached king squares, castling rights and the en-passant target.
//! All rule-aware mutation goes through `move_generation::legal_move_apply`.

use std::fmt;

use crate::errors::{RuleError, RuleResult};
use crate::game_state::chess_rules::{home_row, king_home, rook_home, BOARD_SIZE};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::render_game_state::render_board;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    /// Indexed by `Color::index`.
    pub(crate) king_positions: [Position; 2],
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Position>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial setup, White to move.
    pub fn new_game() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            king_positions: [king_home(Color::White), king_home(Color::Black)],
            castling_rights: CastlingRights::ALL,
            en_passant_target: None,
        }
    }

    #[inline]
    pub fn builder() -> PositionBuilder {
        PositionBuilder::new()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn king_position(&self, color: Color) -> Position {
        self.king_positions[color.index()]
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            board: self.board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            white_king: self.king_position(Color::White),
            black_king: self.king_position(Color::Black),
        }
    }
}

/// Read-only view handed to presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Position>,
    pub white_king: Position,
    pub black_king: Position,
}

impl BoardSnapshot {
    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(&self.board))
    }
}

/// Builds arbitrary positions for puzzles, tests and benchmarks.
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Position>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Empty board, White to move, no castling rights.
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
        }
    }

    /// Lays out pieces from eight row strings, row 0 first. Each row holds
    /// eight characters: `.` for empty, `PNBRQK` for White, `pnbrqk` for Black.
    pub fn grid(mut self, rows: [&str; 8]) -> RuleResult<Self> {
        for (row, text) in rows.iter().enumerate() {
            if text.chars().count() != BOARD_SIZE {
                return Err(RuleError::InvalidSetup(format!(
                    "grid row {row} must have {BOARD_SIZE} squares: {text:?}"
                )));
            }
            for (col, symbol) in text.chars().enumerate() {
                let Some(position) = Position::new(row as u8, col as u8) else {
                    continue;
                };
                let piece = match symbol {
                    '.' => None,
                    other => Some(Piece::from_ascii(other).ok_or_else(|| {
                        RuleError::InvalidSetup(format!("unknown piece symbol {other:?}"))
                    })?),
                };
                self.board.set(position, piece);
            }
        }
        Ok(self)
    }

    pub fn piece(mut self, position: Position, piece: Piece) -> Self {
        self.board.set(position, Some(piece));
        self
    }

    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    pub fn castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    pub fn en_passant_target(mut self, target: Option<Position>) -> Self {
        self.en_passant_target = target;
        self
    }

    /// Validates the setup. Castling rights whose king or rook is not on its
    /// home square are dropped rather than rejected.
    pub fn build(self) -> RuleResult<GameState> {
        let mut king_positions = [None, None];
        for color in [Color::White, Color::Black] {
            let kings = self.board.count(PieceKind::King, color);
            if kings != 1 {
                return Err(RuleError::InvalidSetup(format!(
                    "{color} must have exactly one king, found {kings}"
                )));
            }
            king_positions[color.index()] = self.board.find_king(color);
        }
        let [Some(white_king), Some(black_king)] = king_positions else {
            return Err(RuleError::InvalidSetup("king lookup failed".to_owned()));
        };

        for col in 0..BOARD_SIZE as u8 {
            for row in [0u8, (BOARD_SIZE - 1) as u8] {
                let Some(position) = Position::new(row, col) else {
                    continue;
                };
                if matches!(self.board.get(position), Some(p) if p.kind == PieceKind::Pawn) {
                    return Err(RuleError::InvalidSetup(format!(
                        "pawn on back row at {position}"
                    )));
                }
            }
        }

        let mut rights = self.castling_rights;
        for color in [Color::White, Color::Black] {
            if self.board.get(king_home(color)) != Some(Piece::new(PieceKind::King, color)) {
                rights.clear_color(color);
                continue;
            }
            for side in [CastleSide::Kingside, CastleSide::Queenside] {
                if self.board.get(rook_home(color, side)) != Some(Piece::new(PieceKind::Rook, color)) {
                    rights.clear(color, side);
                }
            }
        }

        if let Some(target) = self.en_passant_target {
            validate_en_passant_target(&self.board, self.side_to_move, target)?;
        }

        let state = GameState {
            board: self.board,
            side_to_move: self.side_to_move,
            king_positions: [white_king, black_king],
            castling_rights: rights,
            en_passant_target: self.en_passant_target,
        };
        let waiting = state.side_to_move.opposite();
        if is_king_in_check(&state, waiting) {
            return Err(RuleError::InvalidSetup(format!(
                "{waiting} is in check but it is not their move"
            )));
        }
        Ok(state)
    }
}

/// The target must be the square skipped by the opponent's last double advance.
fn validate_en_passant_target(board: &Board, side_to_move: Color, target: Position) -> RuleResult<()> {
    let advanced = side_to_move.opposite();
    // Skipped square sits one row in front of the advancing side's pawn start row.
    let expected_row = home_row(advanced) as i8 + 2 * advanced.pawn_direction();
    let pawn_square = target.offset(advanced.pawn_direction(), 0);
    let pawn_ok = pawn_square
        .and_then(|p| board.get(p))
        .is_some_and(|p| p.is(PieceKind::Pawn, advanced));
    let origin_empty = target
        .offset(-advanced.pawn_direction(), 0)
        .is_some_and(|p| board.is_empty(p));
    if target.row() as i8 != expected_row || !board.is_empty(target) || !pawn_ok || !origin_empty {
        return Err(RuleError::InvalidSetup(format!(
            "en-passant target {target} does not follow a double pawn advance"
        )));
    }
    Ok(())
}
