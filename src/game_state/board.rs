//! The 8×8 piece grid and its raw mutation primitives.
//!
//! `Board` knows nothing about turn order, castling or en passant. Those live
//! in `GameState`; the raw relocate/revert pair here is what the rules engine
//! builds on.

use crate::game_state::chess_rules::{BACK_RANK, BOARD_SIZE};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::black(*kind));
            board.squares[1][col] = Some(Piece::black(PieceKind::Pawn));
            board.squares[6][col] = Some(Piece::white(PieceKind::Pawn));
            board.squares[7][col] = Some(Piece::white(*kind));
        }
        board
    }

    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize][position.col() as usize]
    }

    #[inline]
    pub fn is_empty(&self, position: Position) -> bool {
        self.get(position).is_none()
    }

    /// Overwrites a square and returns its previous occupant.
    #[inline]
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[position.row() as usize][position.col() as usize],
            piece,
        )
    }

    #[inline]
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.set(position, None)
    }

    /// Moves whatever stands on `from` to `to` and returns what `to` held.
    /// No rule bookkeeping of any kind happens here.
    #[inline]
    pub fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let moving = self.take(from);
        self.set(to, moving)
    }

    /// Exact inverse of [`Board::relocate`].
    #[inline]
    pub fn revert(&mut self, from: Position, to: Position, captured: Option<Piece>) {
        let moving = self.set(to, captured);
        self.set(from, moving);
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|p| self.get(p).map(|piece| (p, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceKind::King, color))
            .map(|(p, _)| p)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.is(kind, color)).count()
    }

    #[inline]
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }
}
