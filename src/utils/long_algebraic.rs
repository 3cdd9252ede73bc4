//! Coordinate notation: squares as `e4`, moves as `e2e4` with an optional
//! trailing promotion letter (`e7e8q`).
//!
//! Row 0 is rank 8 and row 7 is rank 1, so `a8` is `(0, 0)` and `h1` is `(7, 7)`.

use std::fmt;

use crate::errors::NotationError;
use crate::game_state::chess_types::*;

pub fn position_to_algebraic(position: Position) -> String {
    let file = char::from(b'a' + position.col());
    let rank = char::from(b'8' - position.row());
    format!("{file}{rank}")
}

pub fn algebraic_to_position(square: &str) -> Result<Position, NotationError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(NotationError::InvalidSquare(square.to_owned()));
    }

    Position::new(b'8' - rank, file - b'a').ok_or_else(|| NotationError::InvalidSquare(square.to_owned()))
}

pub fn move_to_long_algebraic(mv: Move, promotion: Option<PieceKind>) -> String {
    let mut out = position_to_algebraic(mv.from);
    out.push_str(&position_to_algebraic(mv.to));
    if let Some(kind) = promotion.filter(|k| k.is_promotion_target()) {
        out.push(kind.letter());
    }
    out
}

/// Parses `e2e4` / `e7e8n`. Only the syntax is checked; legality is the
/// caller's concern.
pub fn long_algebraic_to_move(text: &str) -> Result<(Move, Option<PieceKind>), NotationError> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(NotationError::InvalidMove(text.to_owned()));
    }

    let from = algebraic_to_position(&text[0..2])?;
    let to = algebraic_to_position(&text[2..4])?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(letter) => match PieceKind::from_letter(letter) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(NotationError::InvalidPromotion(letter)),
        },
    };

    Ok((Move::new(from, to), promotion))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&position_to_algebraic(*self))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
