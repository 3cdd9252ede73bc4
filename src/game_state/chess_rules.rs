//! Canonical chess-rule constants.
//!
//! Board geometry, the standard starting layout and the fixed squares that
//! castling depends on.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Position};

pub const BOARD_SIZE: usize = 8;

pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_COL: u8 = 7;
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// Back rank from column 0 to column 7.
pub const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[inline]
pub const fn home_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

#[inline]
pub const fn promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Position {
    Position::new_unchecked(home_row(color), KING_HOME_COL)
}

#[inline]
pub const fn rook_home(color: Color, side: CastleSide) -> Position {
    match side {
        CastleSide::Kingside => Position::new_unchecked(home_row(color), KINGSIDE_ROOK_COL),
        CastleSide::Queenside => Position::new_unchecked(home_row(color), QUEENSIDE_ROOK_COL),
    }
}

/// Where the king lands when castling.
#[inline]
pub const fn castle_king_target(color: Color, side: CastleSide) -> Position {
    match side {
        CastleSide::Kingside => Position::new_unchecked(home_row(color), 6),
        CastleSide::Queenside => Position::new_unchecked(home_row(color), 2),
    }
}

/// Where the rook lands when castling.
#[inline]
pub const fn castle_rook_target(color: Color, side: CastleSide) -> Position {
    match side {
        CastleSide::Kingside => Position::new_unchecked(home_row(color), 5),
        CastleSide::Queenside => Position::new_unchecked(home_row(color), 3),
    }
}

/// Castle side implied by a king destination column, if it is a castling column.
#[inline]
pub const fn castle_side_for_target_col(col: u8) -> Option<CastleSide> {
    match col {
        6 => Some(CastleSide::Kingside),
        2 => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Which castling right (if any) is tied to a rook standing on `position`.
pub fn castle_right_for_rook_home(position: Position) -> Option<(Color, CastleSide)> {
    [Color::White, Color::Black]
        .into_iter()
        .flat_map(|color| {
            [CastleSide::Kingside, CastleSide::Queenside]
                .into_iter()
                .map(move |side| (color, side))
        })
        .find(|&(color, side)| rook_home(color, side) == position)
}
