//! Head-to-head games between the session's engine and an opponent `Engine`.
//!
//! The session plays its configured AI side; the opponent plays the other
//! one (or both, when the session has no AI side). Games end on checkmate,
//! king capture, a side with no moves, or after `max_plies` half-moves.

use crate::engines::engine_trait::Engine;
use crate::errors::{SessionError, SessionResult};
use crate::game_state::game_state::BoardSnapshot;
use crate::session::game_session::{GameOutcome, GameSession, MoveReport};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub max_plies: u16,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_plies: 200 }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    /// `None` when the ply cap was reached first.
    pub outcome: Option<GameOutcome>,
    pub plies: usize,
    pub moves_lan: Vec<String>,
    pub final_snapshot: BoardSnapshot,
}

/// Plays until the game ends or the ply cap is hit. `on_ply` sees every
/// committed move together with the position after it.
pub fn play_session_match<F>(
    session: &mut GameSession,
    opponent: &mut dyn Engine,
    config: MatchConfig,
    mut on_ply: F,
) -> SessionResult<MatchResult>
where
    F: FnMut(&MoveReport, &BoardSnapshot),
{
    let mut moves_lan = Vec::new();

    for _ in 0..config.max_plies {
        if session.refresh_outcome()?.is_some() {
            break;
        }

        let report = if session.is_ai_turn() {
            session.request_ai_move()?
        } else {
            let output = opponent.choose_move(session.state()).map_err(SessionError::from)?;
            session.request_move(output.best_move.from, output.best_move.to, None)?
        };

        moves_lan.push(move_to_long_algebraic(report.mv, report.promotion));
        on_ply(&report, &session.snapshot());

        if session.outcome().is_some() {
            break;
        }
    }

    Ok(MatchResult {
        outcome: session.outcome(),
        plies: moves_lan.len(),
        moves_lan,
        final_snapshot: session.snapshot(),
    })
}
