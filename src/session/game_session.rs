//! Interactive game session.
//!
//! `GameSession` is the boundary a presentation layer talks to: it validates
//! human moves, runs the engine on a background worker, reports check, mate
//! and king-capture after every committed move, and keeps a timestamped
//! history. Only one search may be in flight, and no move is accepted while
//! it runs.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::Engine;
use crate::errors::{RuleError, SessionError, SessionResult};
use crate::game_state::chess_rules::promotion_row;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::BoardSnapshot;
use crate::move_generation::legal_move_apply::apply_legal_move;
use crate::move_generation::legal_move_checks::{has_any_legal_move, is_king_in_check};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::alpha_beta::SearchConfig;
use crate::session::search_worker::{SearchWorker, WorkerReply};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub search: SearchConfig,
    /// Side played by the engine. `None` leaves both sides to the caller.
    pub ai_color: Option<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            ai_color: Some(Color::White),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    /// A king was taken outright. Legal play never gets here.
    KingCaptured { winner: Color },
    /// The side to move has no legal move but is not in check.
    NoLegalMoves { stuck: Color },
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            GameOutcome::KingCaptured { winner } => write!(f, "{winner} wins by capturing the king"),
            GameOutcome::NoLegalMoves { stuck } => write!(f, "{stuck} has no legal moves"),
        }
    }
}

/// What happened on one committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub mover: Color,
    pub mv: Move,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Piece>,
    /// The opponent of `mover` is in check.
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_king_captured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based half-move number.
    pub ply: usize,
    pub mover: Color,
    pub mv: Move,
    pub promotion: Option<PieceKind>,
    pub captured: Option<Piece>,
    pub played_at: DateTime<Utc>,
}

pub struct GameSession {
    state: GameState,
    config: SessionConfig,
    /// Lent to the worker while a search runs.
    engine: Option<Box<dyn Engine>>,
    pending: Option<SearchWorker>,
    outcome: Option<GameOutcome>,
    history: Vec<MoveRecord>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::from_position(config, GameState::new_game())
    }

    pub fn from_position(config: SessionConfig, state: GameState) -> Self {
        Self::with_engine(config, state, Box::new(MinimaxEngine::new(config.search)))
    }

    pub fn with_engine(config: SessionConfig, state: GameState, engine: Box<dyn Engine>) -> Self {
        Self {
            state,
            config,
            engine: Some(engine),
            pending: None,
            outcome: None,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.state.snapshot()
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.config.ai_color == Some(self.state.side_to_move())
    }

    /// Legal destinations for the piece on `position`, for highlighting.
    /// Empty unless that piece belongs to the side to move.
    pub fn legal_moves(&self, position: Position) -> SessionResult<Vec<Position>> {
        match self.state.piece_at(position) {
            Some(piece) if piece.color == self.state.side_to_move() => Ok(LegalMoveGenerator
                .legal_moves_from(&self.state, position)
                .map_err(RuleError::from)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Applies a move for the side to move when that side is not the engine's.
    /// Rejected requests leave the game untouched.
    pub fn request_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> SessionResult<MoveReport> {
        self.ensure_idle()?;
        if self.is_ai_turn() {
            return Err(SessionError::AiTurn);
        }
        self.commit(Move::new(from, to), promotion).inspect_err(|e| {
            warn!(from = %from, to = %to, error = %e, "move rejected");
        })
    }

    /// Hands a copy of the position to a background search.
    pub fn start_ai_search(&mut self) -> SessionResult<()> {
        self.ensure_idle()?;
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn);
        }
        if let Some(outcome) = self.refresh_outcome()? {
            return Err(SessionError::GameOver(outcome));
        }

        let engine = self.take_engine();
        self.pending = Some(SearchWorker::spawn(self.state.clone(), engine)?);
        Ok(())
    }

    /// Commits the engine's move once it is ready; `Ok(None)` while thinking.
    pub fn poll_ai_move(&mut self) -> SessionResult<Option<MoveReport>> {
        let worker = self.pending.as_mut().ok_or(SessionError::NoSearchPending)?;
        let Some(reply) = worker.try_result() else {
            return Ok(None);
        };
        self.pending = None;
        self.finish_ai_move(reply).map(Some)
    }

    /// Blocks until the engine's move is committed.
    pub fn wait_ai_move(&mut self) -> SessionResult<MoveReport> {
        let worker = self.pending.take().ok_or(SessionError::NoSearchPending)?;
        self.finish_ai_move(worker.wait())
    }

    pub fn request_ai_move(&mut self) -> SessionResult<MoveReport> {
        self.start_ai_search()?;
        self.wait_ai_move()
    }

    /// Ends the game if the side to move cannot move, and returns the outcome.
    pub fn refresh_outcome(&mut self) -> SessionResult<Option<GameOutcome>> {
        if self.outcome.is_none() {
            let side = self.state.side_to_move();
            if !has_any_legal_move(&self.state, side).map_err(RuleError::from)? {
                let outcome = if is_king_in_check(&self.state, side) {
                    GameOutcome::Checkmate {
                        winner: side.opposite(),
                    }
                } else {
                    GameOutcome::NoLegalMoves { stuck: side }
                };
                info!(%outcome, "game over");
                self.outcome = Some(outcome);
            }
        }
        Ok(self.outcome)
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.pending.is_some() {
            return Err(SessionError::SearchInProgress);
        }
        if let Some(outcome) = self.outcome {
            return Err(SessionError::GameOver(outcome));
        }
        Ok(())
    }

    fn take_engine(&mut self) -> Box<dyn Engine> {
        self.engine
            .take()
            .unwrap_or_else(|| Box::new(MinimaxEngine::new(self.config.search)) as Box<dyn Engine>)
    }

    fn finish_ai_move(&mut self, reply: SessionResult<WorkerReply>) -> SessionResult<MoveReport> {
        let reply = reply.inspect_err(|e| warn!(error = %e, "search worker failed"))?;
        self.engine = Some(reply.engine);
        let output = reply.result.inspect_err(|e| warn!(error = %e, "search failed"))?;
        self.commit(output.best_move, None)
    }

    fn commit(&mut self, mv: Move, promotion: Option<PieceKind>) -> SessionResult<MoveReport> {
        let mover = self.state.side_to_move();
        let promoted_to = self.promotion_for(mv, promotion);
        let captured = apply_legal_move(&mut self.state, mv, promotion)?;
        let promotion = promoted_to;

        let opponent = mover.opposite();
        let is_king_captured = captured.is_some_and(|p| p.kind == PieceKind::King);
        let is_check = !is_king_captured && is_king_in_check(&self.state, opponent);
        let opponent_stuck =
            !is_king_captured && !has_any_legal_move(&self.state, opponent).map_err(RuleError::from)?;
        let is_checkmate = is_check && opponent_stuck;

        if is_king_captured {
            self.outcome = Some(GameOutcome::KingCaptured { winner: mover });
        } else if is_checkmate {
            self.outcome = Some(GameOutcome::Checkmate { winner: mover });
        } else if opponent_stuck {
            self.outcome = Some(GameOutcome::NoLegalMoves { stuck: opponent });
        }

        self.history.push(MoveRecord {
            ply: self.history.len() + 1,
            mover,
            mv,
            promotion,
            captured,
            played_at: Utc::now(),
        });

        info!(
            ply = self.history.len(),
            side = %mover,
            mv = %move_to_long_algebraic(mv, promotion),
            captured = ?captured.map(|p| p.kind),
            check = is_check,
            mate = is_checkmate,
            "move played"
        );

        Ok(MoveReport {
            mover,
            mv,
            promotion,
            captured,
            is_check,
            is_checkmate,
            is_king_captured,
        })
    }

    /// Kind a pawn will become if `mv` lands it on its last row.
    fn promotion_for(&self, mv: Move, requested: Option<PieceKind>) -> Option<PieceKind> {
        let piece = self.state.piece_at(mv.from)?;
        (piece.kind == PieceKind::Pawn && mv.to.row() == promotion_row(piece.color))
            .then(|| requested.unwrap_or(PieceKind::Queen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_random::RandomEngine;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test square on board")
    }

    fn two_player() -> SessionConfig {
        SessionConfig {
            search: SearchConfig { depth: 1 },
            ai_color: None,
        }
    }

    #[test]
    fn pawn_reaching_last_row_defaults_to_queen() {
        let state = GameState::builder()
            .piece(at(7, 4), Piece::white(PieceKind::King))
            .piece(at(0, 7), Piece::black(PieceKind::King))
            .piece(at(1, 0), Piece::white(PieceKind::Pawn))
            .build()
            .expect("valid setup");
        let mut session = GameSession::from_position(two_player(), state);
        let report = session.request_move(at(1, 0), at(0, 0), None).expect("promotion");
        assert_eq!(report.promotion, Some(PieceKind::Queen));
        assert_eq!(session.history()[0].promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn quiet_move_has_no_promotion() {
        let mut session = GameSession::new(two_player());
        let report = session.request_move(at(6, 4), at(4, 4), None).expect("e4");
        assert_eq!(report.promotion, None);
        assert_eq!(report.captured, None);
        assert_eq!(session.history()[0].ply, 1);
    }

    #[test]
    fn stalemating_move_ends_the_game() {
        let state = GameState::builder()
            .piece(at(0, 0), Piece::black(PieceKind::King))
            .piece(at(3, 1), Piece::white(PieceKind::Queen))
            .piece(at(7, 7), Piece::white(PieceKind::King))
            .build()
            .expect("valid setup");
        let mut session = GameSession::from_position(two_player(), state);
        let report = session.request_move(at(3, 1), at(2, 1), None).expect("Qb6");
        assert!(!report.is_check);
        assert!(!report.is_checkmate);
        assert_eq!(
            session.outcome(),
            Some(GameOutcome::NoLegalMoves { stuck: Color::Black })
        );
    }

    #[test]
    fn engine_is_returned_after_each_search() {
        let config = SessionConfig {
            search: SearchConfig { depth: 1 },
            ai_color: Some(Color::White),
        };
        let mut session =
            GameSession::with_engine(config, GameState::new_game(), Box::new(RandomEngine::seeded(3)));
        session.request_ai_move().expect("first ai move");
        assert!(session.engine.as_ref().is_some_and(|e| e.name() == "random"));
    }

    #[test]
    fn highlights_only_the_side_to_move() {
        let session = GameSession::new(two_player());
        assert_eq!(session.legal_moves(at(6, 4)).expect("white pawn").len(), 2);
        assert!(session.legal_moves(at(1, 4)).expect("black pawn").is_empty());
        assert!(session.legal_moves(at(4, 4)).expect("empty square").is_empty());
    }

    #[test]
    fn outcome_display() {
        let outcome = GameOutcome::Checkmate { winner: Color::Black };
        assert_eq!(outcome.to_string(), "Black wins by checkmate");
    }
}
