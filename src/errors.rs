//! Error types for every layer of the engine.
//!
//! Each layer gets its own enum; higher layers wrap lower ones transparently so
//! a caller can always match on the original cause.

use std::io;

use crate::game_state::chess_types::{Color, Move, PieceKind, Position};
use crate::session::game_session::GameOutcome;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;
pub type RuleResult<T> = Result<T, RuleError>;
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveGenerationError {
    #[error("move generation is not implemented")]
    NotImplemented,
    #[error("no {0} king on the board")]
    MissingKing(Color),
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error("piece on {position} does not belong to {expected}")]
    WrongSide { position: Position, expected: Color },
    #[error("illegal move {0}")]
    IllegalMove(Move),
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    InvalidDepth,
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a search is already in progress")]
    SearchInProgress,
    #[error("no search is pending")]
    NoSearchPending,
    #[error("game is over: {0}")]
    GameOver(GameOutcome),
    #[error("the engine does not play the side to move")]
    NotAiTurn,
    #[error("the side to move is played by the engine")]
    AiTurn,
    #[error("failed to spawn search worker: {0}")]
    WorkerSpawn(#[source] io::Error),
    #[error("search worker panicked")]
    WorkerPanicked,
    #[error("search worker hung up without a result")]
    WorkerDisconnected,
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square '{0}'")]
    InvalidSquare(String),
    #[error("invalid move '{0}'")]
    InvalidMove(String),
    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),
}
