//! Engine abstraction used by the session and the match harness.
//!
//! Different move-selection strategies sit behind one trait so a game can
//! pit any two of them against each other.

use crate::errors::SearchError;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOutput {
    pub best_move: Move,
    /// White-perspective evaluation, when the engine computes one.
    pub score: Option<i32>,
    pub nodes: u64,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Picks a move for `game_state.side_to_move()`. Promotions are to a queen.
    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, SearchError>;
}
