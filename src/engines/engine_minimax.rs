use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::alpha_beta::{find_best_move, SearchConfig};
use crate::search::board_scoring::MaterialScorer;

/// Fixed-depth alpha-beta over material plus check.
pub struct MinimaxEngine {
    config: SearchConfig,
    move_generator: LegalMoveGenerator,
    scorer: MaterialScorer,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            move_generator: LegalMoveGenerator,
            scorer: MaterialScorer,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, SearchError> {
        let mut working = game_state.clone();
        let result = find_best_move(&mut working, &self.move_generator, &self.scorer, self.config)?;
        Ok(EngineOutput {
            best_move: result.best_move,
            score: Some(result.score),
            nodes: result.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_move_comes_from_white_pieces() {
        let game = GameState::new_game();
        let mut engine = MinimaxEngine::new(SearchConfig { depth: 2 });
        let out = engine.choose_move(&game).expect("search succeeds");
        let mover = game.piece_at(out.best_move.from).expect("origin occupied");
        assert_eq!(mover.color, Color::White);
        assert!(out.nodes > 0);
    }
}
