//! Uniform random mover.
//!
//! Used as a weak match opponent and to drive randomized playouts in tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<EngineOutput, SearchError> {
        let mover = game_state.side_to_move();
        let legal_moves = self.move_generator.all_legal_moves(game_state, mover)?;
        let picked = legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMoves(mover))?;

        Ok(EngineOutput {
            best_move: picked,
            score: None,
            nodes: legal_moves.len() as u64,
        })
    }
}
