//! Fixed-depth minimax with alpha-beta pruning.
//!
//! White maximizes and Black minimizes the White-perspective score from
//! `BoardScorer`. Moves are played in place with `make_move` and always taken
//! back with `unmake_move` before a child's result is inspected, so the caller's
//! state is exactly restored on success and on error.

use tracing::debug;

use crate::errors::{MoveGenerationError, SearchError};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::move_generator::MoveGenerator;
use crate::search::board_scoring::BoardScorer;

/// Score of a side to move with no legal moves at the root. Each ply of
/// distance from the root pulls the score one point toward zero, so a
/// nearer mate always outranks a later one.
pub const MATE_SCORE: i32 = 100_000;
const INFINITY: i32 = MATE_SCORE * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
}

/// Best move for the side to move. The root uses a full window for every
/// child and keeps the first move with the best score.
pub fn find_best_move<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    config: SearchConfig,
) -> Result<SearchResult, SearchError> {
    if config.depth == 0 {
        return Err(SearchError::InvalidDepth);
    }

    let mover = game_state.side_to_move();
    let maximizing = mover.is_white();
    let moves = generator.all_legal_moves(game_state, mover)?;
    if moves.is_empty() {
        return Err(SearchError::NoLegalMoves(mover));
    }

    let mut nodes = 1u64;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let undo = make_search_move(game_state, mv)?;
        let score = alpha_beta(
            game_state,
            generator,
            scorer,
            config.depth - 1,
            1,
            -INFINITY,
            INFINITY,
            &mut nodes,
        );
        unmake_move(game_state, undo);
        let score = score?;

        let improves = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((mv, score));
        }
    }

    let (best_move, score) = best.ok_or(SearchError::NoLegalMoves(mover))?;
    debug!(
        side = %mover,
        depth = config.depth,
        nodes,
        score,
        best = %best_move,
        "search complete"
    );

    Ok(SearchResult {
        best_move,
        score,
        depth: config.depth,
        nodes,
    })
}

/// Alpha-beta value of the position for the side to move.
pub fn minimax<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    depth: u8,
    alpha: i32,
    beta: i32,
    nodes: &mut u64,
) -> Result<i32, SearchError> {
    alpha_beta(game_state, generator, scorer, depth, 0, alpha, beta, nodes)
}

fn alpha_beta<G: MoveGenerator + ?Sized, S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    generator: &G,
    scorer: &S,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> Result<i32, SearchError> {
    *nodes += 1;

    if depth == 0 {
        return Ok(scorer.score(game_state));
    }

    let mover = game_state.side_to_move();
    let maximizing = mover.is_white();
    let moves = generator.all_legal_moves(game_state, mover)?;
    if moves.is_empty() {
        let mate = MATE_SCORE - i32::from(ply);
        return Ok(if maximizing { -mate } else { mate });
    }

    let mut best = if maximizing { -INFINITY } else { INFINITY };

    for mv in moves {
        let undo = make_search_move(game_state, mv)?;
        let score = alpha_beta(game_state, generator, scorer, depth - 1, ply + 1, alpha, beta, nodes);
        unmake_move(game_state, undo);
        let score = score?;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    Ok(best)
}

fn make_search_move(game_state: &mut GameState, mv: Move) -> Result<UndoState, SearchError> {
    make_move(game_state, mv, None).map_err(|e| {
        SearchError::MoveGeneration(MoveGenerationError::InvalidState(format!(
            "search could not play {mv}: {e}"
        )))
    })
}
