use std::sync::Arc;
use std::thread;

use crate::errors::{MoveGenResult, MoveGenerationError};
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::SpecialMove;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::{has_any_legal_move, is_king_in_check};
use crate::move_generation::move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();
    perft_recurse(generator, &mut scratch, depth, &mut total)?;
    Ok(total)
}

/// Per-root-move node counts, for diffing against a reference engine.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(Move, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }
    let mut scratch = game_state.clone();
    let mover = scratch.side_to_move();
    let mut out = Vec::new();
    for mv in generator.all_legal_moves(&scratch, mover)? {
        let undo = make_checked(&mut scratch, mv)?;
        let mut counts = PerftCounts::default();
        let result = perft_recurse(generator, &mut scratch, depth - 1, &mut counts);
        unmake_move(&mut scratch, undo);
        result?;
        out.push((mv, counts.nodes));
    }
    Ok(out)
}

/// Splits the root moves across one thread each.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mover = game_state.side_to_move();
    let root_moves = generator.all_legal_moves(game_state, mover)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let mut child = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            let result = match make_checked(&mut child, mv) {
                Ok(undo) if depth == 1 => tally_leaf(&child, &undo, &mut local),
                Ok(_) => perft_recurse(generator_ref.as_ref(), &mut child, depth - 1, &mut local),
                Err(e) => Err(e),
            };
            (result, local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let (result, local) = handle
            .join()
            .map_err(|_| MoveGenerationError::InvalidState("perft worker thread panicked".to_owned()))?;
        result?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if depth == 0 {
        counts.nodes += 1;
        return Ok(());
    }

    let mover = game_state.side_to_move();
    for mv in generator.all_legal_moves(game_state, mover)? {
        let undo = make_checked(game_state, mv)?;
        let result = if depth == 1 {
            tally_leaf(game_state, &undo, counts)
        } else {
            perft_recurse(generator, game_state, depth - 1, counts)
        };
        unmake_move(game_state, undo);
        result?;
    }

    Ok(())
}

fn tally_leaf(game_state: &GameState, undo: &UndoState, counts: &mut PerftCounts) -> MoveGenResult<()> {
    counts.nodes += 1;
    if undo.captured_piece.is_some() {
        counts.captures += 1;
    }
    match undo.special {
        SpecialMove::EnPassant => counts.en_passant += 1,
        SpecialMove::Castle { .. } => counts.castles += 1,
        SpecialMove::Promotion(_) => counts.promotions += 1,
        SpecialMove::None => {}
    }

    let defender = game_state.side_to_move();
    if is_king_in_check(game_state, defender) {
        counts.checks += 1;
        if !has_any_legal_move(game_state, defender)? {
            counts.checkmates += 1;
        }
    }
    Ok(())
}

fn make_checked(game_state: &mut GameState, mv: Move) -> MoveGenResult<UndoState> {
    make_move(game_state, mv, None)
        .map_err(|e| MoveGenerationError::InvalidState(format!("make_move failed: {e}")))
}
