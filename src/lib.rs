//! Crate root module declarations for the minimax chess engine.
//!
//! Exposes the rules core (game state, move generation), the alpha-beta
//! search, pluggable engines, the interactive session layer and utility
//! helpers so the binary, tests and benchmarks can import stable paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_session;
    pub mod search_worker;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod long_algebraic;
    pub mod render_game_state;
}
