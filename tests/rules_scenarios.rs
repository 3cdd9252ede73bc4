use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use minimax_chess::errors::RuleError;
use minimax_chess::game_state::chess_types::*;
use minimax_chess::move_generation::legal_move_apply::{apply_legal_move, make_move, unmake_move};
use minimax_chess::move_generation::legal_move_checks::{is_checkmate, is_king_in_check, is_square_attacked};
use minimax_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use minimax_chess::move_generation::move_generator::MoveGenerator;
use minimax_chess::move_generation::perft::perft;
use minimax_chess::search::alpha_beta::{find_best_move, SearchConfig};
use minimax_chess::search::board_scoring::MaterialScorer;
use minimax_chess::utils::long_algebraic::{algebraic_to_position, long_algebraic_to_move};

fn sq(name: &str) -> Position {
    algebraic_to_position(name).expect("valid square")
}

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        let (mv, promotion) = long_algebraic_to_move(text).expect("valid notation");
        apply_legal_move(game, mv, promotion).unwrap_or_else(|e| panic!("{text} rejected: {e}"));
    }
}

fn is_legal(game: &GameState, text: &str) -> bool {
    let (mv, _) = long_algebraic_to_move(text).expect("valid notation");
    LegalMoveGenerator
        .legal_moves_from(game, mv.from)
        .expect("generation succeeds")
        .contains(&mv.to)
}

#[test]
fn twenty_moves_for_each_side_from_the_start() {
    let mut game = GameState::new_game();
    let white = LegalMoveGenerator.all_legal_moves(&game, Color::White).expect("moves");
    assert_eq!(white.len(), 20);

    play(&mut game, &["e2e4"]);
    let black = LegalMoveGenerator.all_legal_moves(&game, Color::Black).expect("moves");
    assert_eq!(black.len(), 20);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = GameState::new_game();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(is_king_in_check(&game, Color::White));
    assert_eq!(is_checkmate(&game, Color::White), Ok(true));
    for (from, _) in game.board().pieces_of(Color::White) {
        assert!(LegalMoveGenerator.legal_moves_from(&game, from).expect("moves").is_empty());
    }
}

#[test]
fn en_passant_only_on_the_very_next_move() {
    let mut game = GameState::new_game();
    play(&mut game, &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    assert_eq!(game.en_passant_target(), Some(sq("e3")));
    assert!(is_legal(&game, "d4e3"));

    let mut taken = game.clone();
    play(&mut taken, &["d4e3"]);
    assert_eq!(taken.piece_at(sq("e4")), None);
    assert_eq!(taken.piece_at(sq("e3")), Some(Piece::black(PieceKind::Pawn)));

    play(&mut game, &["h7h6", "h2h3"]);
    assert_eq!(game.en_passant_target(), None);
    assert!(!is_legal(&game, "d4e3"));
}

#[test]
fn white_may_not_use_its_own_double_push_target() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "a7a6", "d2d4"]);
    // The target belongs to White's pawn; no White pawn may move diagonally onto it.
    assert_eq!(game.en_passant_target(), Some(sq("d3")));
    assert!(!is_legal(&game, "c2d3"));
}

#[test]
fn castling_after_clearing_the_path_and_never_after_the_king_moves() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    assert!(is_legal(&game, "e1g1"));

    let mut castled = game.clone();
    play(&mut castled, &["e1g1"]);
    assert_eq!(castled.piece_at(sq("g1")), Some(Piece::white(PieceKind::King)));
    assert_eq!(castled.piece_at(sq("f1")), Some(Piece::white(PieceKind::Rook)));

    play(&mut game, &["e1e2", "f8c5", "e2e1", "d7d6"]);
    assert_eq!(game.king_position(Color::White), sq("e1"));
    assert!(!is_legal(&game, "e1g1"));
    assert!(!game.castling_rights().has(Color::White, CastleSide::Kingside));
}

#[test]
fn rook_move_drops_only_its_own_side() {
    let mut game = GameState::new_game();
    play(&mut game, &["h2h4", "a7a6", "h1h3", "a6a5", "h3h1", "a5a4", "g2g3", "a4a3", "g1f3", "b7b6", "f1g2", "b6b5"]);
    assert!(!is_legal(&game, "e1g1"));
    assert!(game.castling_rights().has(Color::White, CastleSide::Queenside));
}

#[test]
fn kiwipete_perft_counts() {
    let game = GameState::builder()
        .grid([
            "r...k..r",
            "p.ppqpb.",
            "bn..pnp.",
            "...PN...",
            ".p..P...",
            "..N..Q.p",
            "PPPBBPPP",
            "R...K..R",
        ])
        .expect("grid")
        .castling_rights(CastlingRights::ALL)
        .build()
        .expect("valid setup");

    let d1 = perft(&LegalMoveGenerator, &game, 1).expect("d1");
    assert_eq!(d1.nodes, 48);
    assert_eq!(d1.captures, 8);
    assert_eq!(d1.castles, 2);

    let d2 = perft(&LegalMoveGenerator, &game, 2).expect("d2");
    assert_eq!(d2.nodes, 2039);
    assert_eq!(d2.captures, 351);
    assert_eq!(d2.en_passant, 1);
    assert_eq!(d2.castles, 91);
    assert_eq!(d2.checks, 3);
}

#[test]
fn illegal_request_leaves_state_unchanged() {
    let mut game = GameState::new_game();
    let before = game.clone();
    let (mv, _) = long_algebraic_to_move("e1e2").expect("notation");
    assert_eq!(apply_legal_move(&mut game, mv, None), Err(RuleError::IllegalMove(mv)));
    assert_eq!(game, before);
}

#[test]
fn depth_one_search_takes_the_free_queen() {
    let game = GameState::builder()
        .grid([
            "....k...",
            "........",
            "........",
            "...q....",
            "....P...",
            "........",
            "........",
            "....K...",
        ])
        .expect("grid")
        .build()
        .expect("valid setup");
    let mut working = game.clone();
    let result = find_best_move(&mut working, &LegalMoveGenerator, &MaterialScorer, SearchConfig { depth: 1 })
        .expect("search succeeds");
    assert_eq!(result.best_move, Move::new(sq("e4"), sq("d5")));
    assert_eq!(working, game);
}

#[test]
fn random_playouts_never_leave_the_king_attacked() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..8 {
        let mut game = GameState::new_game();
        for _ in 0..80 {
            let mover = game.side_to_move();
            let moves = LegalMoveGenerator.all_legal_moves(&game, mover).expect("moves");
            let Some(&chosen) = moves.choose(&mut rng) else {
                break;
            };

            for &mv in &moves {
                assert_ne!(
                    game.piece_at(mv.to).map(|p| p.kind),
                    Some(PieceKind::King),
                    "legal move captures a king"
                );
                let before = game.clone();
                let undo = make_move(&mut game, mv, None).expect("legal move applies");
                assert!(
                    !is_square_attacked(game.board(), game.king_position(mover), mover.opposite()),
                    "{mv} leaves {mover} in check"
                );
                assert_eq!(game.board().find_king(mover), Some(game.king_position(mover)));
                unmake_move(&mut game, undo);
                assert_eq!(game, before, "make/unmake round trip for {mv}");
            }

            apply_legal_move(&mut game, chosen, None).expect("chosen move is legal");
        }
    }
}
