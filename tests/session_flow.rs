use std::thread;

use minimax_chess::engines::engine_random::RandomEngine;
use minimax_chess::errors::{RuleError, SessionError};
use minimax_chess::game_state::chess_types::*;
use minimax_chess::search::alpha_beta::SearchConfig;
use minimax_chess::session::game_session::{GameOutcome, GameSession, SessionConfig};
use minimax_chess::utils::engine_match_harness::{play_session_match, MatchConfig};
use minimax_chess::utils::long_algebraic::algebraic_to_position;

fn sq(name: &str) -> Position {
    algebraic_to_position(name).expect("valid square")
}

fn shallow(ai_color: Option<Color>) -> SessionConfig {
    SessionConfig {
        search: SearchConfig { depth: 2 },
        ai_color,
    }
}

#[test]
fn ai_opens_then_human_replies() {
    let mut session = GameSession::new(shallow(Some(Color::White)));
    let ai = session.request_ai_move().expect("ai move");
    assert_eq!(ai.mover, Color::White);
    assert_eq!(session.state().side_to_move(), Color::Black);

    let reply = session.request_move(sq("e7"), sq("e5"), None).expect("human move");
    assert_eq!(reply.mover, Color::Black);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[1].ply, 2);
    assert!(session.history()[0].played_at <= session.history()[1].played_at);
}

#[test]
fn human_input_is_refused_while_thinking() {
    let mut session = GameSession::new(shallow(Some(Color::White)));
    session.start_ai_search().expect("search starts");
    assert!(session.is_thinking());

    let err = session.request_move(sq("e2"), sq("e4"), None).expect_err("busy");
    assert!(matches!(err, SessionError::SearchInProgress));
    assert!(matches!(session.start_ai_search(), Err(SessionError::SearchInProgress)));

    let report = loop {
        if let Some(report) = session.poll_ai_move().expect("poll") {
            break report;
        }
        thread::yield_now();
    };
    assert_eq!(report.mover, Color::White);
    assert!(!session.is_thinking());
    assert!(matches!(session.poll_ai_move(), Err(SessionError::NoSearchPending)));
}

#[test]
fn ai_refuses_the_human_side() {
    let mut session = GameSession::new(shallow(Some(Color::Black)));
    assert!(matches!(session.start_ai_search(), Err(SessionError::NotAiTurn)));
    assert!(matches!(session.wait_ai_move(), Err(SessionError::NoSearchPending)));
}

#[test]
fn human_may_not_move_for_the_engine() {
    let mut session = GameSession::new(shallow(Some(Color::White)));
    let before = session.snapshot();
    let err = session.request_move(sq("e2"), sq("e4"), None).expect_err("engine's side");
    assert!(matches!(err, SessionError::AiTurn));
    assert_eq!(session.snapshot(), before);
    assert!(session.history().is_empty());

    session.request_ai_move().expect("engine moves");
    session.request_move(sq("e7"), sq("e5"), None).expect("human side");
}

#[test]
fn illegal_human_move_changes_nothing() {
    let mut session = GameSession::new(shallow(None));
    let before = session.snapshot();
    let err = session.request_move(sq("e2"), sq("e5"), None).expect_err("illegal");
    assert!(matches!(err, SessionError::Rule(RuleError::IllegalMove(_))));
    assert_eq!(session.snapshot(), before);
    assert!(session.history().is_empty());

    let err = session.request_move(sq("e7"), sq("e5"), None).expect_err("not black's turn");
    assert!(matches!(err, SessionError::Rule(RuleError::WrongSide { .. })));
}

#[test]
fn fools_mate_ends_the_session() {
    let mut session = GameSession::new(shallow(None));
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
        let report = session.request_move(sq(from), sq(to), None).expect("legal");
        assert!(!report.is_check);
    }
    let mate = session.request_move(sq("d8"), sq("h4"), None).expect("legal");
    assert!(mate.is_check);
    assert!(mate.is_checkmate);
    assert!(!mate.is_king_captured);
    assert_eq!(session.outcome(), Some(GameOutcome::Checkmate { winner: Color::Black }));

    let err = session.request_move(sq("a2"), sq("a3"), None).expect_err("game over");
    assert!(matches!(err, SessionError::GameOver(GameOutcome::Checkmate { .. })));
}

#[test]
fn ai_with_no_moves_reports_game_over_instead_of_searching() {
    let state = GameState::builder()
        .piece(sq("a8"), Piece::black(PieceKind::King))
        .piece(sq("b6"), Piece::white(PieceKind::Queen))
        .piece(sq("h1"), Piece::white(PieceKind::King))
        .side_to_move(Color::Black)
        .build()
        .expect("valid setup");
    let mut session = GameSession::from_position(shallow(Some(Color::Black)), state);
    let err = session.start_ai_search().expect_err("stuck");
    assert!(matches!(
        err,
        SessionError::GameOver(GameOutcome::NoLegalMoves { stuck: Color::Black })
    ));
    assert!(!session.is_thinking());
}

#[test]
fn ai_delivers_mate_in_one() {
    let state = GameState::builder()
        .piece(sq("g8"), Piece::black(PieceKind::King))
        .piece(sq("f7"), Piece::black(PieceKind::Pawn))
        .piece(sq("g7"), Piece::black(PieceKind::Pawn))
        .piece(sq("h7"), Piece::black(PieceKind::Pawn))
        .piece(sq("a1"), Piece::white(PieceKind::Rook))
        .piece(sq("g1"), Piece::white(PieceKind::King))
        .build()
        .expect("valid setup");
    let mut session = GameSession::from_position(shallow(Some(Color::White)), state);
    let report = session.request_ai_move().expect("ai move");
    assert_eq!(report.mv, Move::new(sq("a1"), sq("a8")));
    assert!(report.is_checkmate);
    assert_eq!(session.outcome(), Some(GameOutcome::Checkmate { winner: Color::White }));
}

#[test]
fn underpromotion_is_recorded() {
    let state = GameState::builder()
        .piece(sq("e1"), Piece::white(PieceKind::King))
        .piece(sq("h8"), Piece::black(PieceKind::King))
        .piece(sq("b7"), Piece::white(PieceKind::Pawn))
        .build()
        .expect("valid setup");
    let mut session = GameSession::from_position(shallow(None), state);
    let report = session
        .request_move(sq("b7"), sq("b8"), Some(PieceKind::Knight))
        .expect("promotion");
    assert_eq!(report.promotion, Some(PieceKind::Knight));
    assert_eq!(session.snapshot().piece_at(sq("b8")), Some(Piece::white(PieceKind::Knight)));
    assert_eq!(session.history()[0].promotion, Some(PieceKind::Knight));
}

#[test]
fn match_against_random_opponent_stays_legal() {
    let mut session = GameSession::new(SessionConfig {
        search: SearchConfig { depth: 1 },
        ai_color: Some(Color::White),
    });
    let mut opponent = RandomEngine::seeded(11);
    let result = play_session_match(&mut session, &mut opponent, MatchConfig { max_plies: 30 }, |_, _| {})
        .expect("match completes");
    assert!(result.plies <= 30);
    assert_eq!(result.moves_lan.len(), result.plies);
    assert_eq!(result.final_snapshot, session.snapshot());
    if result.outcome.is_none() {
        assert_eq!(result.plies, 30);
    }
}
