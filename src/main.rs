use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use minimax_chess::engines::engine_minimax::MinimaxEngine;
use minimax_chess::engines::engine_random::RandomEngine;
use minimax_chess::engines::engine_trait::Engine;
use minimax_chess::game_state::chess_types::Color;
use minimax_chess::search::alpha_beta::SearchConfig;
use minimax_chess::session::game_session::{GameSession, SessionConfig};
use minimax_chess::utils::engine_match_harness::{play_session_match, MatchConfig};
use minimax_chess::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpponentKind {
    Random,
    Minimax,
}

/// Plays the minimax engine (White) against an opponent engine (Black).
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search depth of the White engine, in plies.
    #[arg(long, default_value_t = 3)]
    depth: u8,

    #[arg(long, value_enum, default_value_t = OpponentKind::Random)]
    opponent: OpponentKind,

    /// Search depth when the opponent is also minimax.
    #[arg(long, default_value_t = 2)]
    opponent_depth: u8,

    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    /// Seed for the random opponent.
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final position.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut opponent: Box<dyn Engine> = match args.opponent {
        OpponentKind::Random => match args.seed {
            Some(seed) => Box::new(RandomEngine::seeded(seed)),
            None => Box::new(RandomEngine::new()),
        },
        OpponentKind::Minimax => Box::new(MinimaxEngine::new(SearchConfig {
            depth: args.opponent_depth,
        })),
    };

    let mut session = GameSession::new(SessionConfig {
        search: SearchConfig { depth: args.depth },
        ai_color: Some(Color::White),
    });
    info!(depth = args.depth, opponent = opponent.name(), "starting match");

    let quiet = args.quiet;
    let result = play_session_match(
        &mut session,
        opponent.as_mut(),
        MatchConfig {
            max_plies: args.max_plies,
        },
        |report, snapshot| {
            if !quiet {
                println!(
                    "{} {}{}",
                    report.mover,
                    move_to_long_algebraic(report.mv, report.promotion),
                    if report.is_check { "+" } else { "" }
                );
                println!("{snapshot}\n");
            }
        },
    );

    match result {
        Ok(result) => {
            println!("{}", result.final_snapshot);
            match result.outcome {
                Some(outcome) => println!("{outcome} after {} plies", result.plies),
                None => println!("stopped after {} plies", result.plies),
            }
            println!("{}", result.moves_lan.join(" "));
        }
        Err(e) => {
            error!(error = %e, "match aborted");
            std::process::exit(1);
        }
    }
}
