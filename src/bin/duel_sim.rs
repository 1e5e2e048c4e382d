//! Headless AI-vs-AI match.
//!
//! ```text
//! duel-sim [SEED] [MAX_TURNS]
//! RUST_LOG=duel_ccg=debug duel-sim 42
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use duel_ccg::ai::play_turn;
use duel_ccg::{CardCatalog, EffectRegistry, GameEngine, GreedyOpponent, MatchConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_turns: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(200);

    let catalog = CardCatalog::standard();
    let config = MatchConfig::new().with_seed(seed);
    let mut engine = GameEngine::new(config, &catalog, Arc::new(EffectRegistry::standard()));

    while !engine.is_over() && engine.state().turn_number <= max_turns {
        let seat = engine.active_player();
        let turn = engine.state().turn_number;
        play_turn(&GreedyOpponent, &mut engine, seat);

        if !engine.is_over() && engine.active_player() == seat && engine.state().turn_number == turn {
            warn!(%seat, turn, "turn stalled");
            break;
        }
        for event in engine.drain_events() {
            info!(?event, "event");
        }
    }

    match engine.outcome() {
        Some(result) => info!(
            winner = %result.winner(),
            turns = engine.state().turn_number,
            "match finished"
        ),
        None => info!(turns = engine.state().turn_number, "no winner within turn limit"),
    }
}
