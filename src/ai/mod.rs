//! Computer-controlled seats.

pub mod policy;

pub use policy::{play_turn, GreedyOpponent, OpponentPolicy, MAX_TURN_COMMANDS};
