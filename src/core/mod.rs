//! Core match types: identifiers, seats, state, commands, RNG, configuration.
//!
//! Everything here is plain data. Rules live in `rules`; this module only
//! describes what a match is made of.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;
pub mod view;

pub use entity::{InstanceId, ParseInstanceIdError};
pub use player::{InvalidSeatError, PlayerId, PlayerMap, SEATS};
pub use rng::GameRng;
pub use config::{DrawPolicy, MatchConfig};
pub use action::{Command, CommandRecord, PlayMode};
pub use error::CommandError;
pub use state::{GameState, PlayerState};
pub use view::{OpponentView, PlayerView};
