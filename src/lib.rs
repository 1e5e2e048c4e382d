//! # duel-ccg
//!
//! Authoritative engine for a two-player collectible card game.
//!
//! ## Design Principles
//!
//! 1. **One Source of Truth**: a single `GameEngine` per match owns all
//!    state. Front ends render the `PlayerView` snapshots it produces and
//!    never keep a diverging copy of the rules.
//!
//! 2. **No Partial Commands**: a rejected command returns a `CommandError`
//!    and leaves the match exactly as it was.
//!
//! 3. **Transport Agnostic**: commands and notifications are plain serde
//!    types; how they travel is up to the host.
//!
//! ## Architecture
//!
//! - **Phase Machine**: `MAIN_PHASE_1 -> DECLARE_ATTACKERS -> DECLARE_BLOCKERS
//!   -> MAIN_PHASE_2 -> END_PHASE`, then the turn passes.
//!
//! - **Two-Pass Combat**: first-strike damage, cleanup, regular damage,
//!   cleanup, then unblocked damage to the defending player.
//!
//! - **Isolated Matches**: the `MatchRegistry` serializes commands per match
//!   behind a mutex and shares only the immutable catalog.
//!
//! ## Modules
//!
//! - `core`: Seats, instance ids, state, commands, snapshots, configuration
//! - `zones`: Per-player card zones
//! - `cards`: Templates, instances, catalog and deck construction
//! - `effects`: On-play effect dispatch
//! - `rules`: Phase machine, command handlers, combat
//! - `ai`: Computer opponent for solo matches
//! - `session`: Match registry, seats and wire messages

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod ai;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Command, CommandError, CommandRecord, DrawPolicy, GameRng, GameState, InstanceId, MatchConfig,
    OpponentView, PlayMode, PlayerId, PlayerMap, PlayerState, PlayerView,
};

pub use crate::zones::{Zone, ZoneManager, ZonePosition};

pub use crate::cards::{CardCatalog, CardId, CardInstance, CardTemplate, CatalogError, DeckBuilder};

pub use crate::effects::{EffectHandler, EffectRegistry, EffectSpec};

pub use crate::rules::{
    CombatReport, CombatResolver, CombatState, CommandOutcome, GameEngine, GameEvent, GameResult, Phase,
};

pub use crate::ai::{GreedyOpponent, OpponentPolicy};

pub use crate::session::{ClientId, Delivery, Match, MatchId, MatchRegistry, Notification, SessionError};
