//! Rules: the phase state machine, command handling and combat.
//!
//! - `Phase`: the five steps of a turn and how each is left
//! - `GameEngine`: validates and applies seat commands
//! - `CombatResolver`: two-pass (first strike, then regular) damage

pub mod combat;
pub mod engine;
pub mod phase;

pub use combat::{AttackDeclaration, AttackTarget, BlockerList, CombatReport, CombatResolver, CombatState};
pub use engine::{CommandOutcome, GameEngine, GameEvent, GameResult};
pub use phase::{Phase, Transition};
