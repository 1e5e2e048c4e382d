//! Zone system for card locations.
//!
//! Every player owns five zones: deck, hand, battlefield, mana and graveyard.
//! The `ZoneManager` keeps each card in exactly one of them.

pub mod manager;

pub use manager::{Zone, ZoneManager, ZonePosition};
