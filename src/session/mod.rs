//! Hosting matches: seats, lifecycle and wire messages.
//!
//! ## Key Types
//!
//! - `MatchRegistry`: match id -> isolated, mutex-serialized `Match`
//! - `Match`: two seats, the engine while both are filled, solo mode
//! - `Notification` / `Delivery`: outbound messages for one seat
//! - `SessionError`: why a join, leave or command failed

pub mod error;
pub mod message;
pub mod registry;
pub mod room;

pub use error::SessionError;
pub use message::{decode_command, ClientId, Delivery, Notification};
pub use registry::{MatchId, MatchRegistry};
pub use room::{Match, Occupant};
