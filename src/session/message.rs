//! Wire messages.
//!
//! Inbound messages are `Command`s in their JSON form. Outbound messages are
//! `Notification`s addressed to one seat:
//!
//! ```
//! use duel_ccg::session::Notification;
//!
//! let note = Notification::GameOver { message: "You win!".to_string() };
//! assert_eq!(note.to_json().unwrap(), r#"{"type":"game_over","message":"You win!"}"#);
//! ```

use serde::{Deserialize, Serialize};

use super::error::SessionError;
use crate::core::action::Command;
use crate::core::player::PlayerId;
use crate::core::view::PlayerView;

/// Identity of a connected client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// Server -> client message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Fresh snapshot after a state change.
    State { view: Box<PlayerView> },

    /// Seated, but the opposing seat is still empty. There is no game state
    /// to show until it fills.
    Waiting { seat: PlayerId },

    /// A card ability fired.
    EffectTriggered { message: String },

    /// The match is decided. Sent once per seat.
    GameOver { message: String },
}

impl Notification {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A notification addressed to one seated client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub seat: PlayerId,
    pub client: ClientId,
    pub notification: Notification,
}

/// Decode an inbound JSON command.
pub fn decode_command(text: &str) -> Result<Command, SessionError> {
    Ok(serde_json::from_str(text)?)
}
