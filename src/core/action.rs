//! Player commands.
//!
//! A `Command` is everything a seat can ask the engine to do. Commands are
//! transport-agnostic; their serde form is the JSON wire format:
//!
//! ```
//! use duel_ccg::core::{Command, PlayMode};
//!
//! let cmd: Command = serde_json::from_str(
//!     r#"{"type": "play_card", "cardId": "4-0-17", "playType": "mana"}"#,
//! ).unwrap();
//!
//! assert!(matches!(cmd, Command::PlayCard { mode: PlayMode::Mana, .. }));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;

/// Where a played card goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Commit the card to the mana zone.
    Mana,
    /// Pay its cost and put it on the battlefield.
    Field,
}

/// A command issued by a seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Draw the top card of the deck.
    DrawCard,

    /// Play a card from hand.
    PlayCard {
        #[serde(rename = "cardId")]
        card: InstanceId,
        #[serde(rename = "playType")]
        mode: PlayMode,
    },

    /// Advance the phase state machine.
    NextPhase,

    /// Declare attacking creatures.
    DeclareAttackers {
        #[serde(rename = "attackerIds")]
        attackers: Vec<InstanceId>,
    },

    /// Assign blockers to attackers: attacker -> blockers in damage order.
    DeclareBlockers {
        assignments: BTreeMap<InstanceId, Vec<InstanceId>>,
    },
}

impl Command {
    /// Wire name of the command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::DrawCard => "draw_card",
            Command::PlayCard { .. } => "play_card",
            Command::NextPhase => "next_phase",
            Command::DeclareAttackers { .. } => "declare_attackers",
            Command::DeclareBlockers { .. } => "declare_blockers",
        }
    }
}

/// An accepted command with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The seat that issued the command.
    pub player: PlayerId,

    /// The command.
    pub command: Command,

    /// Turn number when the command was applied.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl CommandRecord {
    /// Create a new command record.
    #[must_use]
    pub fn new(player: PlayerId, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            command,
            turn,
            sequence,
        }
    }
}
