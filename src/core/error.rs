//! Command rejection reasons.
//!
//! Every `Err` returned by an engine command handler guarantees the match
//! state is exactly what it was before the command arrived.

use thiserror::Error;

use super::entity::InstanceId;

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The acting seat is not allowed to act right now.
    #[error("it is not your turn")]
    NotYourTurn,

    /// The command is not legal in the current phase.
    #[error("command not allowed in the current phase")]
    WrongPhase,

    /// The card costs more than the available mana.
    #[error("insufficient mana: need {needed}, have {available}")]
    InsufficientMana { needed: i32, available: i32 },

    /// The referenced card is not in the expected zone.
    #[error("card {0} not found")]
    CardNotFound(InstanceId),

    /// A mana card was already played this turn.
    #[error("mana already played this turn")]
    ManaAlreadyPlayed,

    /// The per-turn manual draw was already used (or manual draws are off).
    #[error("no draw available this turn")]
    AlreadyDrawn,

    /// Attackers or blockers were already declared for this combat.
    #[error("already declared for this combat")]
    AlreadyDeclared,

    /// The match has ended.
    #[error("the game is over")]
    GameOver,

    /// Anything else.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl CommandError {
    /// Stable machine-readable name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::NotYourTurn => "not_your_turn",
            CommandError::WrongPhase => "wrong_phase",
            CommandError::InsufficientMana { .. } => "insufficient_mana",
            CommandError::CardNotFound(_) => "card_not_found",
            CommandError::ManaAlreadyPlayed => "mana_already_played",
            CommandError::AlreadyDrawn => "already_drawn",
            CommandError::AlreadyDeclared => "already_declared",
            CommandError::GameOver => "game_over",
            CommandError::InvalidCommand(_) => "invalid_command",
        }
    }
}
