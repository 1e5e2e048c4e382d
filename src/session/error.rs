//! Session-level errors.

use thiserror::Error;

use super::registry::MatchId;
use crate::core::error::CommandError;

/// Why a session request failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No match with this id exists.
    #[error("unknown match {0}")]
    UnknownMatch(MatchId),

    /// Both seats are taken.
    #[error("match is full")]
    MatchFull,

    /// The client holds no seat in this match.
    #[error("client is not seated in this match")]
    NotSeated,

    /// The match is still waiting for a second seat.
    #[error("match has not started")]
    NotStarted,

    /// An inbound message could not be decoded.
    #[error("malformed message: {0}")]
    Decode(String),

    /// The engine rejected the command.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Decode(err.to_string())
    }
}
