//! Card instance identification.
//!
//! Every card copy in a match has a unique `InstanceId` built from the
//! template it was copied from, its owner, and a per-owner sequence number.
//!
//! ## Wire Form
//!
//! Instance ids travel as strings `"<template>-<owner>-<seq>"`:
//!
//! ```
//! use duel_ccg::cards::CardId;
//! use duel_ccg::core::{InstanceId, PlayerId};
//!
//! let id = InstanceId::new(CardId::new(7), PlayerId::SECOND, 12);
//! assert_eq!(id.to_string(), "7-1-12");
//! assert_eq!("7-1-12".parse::<InstanceId>(), Ok(id));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::player::PlayerId;
use crate::cards::CardId;

/// Unique identifier of a card instance for the lifetime of a match.
///
/// Uniqueness holds because sequence numbers are allocated per owner and the
/// owner is part of the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceId {
    /// Template this instance was copied from.
    pub template: CardId,
    /// Owning seat.
    pub owner: PlayerId,
    /// Per-owner allocation sequence.
    pub seq: u32,
}

impl InstanceId {
    /// Create an instance id.
    #[must_use]
    pub const fn new(template: CardId, owner: PlayerId, seq: u32) -> Self {
        Self {
            template,
            owner,
            seq,
        }
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.template.raw(), self.owner.0, self.seq)
    }
}

/// Error returned when an instance id string is malformed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed instance id: {0:?}")]
pub struct ParseInstanceIdError(pub String);

impl FromStr for InstanceId {
    type Err = ParseInstanceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseInstanceIdError(s.to_string());
        let mut parts = s.split('-');
        let (Some(template), Some(owner), Some(seq), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        let template: u32 = template.parse().map_err(|_| err())?;
        let owner: u8 = owner.parse().map_err(|_| err())?;
        let owner = PlayerId::try_from(owner).map_err(|_| err())?;
        let seq: u32 = seq.parse().map_err(|_| err())?;

        Ok(Self::new(CardId::new(template), owner, seq))
    }
}

impl TryFrom<String> for InstanceId {
    type Error = ParseInstanceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstanceId> for String {
    fn from(id: InstanceId) -> Self {
        id.to_string()
    }
}
