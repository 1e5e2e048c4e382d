//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a template in a match. It carries
//! the mutable state the rules care about:
//! - `tapped`: exhausted by attacking, cleared at its controller's turn end
//! - `can_attack`: false the turn the card enters the battlefield
//! - `defense`: working copy of the template's defense, reduced by combat
//!
//! The template itself is never mutated.

use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, FIRST_STRIKE};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// A card copy in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this copy.
    pub id: InstanceId,

    /// The template this copy was made from.
    pub template: CardTemplate,

    /// Is this card exhausted?
    pub tapped: bool,

    /// May this card be declared as an attacker?
    pub can_attack: bool,

    /// Current defense. Starts at the template's defense.
    pub defense: i32,
}

impl CardInstance {
    /// Create a fresh copy of a template.
    #[must_use]
    pub fn new(id: InstanceId, template: CardTemplate) -> Self {
        let defense = template.defense;
        Self {
            id,
            template,
            tapped: false,
            can_attack: false,
            defense,
        }
    }

    /// Owning seat.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.id.owner
    }

    /// Mana cost.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.template.cost
    }

    /// Combat damage this card deals. Never negative.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.template.attack.max(0)
    }

    /// Check for an ability tag.
    #[must_use]
    pub fn has_ability(&self, ability: &str) -> bool {
        self.template.has_ability(ability)
    }

    /// Does this card strike in the first-strike damage pass?
    #[must_use]
    pub fn has_first_strike(&self) -> bool {
        self.has_ability(FIRST_STRIKE)
    }

    /// Is the card still standing?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.defense > 0
    }

    /// Can this card be declared as an attacker right now?
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.tapped && self.can_attack
    }

    /// Reduce working defense. Negative amounts are ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.defense -= amount.max(0);
    }

    /// Untap and clear summoning sickness.
    pub fn refresh(&mut self) {
        self.tapped = false;
        self.can_attack = true;
    }
}
