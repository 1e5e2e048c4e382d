//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a catalog entry:
//! "Hill Giant" always costs 4 and has 4 attack and 4 defense.
//!
//! Instance-specific data (tapped, damage taken, zone) lives in
//! `CardInstance`, which carries its own working copy of defense.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::effects::EffectSpec;

/// Ability tag: deals combat damage before creatures without it.
pub const FIRST_STRIKE: &str = "firstStrike";

/// Identifier of a catalog entry.
///
/// This identifies the "kind" of card (e.g., "Hill Giant"),
/// not a specific copy in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Immutable catalog entry.
///
/// ## Example
///
/// ```
/// use duel_ccg::cards::{CardId, CardTemplate, FIRST_STRIKE};
///
/// let lancer = CardTemplate::new(CardId::new(3), "Dusk Lancer", 2, 2, 1)
///     .with_ability(FIRST_STRIKE);
///
/// assert!(lancer.has_ability(FIRST_STRIKE));
/// assert_eq!(lancer.cost, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier within the catalog.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Mana needed to put the card on the battlefield.
    pub cost: i32,

    /// Combat damage dealt.
    pub attack: i32,

    /// Damage the card can absorb before it is destroyed.
    pub defense: i32,

    /// Ability tags such as `"firstStrike"`.
    #[serde(default)]
    pub abilities: BTreeSet<String>,

    /// Effect triggered when the card enters the battlefield.
    #[serde(default)]
    pub effect: Option<EffectSpec>,

    /// Flavor text.
    #[serde(default)]
    pub flavor: Option<String>,

    /// Art reference for front ends.
    #[serde(default)]
    pub art: Option<String>,
}

impl CardTemplate {
    /// Create a template with no abilities, effect or flavor.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, cost: i32, attack: i32, defense: i32) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            attack,
            defense,
            abilities: BTreeSet::new(),
            effect: None,
            flavor: None,
            art: None,
        }
    }

    /// Add an ability tag.
    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.abilities.insert(ability.into());
        self
    }

    /// Set the on-play effect.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set the flavor text.
    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Set the art reference.
    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = Some(art.into());
        self
    }

    /// Check for an ability tag.
    #[must_use]
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.contains(ability)
    }
}
