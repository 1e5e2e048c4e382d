//! Card catalog for template lookup.
//!
//! The `CardCatalog` is the immutable list of templates decks are built
//! from. It is shared read-only (behind an `Arc`) by every match.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{CardId, CardTemplate, FIRST_STRIKE};
use crate::effects::EffectSpec;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON for a template list.
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// Decks cannot be built from an empty catalog.
    #[error("catalog contains no cards")]
    Empty,

    /// Two templates share an id.
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),

    /// A decklist names a template the catalog does not have.
    #[error("unknown card id {0}")]
    UnknownCard(CardId),

    /// A template carries stats no card can have.
    #[error("card {id} is invalid: {reason}")]
    InvalidCard { id: CardId, reason: &'static str },
}

/// Immutable template collection.
///
/// ## Example
///
/// ```
/// use duel_ccg::cards::{CardCatalog, CardId, CardTemplate};
///
/// let catalog = CardCatalog::new(vec![
///     CardTemplate::new(CardId::new(1), "Ember Sprite", 1, 1, 1),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Ember Sprite");
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    cards: Vec<CardTemplate>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog from templates.
    ///
    /// Fails on an empty list, duplicate ids, a negative cost or attack,
    /// or a defense below 1.
    pub fn new(cards: Vec<CardTemplate>) -> Result<Self, CatalogError> {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            validate(card)?;
            if index.insert(card.id, i).is_some() {
                return Err(CatalogError::DuplicateId(card.id));
            }
        }

        Ok(Self { cards, index })
    }

    /// Load a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CardTemplate> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    /// The built-in card set.
    #[must_use]
    pub fn standard() -> Self {
        let cards = vec![
            CardTemplate::new(CardId::new(1), "Ember Sprite", 1, 1, 1)
                .with_flavor("Small, bright, and gone by morning."),
            CardTemplate::new(CardId::new(2), "Stone Sentry", 2, 1, 4),
            CardTemplate::new(CardId::new(3), "Dusk Lancer", 2, 2, 1).with_ability(FIRST_STRIKE),
            CardTemplate::new(CardId::new(4), "Grove Bear", 2, 2, 2),
            CardTemplate::new(CardId::new(5), "Cinder Hound", 3, 3, 2),
            CardTemplate::new(CardId::new(6), "River Scholar", 3, 1, 3)
                .with_effect(EffectSpec::draw(1))
                .with_flavor("Knowledge flows downstream."),
            CardTemplate::new(CardId::new(7), "Iron Duelist", 3, 2, 3).with_ability(FIRST_STRIKE),
            CardTemplate::new(CardId::new(8), "Hill Giant", 4, 4, 4),
            CardTemplate::new(CardId::new(9), "Sky Warden", 4, 3, 5),
            CardTemplate::new(CardId::new(10), "Blade Master", 5, 4, 3).with_ability(FIRST_STRIKE),
            CardTemplate::new(CardId::new(11), "Ancient Wurm", 6, 6, 6)
                .with_flavor("It remembers when the forest was a seed."),
            CardTemplate::new(CardId::new(12), "Thunder Titan", 7, 7, 7),
        ];

        Self::new(cards).unwrap_or_else(|e| unreachable!("standard catalog is valid: {e}"))
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is present.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false: empty catalogs are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Templates in catalog order.
    #[must_use]
    pub fn templates(&self) -> &[CardTemplate] {
        &self.cards
    }

    /// Iterate over templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.iter()
    }
}

fn validate(card: &CardTemplate) -> Result<(), CatalogError> {
    let reason = if card.cost < 0 {
        "negative cost"
    } else if card.attack < 0 {
        "negative attack"
    } else if card.defense < 1 {
        "defense must be at least 1"
    } else {
        return Ok(());
    };
    Err(CatalogError::InvalidCard { id: card.id, reason })
}
