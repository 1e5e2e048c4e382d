//! Deck construction.
//!
//! `DeckBuilder` turns catalog templates into owned `CardInstance`s with
//! unique ids. Randomized decks draw each slot uniformly from the catalog.

use super::catalog::{CardCatalog, CatalogError};
use super::definition::CardId;
use super::instance::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Builds decks for one owner, allocating instance sequence numbers.
///
/// ```
/// use duel_ccg::cards::{CardCatalog, DeckBuilder};
/// use duel_ccg::core::{GameRng, PlayerId};
///
/// let catalog = CardCatalog::standard();
/// let mut builder = DeckBuilder::new(&catalog, PlayerId::FIRST);
/// let deck = builder.random(40, &mut GameRng::new(1));
///
/// assert_eq!(deck.len(), 40);
/// ```
#[derive(Debug)]
pub struct DeckBuilder<'a> {
    catalog: &'a CardCatalog,
    owner: PlayerId,
    next_seq: u32,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder for `owner`.
    #[must_use]
    pub fn new(catalog: &'a CardCatalog, owner: PlayerId) -> Self {
        Self {
            catalog,
            owner,
            next_seq: 0,
        }
    }

    /// Continue numbering after ids already handed out.
    #[must_use]
    pub fn starting_at(mut self, seq: u32) -> Self {
        self.next_seq = seq;
        self
    }

    /// Next sequence number to be allocated.
    #[must_use]
    pub fn next_seq(&self) -> u32 {
        self.next_seq
    }

    /// Build a deck of `size` cards chosen uniformly at random.
    pub fn random(&mut self, size: usize, rng: &mut GameRng) -> Vec<CardInstance> {
        let templates = self.catalog.templates();
        (0..size)
            .map(|_| {
                let template = templates[rng.gen_range_usize(0..templates.len())].clone();
                self.instantiate(template)
            })
            .collect()
    }

    /// Build a deck from an explicit decklist, preserving its order.
    pub fn from_list(&mut self, ids: &[CardId]) -> Result<Vec<CardInstance>, CatalogError> {
        let templates = ids
            .iter()
            .map(|&id| self.catalog.get(id).cloned().ok_or(CatalogError::UnknownCard(id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(templates.into_iter().map(|t| self.instantiate(t)).collect())
    }

    /// Create a single instance of a catalog card.
    pub fn single(&mut self, id: CardId) -> Result<CardInstance, CatalogError> {
        let template = self.catalog.get(id).cloned().ok_or(CatalogError::UnknownCard(id))?;
        Ok(self.instantiate(template))
    }

    fn instantiate(&mut self, template: super::CardTemplate) -> CardInstance {
        let id = InstanceId::new(template.id, self.owner, self.next_seq);
        self.next_seq += 1;
        CardInstance::new(id, template)
    }
}
