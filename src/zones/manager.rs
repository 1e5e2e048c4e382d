//! Zone manager for card locations and movement.
//!
//! Each player owns one `ZoneManager` holding every card instance they own.
//! A card is tracked in exactly one zone; movement is the only way its
//! location changes, so a card can never be duplicated or lost.
//!
//! All zones keep an order:
//! - Deck: last entry is the top (next draw)
//! - Graveyard: append-only history, oldest first
//! - Hand, battlefield, mana: arrival order (stable snapshots)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::rng::GameRng;

/// Card zones owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Face-down draw pile.
    Deck,
    /// Private hand.
    Hand,
    /// Creatures able to attack and block.
    Battlefield,
    /// Cards committed as mana.
    Mana,
    /// Destroyed cards.
    Graveyard,
}

impl Zone {
    /// Number of zones.
    pub const COUNT: usize = 5;

    /// All zones.
    pub const ALL: [Zone; Zone::COUNT] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Mana,
        Zone::Graveyard,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (end of the order).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Tracks one player's cards across zones.
///
/// ## Usage
///
/// ```
/// use duel_ccg::cards::{CardId, CardInstance, CardTemplate};
/// use duel_ccg::core::{InstanceId, PlayerId};
/// use duel_ccg::zones::{Zone, ZoneManager, ZonePosition};
///
/// let template = CardTemplate::new(CardId::new(1), "Ember Sprite", 1, 1, 1);
/// let id = InstanceId::new(CardId::new(1), PlayerId::FIRST, 0);
///
/// let mut zones = ZoneManager::new();
/// zones.add(CardInstance::new(id, template), Zone::Deck, ZonePosition::Top);
///
/// assert_eq!(zones.draw(), Some(id));
/// assert_eq!(zones.zone_of(id), Some(Zone::Hand));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card data by id.
    cards: FxHashMap<InstanceId, CardInstance>,

    /// Card locations: id -> zone.
    locations: FxHashMap<InstanceId, Zone>,

    /// Per-zone ordering.
    order: [Vec<InstanceId>; Zone::COUNT],
}

impl ZoneManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to a zone.
    ///
    /// Panics if the card is already tracked.
    pub fn add(&mut self, card: CardInstance, zone: Zone, position: ZonePosition) {
        let id = card.id;
        if self.cards.contains_key(&id) {
            panic!("Card {} already exists in zone manager", id);
        }

        self.cards.insert(id, card);
        self.locations.insert(id, zone);
        Self::insert_at(&mut self.order[zone.index()], id, position);
    }

    /// Move a card from its current zone to another.
    ///
    /// Returns the old zone, or `None` if the card isn't tracked.
    pub fn move_to(&mut self, id: InstanceId, zone: Zone, position: ZonePosition) -> Option<Zone> {
        let old_zone = self.locations.get(&id).copied()?;

        if old_zone == zone {
            return Some(old_zone);
        }

        self.order[old_zone.index()].retain(|&e| e != id);
        self.locations.insert(id, zone);
        Self::insert_at(&mut self.order[zone.index()], id, position);

        Some(old_zone)
    }

    fn insert_at(order: &mut Vec<InstanceId>, id: InstanceId, position: ZonePosition) {
        match position {
            ZonePosition::Top => order.push(id),
            ZonePosition::Bottom => order.insert(0, id),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, id);
            }
        }
    }

    /// Move the top deck card to the hand.
    ///
    /// Returns the drawn id, or `None` if the deck is empty.
    pub fn draw(&mut self) -> Option<InstanceId> {
        let id = self.top(Zone::Deck)?;
        self.move_to(id, Zone::Hand, ZonePosition::Top);
        Some(id)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, id: InstanceId) -> Option<Zone> {
        self.locations.get(&id).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in(&self, id: InstanceId, zone: Zone) -> bool {
        self.locations.get(&id) == Some(&zone)
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Get a mutable card by id.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    /// Get a card only if it is in `zone`.
    #[must_use]
    pub fn get_in(&self, id: InstanceId, zone: Zone) -> Option<&CardInstance> {
        if self.is_in(id, zone) {
            self.cards.get(&id)
        } else {
            None
        }
    }

    /// Get a mutable card only if it is in `zone`.
    pub fn get_in_mut(&mut self, id: InstanceId, zone: Zone) -> Option<&mut CardInstance> {
        if self.is_in(id, zone) {
            self.cards.get_mut(&id)
        } else {
            None
        }
    }

    /// Ids in a zone, bottom to top.
    #[must_use]
    pub fn ids_in(&self, zone: Zone) -> &[InstanceId] {
        &self.order[zone.index()]
    }

    /// Cards in a zone, bottom to top.
    pub fn cards_in(&self, zone: Zone) -> impl Iterator<Item = &CardInstance> + '_ {
        self.order[zone.index()]
            .iter()
            .filter_map(move |id| self.cards.get(id))
    }

    /// Mutable cards in a zone, in no particular order.
    pub fn cards_in_mut(&mut self, zone: Zone) -> impl Iterator<Item = &mut CardInstance> + '_ {
        let locations = &self.locations;
        self.cards
            .values_mut()
            .filter(move |card| locations.get(&card.id) == Some(&zone))
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.order[zone.index()].len()
    }

    /// Top card of a zone (last in the order).
    #[must_use]
    pub fn top(&self, zone: Zone) -> Option<InstanceId> {
        self.order[zone.index()].last().copied()
    }

    /// Shuffle a zone's order.
    pub fn shuffle(&mut self, zone: Zone, rng: &mut GameRng) {
        rng.shuffle(&mut self.order[zone.index()]);
    }

    /// Total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Check if the manager tracks a card.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardTemplate};
    use crate::core::player::PlayerId;

    fn card(seq: u32) -> CardInstance {
        let template = CardTemplate::new(CardId::new(1), "Ember Sprite", 1, 1, 1);
        CardInstance::new(InstanceId::new(CardId::new(1), PlayerId::FIRST, seq), template)
    }

    fn id(seq: u32) -> InstanceId {
        InstanceId::new(CardId::new(1), PlayerId::FIRST, seq)
    }

    #[test]
    fn test_add_and_get() {
        let mut zones = ZoneManager::new();
        zones.add(card(0), Zone::Hand, ZonePosition::Top);
        zones.add(card(1), Zone::Battlefield, ZonePosition::Top);

        assert_eq!(zones.zone_of(id(0)), Some(Zone::Hand));
        assert_eq!(zones.zone_of(id(1)), Some(Zone::Battlefield));
        assert_eq!(zones.zone_of(id(9)), None);
        assert!(zones.get_in(id(0), Zone::Hand).is_some());
        assert!(zones.get_in(id(0), Zone::Battlefield).is_none());
    }

    #[test]
    fn test_deck_order() {
        let mut zones = ZoneManager::new();

        // Add: 0 to top, 1 to bottom, 2 to top
        zones.add(card(0), Zone::Deck, ZonePosition::Top);
        zones.add(card(1), Zone::Deck, ZonePosition::Bottom);
        zones.add(card(2), Zone::Deck, ZonePosition::Top);

        assert_eq!(zones.ids_in(Zone::Deck), &[id(1), id(0), id(2)]);
        assert_eq!(zones.top(Zone::Deck), Some(id(2)));
    }

    #[test]
    fn test_draw_moves_top_to_hand() {
        let mut zones = ZoneManager::new();
        zones.add(card(0), Zone::Deck, ZonePosition::Top);
        zones.add(card(1), Zone::Deck, ZonePosition::Top);

        assert_eq!(zones.draw(), Some(id(1)));
        assert_eq!(zones.draw(), Some(id(0)));
        assert_eq!(zones.draw(), None);

        assert_eq!(zones.ids_in(Zone::Hand), &[id(1), id(0)]);
        assert_eq!(zones.zone_size(Zone::Deck), 0);
        assert_eq!(zones.total_cards(), 2);
    }

    #[test]
    fn test_move_between_zones() {
        let mut zones = ZoneManager::new();
        zones.add(card(0), Zone::Hand, ZonePosition::Top);

        let old = zones.move_to(id(0), Zone::Mana, ZonePosition::Top);

        assert_eq!(old, Some(Zone::Hand));
        assert_eq!(zones.zone_size(Zone::Hand), 0);
        assert_eq!(zones.zone_size(Zone::Mana), 1);
        assert_eq!(zones.move_to(id(7), Zone::Mana, ZonePosition::Top), None);
    }

    #[test]
    fn test_every_card_in_exactly_one_zone() {
        let mut zones = ZoneManager::new();
        for i in 0..10 {
            zones.add(card(i), Zone::Deck, ZonePosition::Top);
        }
        zones.draw();
        zones.draw();
        zones.move_to(id(9), Zone::Battlefield, ZonePosition::Top);
        zones.move_to(id(9), Zone::Graveyard, ZonePosition::Top);

        let sum: usize = Zone::ALL.iter().map(|&z| zones.zone_size(z)).sum();
        assert_eq!(sum, zones.total_cards());
    }

    #[test]
    fn test_cards_in_mut() {
        let mut zones = ZoneManager::new();
        zones.add(card(0), Zone::Battlefield, ZonePosition::Top);
        zones.add(card(1), Zone::Hand, ZonePosition::Top);

        for c in zones.cards_in_mut(Zone::Battlefield) {
            c.tapped = true;
        }

        assert!(zones.get(id(0)).unwrap().tapped);
        assert!(!zones.get(id(1)).unwrap().tapped);
    }

    #[test]
    fn test_shuffle() {
        let mut zones = ZoneManager::new();
        for i in 0..20 {
            zones.add(card(i), Zone::Deck, ZonePosition::Top);
        }
        let before = zones.ids_in(Zone::Deck).to_vec();

        zones.shuffle(Zone::Deck, &mut GameRng::new(42));

        let after = zones.ids_in(Zone::Deck).to_vec();
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_card_panics() {
        let mut zones = ZoneManager::new();
        zones.add(card(0), Zone::Hand, ZonePosition::Top);
        zones.add(card(0), Zone::Deck, ZonePosition::Top);
    }
}
