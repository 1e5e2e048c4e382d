//! Per-seat snapshots.
//!
//! A `PlayerView` is what one seat is allowed to see after a command: its
//! own zones in full, the opponent's public fields only (hand and deck are
//! reduced to counts). Views are plain data, detached from the engine, and
//! serialize to JSON for the wire or to bincode for compact storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use super::state::{GameState, PlayerState};
use crate::cards::CardInstance;
use crate::rules::{AttackDeclaration, GameResult, Phase};
use crate::zones::Zone;

/// Public fields of the opposing seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    pub seat: PlayerId,
    pub hand_size: usize,
    pub deck_size: usize,
    pub battlefield: Vec<CardInstance>,
    pub mana_zone: Vec<CardInstance>,
    pub graveyard: Vec<CardInstance>,
    pub max_mana: i32,
    pub current_mana: i32,
    pub is_turn: bool,
    pub life: i32,
}

impl OpponentView {
    fn of(player: &PlayerState) -> Self {
        Self {
            seat: player.owner,
            hand_size: player.hand_size(),
            deck_size: player.deck_size(),
            battlefield: cards(player, Zone::Battlefield),
            mana_zone: cards(player, Zone::Mana),
            graveyard: cards(player, Zone::Graveyard),
            max_mana: player.max_mana,
            current_mana: player.current_mana,
            is_turn: player.is_turn,
            life: player.life,
        }
    }
}

/// Everything one seat may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Seat this view was built for.
    pub seat: PlayerId,

    pub hand: Vec<CardInstance>,
    pub deck_size: usize,
    pub battlefield: Vec<CardInstance>,
    pub mana_zone: Vec<CardInstance>,
    pub graveyard: Vec<CardInstance>,

    pub max_mana: i32,
    pub current_mana: i32,
    pub is_turn: bool,
    pub mana_played_this_turn: bool,
    pub drawn_this_turn: bool,
    pub life: i32,

    pub opponent: OpponentView,

    pub phase: Phase,
    pub turn_number: u32,

    /// Declared attackers, in declaration order.
    pub attacking: Vec<AttackDeclaration>,

    /// Attacker -> assigned blockers.
    pub blocking: BTreeMap<InstanceId, Vec<InstanceId>>,

    /// Set once the match is decided.
    pub outcome: Option<GameResult>,
}

impl PlayerView {
    /// Build the view of `state` for `seat`.
    #[must_use]
    pub fn build(state: &GameState, seat: PlayerId) -> Self {
        let me = &state.players[seat];

        Self {
            seat,
            hand: cards(me, Zone::Hand),
            deck_size: me.deck_size(),
            battlefield: cards(me, Zone::Battlefield),
            mana_zone: cards(me, Zone::Mana),
            graveyard: cards(me, Zone::Graveyard),
            max_mana: me.max_mana,
            current_mana: me.current_mana,
            is_turn: me.is_turn,
            mana_played_this_turn: me.mana_played_this_turn,
            drawn_this_turn: me.drawn_this_turn,
            life: me.life,
            opponent: OpponentView::of(&state.players[seat.opponent()]),
            phase: state.phase,
            turn_number: state.turn_number,
            attacking: state.combat.attackers.clone(),
            blocking: state
                .combat
                .blocks
                .iter()
                .map(|(attacker, blockers)| (*attacker, blockers.to_vec()))
                .collect(),
            outcome: state.outcome.clone(),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a bincode-encoded view.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Find a card in this seat's hand.
    #[must_use]
    pub fn hand_card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.id == id)
    }
}

fn cards(player: &PlayerState, zone: Zone) -> Vec<CardInstance> {
    player.zones.cards_in(zone).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, DeckBuilder};
    use crate::core::rng::GameRng;
    use crate::zones::ZonePosition;

    fn state() -> GameState {
        let catalog = CardCatalog::standard();
        let mut rng = GameRng::new(3);
        let mut state = GameState::new(20, PlayerId::FIRST, GameRng::new(3));

        for seat in PlayerId::both() {
            for card in DeckBuilder::new(&catalog, seat).random(6, &mut rng) {
                state.players[seat].zones.add(card, Zone::Deck, ZonePosition::Top);
            }
            state.players[seat].zones.draw();
            state.players[seat].zones.draw();
        }
        state
    }

    #[test]
    fn test_view_hides_opponent_hand() {
        let state = state();
        let view = PlayerView::build(&state, PlayerId::FIRST);

        assert_eq!(view.hand.len(), 2);
        assert_eq!(view.deck_size, 4);
        assert_eq!(view.opponent.hand_size, 2);
        assert_eq!(view.opponent.seat, PlayerId::SECOND);
        assert!(view.is_turn);
        assert!(!view.opponent.is_turn);
    }

    #[test]
    fn test_view_json_uses_wire_names() {
        let view = PlayerView::build(&state(), PlayerId::SECOND);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "MAIN_PHASE_1");
        assert_eq!(json["life"], 20);
        assert!(json["hand"][0]["id"].is_string());
    }

    #[test]
    fn test_bincode_encoding() {
        let view = PlayerView::build(&state(), PlayerId::FIRST);
        let bytes = view.to_bytes().unwrap();

        assert_eq!(PlayerView::from_bytes(&bytes).unwrap(), view);
    }
}
