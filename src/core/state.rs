//! Match state.
//!
//! ## PlayerState
//!
//! Everything one seat owns:
//! - Cards, tracked by a `ZoneManager` (deck, hand, battlefield, mana, graveyard)
//! - Mana counters (`max_mana`, `current_mana`)
//! - Turn flags (`is_turn`, `mana_played_this_turn`, `drawn_this_turn`)
//! - Life total
//!
//! ## GameState
//!
//! Both seats plus the shared turn structure:
//! - Phase, active player, turn number
//! - Current combat declarations
//! - Outcome, once the match is decided
//! - Command history and RNG

use im::Vector;

use super::action::{Command, CommandRecord};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::rules::{CombatState, GameResult, Phase};
use crate::zones::{Zone, ZoneManager};

/// State of one seat.
#[derive(Clone, Debug)]
pub struct PlayerState {
    /// Seat that owns this state.
    pub owner: PlayerId,

    /// All cards owned by this seat.
    pub zones: ZoneManager,

    /// Mana available at the start of each turn.
    pub max_mana: i32,

    /// Mana left this turn. Always `0 <= current_mana <= max_mana`.
    pub current_mana: i32,

    /// Is this seat the active player?
    pub is_turn: bool,

    /// A card was committed to the mana zone this turn.
    pub mana_played_this_turn: bool,

    /// The manual draw was used this turn.
    pub drawn_this_turn: bool,

    /// Life total. The match ends when it reaches 0.
    pub life: i32,
}

impl PlayerState {
    /// Create an empty seat with the given life total.
    #[must_use]
    pub fn new(owner: PlayerId, life: i32) -> Self {
        Self {
            owner,
            zones: ZoneManager::new(),
            max_mana: 0,
            current_mana: 0,
            is_turn: false,
            mana_played_this_turn: false,
            drawn_this_turn: false,
            life,
        }
    }

    /// Cards left in the deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.zones.zone_size(Zone::Deck)
    }

    /// Cards in hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.zones.zone_size(Zone::Hand)
    }

    /// Has this seat lost?
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }

    /// Become the active player: refill mana and clear the per-turn flags.
    pub fn begin_turn(&mut self) {
        self.is_turn = true;
        self.current_mana = self.max_mana;
        self.mana_played_this_turn = false;
        self.drawn_this_turn = false;
    }

    /// Stop being the active player: untap the battlefield and lift
    /// summoning sickness.
    pub fn end_turn(&mut self) {
        self.is_turn = false;
        for card in self.zones.cards_in_mut(Zone::Battlefield) {
            card.refresh();
        }
    }
}

/// Complete state of a match.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Both seats.
    pub players: PlayerMap<PlayerState>,

    /// Current phase of the active player's turn.
    pub phase: Phase,

    /// Seat whose turn it is.
    pub active_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Command sequence within the turn.
    pub action_sequence: u32,

    /// Declarations for the combat in progress.
    pub combat: CombatState,

    /// Set once a player's life reaches 0.
    pub outcome: Option<GameResult>,

    /// Every accepted command, oldest first.
    pub history: Vector<CommandRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a fresh match state. `first_player` holds the turn.
    #[must_use]
    pub fn new(starting_life: i32, first_player: PlayerId, rng: GameRng) -> Self {
        let mut players = PlayerMap::new(|p| PlayerState::new(p, starting_life));
        players[first_player].is_turn = true;

        Self {
            players,
            phase: Phase::MainPhase1,
            active_player: first_player,
            turn_number: 1,
            action_sequence: 0,
            combat: CombatState::new(),
            outcome: None,
            history: Vector::new(),
            rng,
        }
    }

    /// The seat that is not active.
    #[must_use]
    pub fn defending_player(&self) -> PlayerId {
        self.active_player.opponent()
    }

    /// Has the match been decided?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record an accepted command in history.
    pub fn record(&mut self, player: PlayerId, command: Command) {
        let sequence = self.next_sequence();
        self.history
            .push_back(CommandRecord::new(player, command, self.turn_number, sequence));
    }

    /// Get the next command sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Hand the turn to the other seat.
    ///
    /// The departing seat's battlefield is refreshed; the incoming seat's
    /// mana is refilled and its per-turn flags cleared. Drawing is left to
    /// the caller.
    pub fn pass_turn(&mut self) -> PlayerId {
        let departing = self.active_player;
        let incoming = departing.opponent();

        self.players[departing].end_turn();
        self.players[incoming].begin_turn();

        self.active_player = incoming;
        self.phase = Phase::MainPhase1;
        self.turn_number += 1;
        self.action_sequence = 0;
        self.combat.clear();
        incoming
    }
}
