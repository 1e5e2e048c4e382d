//! The authoritative match engine.
//!
//! `GameEngine` owns a `GameState` and is the only thing that mutates it.
//! Seats talk to it through `apply`, one `Command` at a time:
//!
//! - Every command is validated against the acting seat, the phase and the
//!   cards it names before anything changes. A rejected command returns a
//!   `CommandError` and leaves the state untouched.
//! - Invalid ids inside an attacker or blocker declaration are not errors;
//!   they are dropped and listed in the `CommandOutcome`.
//! - Side effects other seats care about (effect text, combat, turn
//!   handoff, game over) are queued as `GameEvent`s for the host to drain.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::combat::{AttackTarget, BlockerList, CombatReport, CombatResolver};
use super::phase::{Phase, Transition};
use crate::cards::{CardCatalog, CardId, CardInstance, CatalogError, DeckBuilder};
use crate::core::action::{Command, PlayMode};
use crate::core::config::{DrawPolicy, MatchConfig};
use crate::core::entity::InstanceId;
use crate::core::error::CommandError;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::core::view::PlayerView;
use crate::effects::{EffectContext, EffectRegistry, ResolveResult};
use crate::zones::{Zone, ZonePosition};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    /// The winning seat.
    #[must_use]
    pub fn winner(&self) -> PlayerId {
        match self {
            GameResult::Winner(p) => *p,
        }
    }

    /// Terminal message shown to `seat`.
    #[must_use]
    pub fn message_for(&self, seat: PlayerId) -> &'static str {
        if self.is_winner(seat) {
            "You win!"
        } else {
            "You lose!"
        }
    }
}

/// Something that happened inside the engine.
///
/// Effect text and the game result are forwarded to seats by the session
/// layer. Combat reports and turn handoffs are for the host only; seats see
/// their outcome in the next snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card's on-play effect resolved.
    EffectTriggered { player: PlayerId, message: String },

    /// Combat damage was dealt.
    CombatResolved { attacker: PlayerId, report: CombatReport },

    /// The turn was handed over.
    TurnPassed { from: PlayerId, to: PlayerId, turn: u32 },

    /// The match was decided. Queued exactly once.
    GameOver(GameResult),
}

/// What an accepted command did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Did the command change any state?
    pub changed: bool,

    /// Ids dropped from an attacker or blocker declaration.
    pub dropped: Vec<InstanceId>,
}

impl CommandOutcome {
    fn changed() -> Self {
        Self {
            changed: true,
            dropped: Vec::new(),
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn with_dropped(dropped: Vec<InstanceId>) -> Self {
        Self {
            changed: true,
            dropped,
        }
    }
}

/// Runs one match.
///
/// ```
/// use std::sync::Arc;
/// use duel_ccg::cards::CardCatalog;
/// use duel_ccg::core::{Command, MatchConfig, PlayerId};
/// use duel_ccg::effects::EffectRegistry;
/// use duel_ccg::rules::{GameEngine, Phase};
///
/// let catalog = CardCatalog::standard();
/// let mut engine = GameEngine::new(
///     MatchConfig::new().with_seed(1),
///     &catalog,
///     Arc::new(EffectRegistry::standard()),
/// );
///
/// engine.apply(PlayerId::FIRST, &Command::NextPhase).unwrap();
/// assert_eq!(engine.phase(), Phase::DeclareAttackers);
///
/// // The other seat cannot advance the phase.
/// assert!(engine.apply(PlayerId::SECOND, &Command::NextPhase).is_err());
/// ```
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    config: MatchConfig,
    effects: Arc<EffectRegistry>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Start a match: build a random deck per seat and draw opening hands.
    #[must_use]
    pub fn new(config: MatchConfig, catalog: &CardCatalog, effects: Arc<EffectRegistry>) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let decks = PlayerMap::new(|seat| DeckBuilder::new(catalog, seat).random(config.deck_size, &mut rng));

        Self::deal(config, decks, rng, effects)
    }

    /// Start a match from fixed decklists, one per seat.
    ///
    /// `config.deck_size` is ignored; each list is shuffled before the
    /// opening hands are drawn.
    pub fn with_decklists(
        config: MatchConfig,
        catalog: &CardCatalog,
        decklists: &PlayerMap<Vec<CardId>>,
        effects: Arc<EffectRegistry>,
    ) -> Result<Self, CatalogError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut decks: PlayerMap<Vec<CardInstance>> = PlayerMap::with_default();
        for seat in PlayerId::both() {
            decks[seat] = DeckBuilder::new(catalog, seat).from_list(&decklists[seat])?;
        }

        Ok(Self::deal(config, decks, rng, effects))
    }

    fn deal(
        config: MatchConfig,
        mut decks: PlayerMap<Vec<CardInstance>>,
        rng: GameRng,
        effects: Arc<EffectRegistry>,
    ) -> Self {
        let mut state = GameState::new(config.starting_life, config.first_player, rng);
        for seat in PlayerId::both() {
            let player = &mut state.players[seat];
            for card in std::mem::take(&mut decks[seat]) {
                player.zones.add(card, Zone::Deck, ZonePosition::Top);
            }
            player.zones.shuffle(Zone::Deck, &mut state.rng);
            for _ in 0..config.opening_hand_size {
                player.zones.draw();
            }
        }

        info!(
            seed = state.rng.seed(),
            first = %config.first_player,
            deck_size = state.players[config.first_player].deck_size(),
            "match started"
        );

        Self::from_state(state, config, effects)
    }

    /// Wrap an existing state.
    #[must_use]
    pub fn from_state(state: GameState, config: MatchConfig, effects: Arc<EffectRegistry>) -> Self {
        Self {
            state,
            config,
            effects,
            events: Vec::new(),
        }
    }

    // === Accessors ===

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player
    }

    /// Outcome, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameResult> {
        self.state.outcome.as_ref()
    }

    /// Has the match been decided?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Snapshot for one seat.
    #[must_use]
    pub fn snapshot(&self, seat: PlayerId) -> PlayerView {
        PlayerView::build(&self.state, seat)
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Commands ===

    /// Apply a command for `player`.
    pub fn apply(&mut self, player: PlayerId, command: &Command) -> Result<CommandOutcome, CommandError> {
        let phase = self.state.phase;
        let outcome = match command {
            Command::DrawCard => self.draw(player),
            Command::PlayCard { card, mode } => self.play_card(player, *card, *mode),
            Command::NextPhase => self.advance_phase(player),
            Command::DeclareAttackers { attackers } => self.declare_attackers(player, attackers),
            Command::DeclareBlockers { assignments } => self.declare_blockers(player, assignments),
        }?;

        debug!(%player, command = command.name(), %phase, changed = outcome.changed, "command accepted");
        self.state.record(player, command.clone());
        Ok(outcome)
    }

    /// Draw the top card of the deck. An empty deck is a no-op.
    pub fn draw(&mut self, player: PlayerId) -> Result<CommandOutcome, CommandError> {
        self.require_active(player)?;
        if self.config.draw_policy == DrawPolicy::AutoDrawOnly || self.state.players[player].drawn_this_turn {
            return Err(CommandError::AlreadyDrawn);
        }

        let state = &mut self.state.players[player];
        match state.zones.draw() {
            Some(_) => {
                state.drawn_this_turn = true;
                Ok(CommandOutcome::changed())
            }
            None => Ok(CommandOutcome::unchanged()),
        }
    }

    /// Play a card from hand as mana or onto the battlefield.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        card: InstanceId,
        mode: PlayMode,
    ) -> Result<CommandOutcome, CommandError> {
        self.require_active(player)?;

        let state = &mut self.state.players[player];
        let instance = state
            .zones
            .get_in(card, Zone::Hand)
            .ok_or(CommandError::CardNotFound(card))?;

        match mode {
            PlayMode::Mana => {
                if state.mana_played_this_turn {
                    return Err(CommandError::ManaAlreadyPlayed);
                }
                state.zones.move_to(card, Zone::Mana, ZonePosition::Top);
                state.max_mana += 1;
                state.current_mana += 1;
                state.mana_played_this_turn = true;
            }
            PlayMode::Field => {
                let cost = instance.cost().max(0);
                if cost > state.current_mana {
                    return Err(CommandError::InsufficientMana {
                        needed: cost,
                        available: state.current_mana,
                    });
                }
                let effect = instance.template.effect.clone();

                state.current_mana -= cost;
                if let Some(instance) = state.zones.get_mut(card) {
                    instance.can_attack = false;
                }
                state.zones.move_to(card, Zone::Battlefield, ZonePosition::Top);

                if let Some(spec) = effect {
                    let mut ctx = EffectContext {
                        controller: player,
                        source: card,
                        players: &mut self.state.players,
                    };
                    if let ResolveResult::Resolved(message) = self.effects.resolve(&spec, &mut ctx) {
                        info!(%player, %message, "effect triggered");
                        self.events.push(GameEvent::EffectTriggered { player, message });
                    }
                }
            }
        }

        Ok(CommandOutcome::changed())
    }

    /// Advance the phase state machine.
    pub fn advance_phase(&mut self, player: PlayerId) -> Result<CommandOutcome, CommandError> {
        self.require_active(player)?;

        match self.state.phase.advance(self.state.combat.has_attackers()) {
            Transition::To(next) => {
                if self.state.phase == Phase::DeclareAttackers && next == Phase::MainPhase2 {
                    self.state.combat.clear();
                }
                self.state.phase = next;
            }
            Transition::ResolveCombat => {
                self.resolve_combat();
                self.state.phase = Phase::MainPhase2;
            }
            Transition::EndTurn => self.end_turn(),
        }

        Ok(CommandOutcome::changed())
    }

    /// Declare attackers. Ids that are not ready creatures of `player` are
    /// dropped.
    pub fn declare_attackers(
        &mut self,
        player: PlayerId,
        attackers: &[InstanceId],
    ) -> Result<CommandOutcome, CommandError> {
        self.require_active(player)?;
        if self.state.phase != Phase::DeclareAttackers {
            return Err(CommandError::WrongPhase);
        }
        if self.state.combat.attackers_declared {
            return Err(CommandError::AlreadyDeclared);
        }

        let target = AttackTarget::Player(player.opponent());
        let mut dropped = Vec::new();

        for &id in attackers {
            match self.state.players[player].zones.get_in_mut(id, Zone::Battlefield) {
                Some(card) if card.is_ready() => {
                    card.tapped = true;
                    self.state.combat.declare_attacker(id, target);
                }
                _ => {
                    warn!(%player, attacker = %id, "dropping invalid attacker");
                    dropped.push(id);
                }
            }
        }

        self.state.combat.attackers_declared = true;
        Ok(CommandOutcome::with_dropped(dropped))
    }

    /// Assign blockers. Only the defending seat may block. Blockers must be
    /// its own untapped battlefield creatures; each blocker may be claimed
    /// once, first come in attacker declaration order.
    pub fn declare_blockers(
        &mut self,
        player: PlayerId,
        assignments: &BTreeMap<InstanceId, Vec<InstanceId>>,
    ) -> Result<CommandOutcome, CommandError> {
        self.require_live()?;
        if player != self.state.defending_player() {
            return Err(CommandError::NotYourTurn);
        }
        if self.state.phase != Phase::DeclareBlockers {
            return Err(CommandError::WrongPhase);
        }
        if self.state.combat.blockers_declared {
            return Err(CommandError::AlreadyDeclared);
        }

        let zones = &self.state.players[player].zones;
        let mut claimed: FxHashSet<InstanceId> = FxHashSet::default();
        let mut accepted: Vec<(InstanceId, BlockerList)> = Vec::new();
        let mut dropped = Vec::new();

        for declaration in &self.state.combat.attackers {
            let Some(requested) = assignments.get(&declaration.attacker) else {
                continue;
            };
            let mut blockers = BlockerList::new();
            for &id in requested {
                let valid = zones.get_in(id, Zone::Battlefield).is_some_and(|c| !c.tapped);
                if valid && claimed.insert(id) {
                    blockers.push(id);
                } else {
                    warn!(%player, blocker = %id, attacker = %declaration.attacker, "dropping invalid blocker");
                    dropped.push(id);
                }
            }
            accepted.push((declaration.attacker, blockers));
        }

        for (attacker, blockers) in assignments {
            if !self.state.combat.is_attacking(*attacker) {
                warn!(%player, %attacker, "blockers assigned to a creature that is not attacking");
                dropped.extend(blockers.iter().copied());
            }
        }

        for (attacker, blockers) in accepted {
            self.state.combat.assign_blockers(attacker, blockers);
        }
        self.state.combat.blockers_declared = true;
        Ok(CommandOutcome::with_dropped(dropped))
    }

    // === Internals ===

    fn require_live(&self) -> Result<(), CommandError> {
        if self.state.is_over() {
            Err(CommandError::GameOver)
        } else {
            Ok(())
        }
    }

    fn require_active(&self, player: PlayerId) -> Result<(), CommandError> {
        self.require_live()?;
        if player == self.state.active_player {
            Ok(())
        } else {
            Err(CommandError::NotYourTurn)
        }
    }

    fn resolve_combat(&mut self) {
        let attacker = self.state.active_player;
        let defender = attacker.opponent();
        let (attacking, defending) = self.state.players.split_mut(attacker);

        let report = CombatResolver::resolve(attacking, defending, &self.state.combat);
        let defeated = report.lethal || defending.is_defeated();
        self.state.combat.clear();

        info!(
            %attacker,
            damage = report.player_damage,
            destroyed = report.destroyed.len(),
            defender_life = self.state.players[defender].life,
            "combat resolved"
        );
        self.events.push(GameEvent::CombatResolved { attacker, report });

        if defeated {
            let result = GameResult::Winner(attacker);
            info!(winner = %attacker, turn = self.state.turn_number, "game over");
            self.state.outcome = Some(result.clone());
            self.events.push(GameEvent::GameOver(result));
        }
    }

    fn end_turn(&mut self) {
        let from = self.state.active_player;
        let to = self.state.pass_turn();
        self.state.players[to].zones.draw();

        info!(%from, %to, turn = self.state.turn_number, "turn passed");
        self.events.push(GameEvent::TurnPassed {
            from,
            to,
            turn: self.state.turn_number,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardInstance};

    const P0: PlayerId = PlayerId::FIRST;
    const P1: PlayerId = PlayerId::SECOND;

    fn engine() -> GameEngine {
        let catalog = CardCatalog::standard();
        GameEngine::new(
            MatchConfig::new().with_seed(7),
            &catalog,
            Arc::new(EffectRegistry::standard()),
        )
    }

    fn put(engine: &mut GameEngine, seat: PlayerId, card: CardId, zone: Zone) -> InstanceId {
        let catalog = CardCatalog::standard();
        let seq = 1000 + engine.state().players[seat].zones.total_cards() as u32;
        let instance: CardInstance = DeckBuilder::new(&catalog, seat)
            .starting_at(seq)
            .single(card)
            .unwrap();
        let id = instance.id;
        engine.state_mut().players[seat].zones.add(instance, zone, ZonePosition::Top);
        id
    }

    #[test]
    fn test_new_match_setup() {
        let engine = engine();

        for seat in PlayerId::both() {
            let player = &engine.state().players[seat];
            assert_eq!(player.hand_size(), 5);
            assert_eq!(player.deck_size(), 35);
            assert_eq!(player.life, 20);
        }
        assert_eq!(engine.active_player(), P0);
        assert_eq!(engine.phase(), Phase::MainPhase1);
    }

    #[test]
    fn test_same_seed_same_decks() {
        let a = engine();
        let b = engine();

        assert_eq!(a.snapshot(P0).hand, b.snapshot(P0).hand);
        assert_eq!(a.snapshot(P1).hand, b.snapshot(P1).hand);
    }

    #[test]
    fn test_decklists_are_shuffled() {
        let catalog = CardCatalog::standard();
        let list: Vec<CardId> = (0..40).map(|i| CardId::new(i % 12 + 1)).collect();
        let lists = PlayerMap::with_value(list.clone());
        let config = MatchConfig::new().with_seed(3).with_opening_hand_size(0);
        let start = || {
            GameEngine::with_decklists(config.clone(), &catalog, &lists, Arc::new(EffectRegistry::standard()))
                .unwrap()
        };

        let engine = start();
        let deck: Vec<CardId> = engine.state().players[P0]
            .zones
            .cards_in(Zone::Deck)
            .map(|c| c.template.id)
            .collect();

        let mut reversed = list.clone();
        reversed.reverse();
        assert_ne!(deck, list);
        assert_ne!(deck, reversed);

        let mut sorted_deck = deck.clone();
        let mut sorted_list = list;
        sorted_deck.sort();
        sorted_list.sort();
        assert_eq!(sorted_deck, sorted_list);

        // Same seed, same order.
        assert_eq!(start().snapshot(P1), engine.snapshot(P1));
    }

    #[test]
    fn test_decklist_with_unknown_card() {
        let catalog = CardCatalog::standard();
        let lists = PlayerMap::new(|seat| if seat == P0 { vec![CardId::new(1)] } else { vec![CardId::new(99)] });

        let result = GameEngine::with_decklists(MatchConfig::new(), &catalog, &lists, Arc::new(EffectRegistry::standard()));

        assert!(matches!(result, Err(CatalogError::UnknownCard(id)) if id == CardId::new(99)));
    }

    #[test]
    fn test_draw_once_per_turn() {
        let mut engine = engine();

        engine.apply(P0, &Command::DrawCard).unwrap();
        assert_eq!(engine.state().players[P0].hand_size(), 6);
        assert_eq!(engine.apply(P0, &Command::DrawCard), Err(CommandError::AlreadyDrawn));
        assert_eq!(engine.state().players[P0].hand_size(), 6);
    }

    #[test]
    fn test_auto_draw_only_policy() {
        let catalog = CardCatalog::standard();
        let mut engine = GameEngine::new(
            MatchConfig::new().with_seed(1).with_draw_policy(DrawPolicy::AutoDrawOnly),
            &catalog,
            Arc::new(EffectRegistry::standard()),
        );

        assert_eq!(engine.apply(P0, &Command::DrawCard), Err(CommandError::AlreadyDrawn));
    }

    #[test]
    fn test_play_mana() {
        let mut engine = engine();
        let card = put(&mut engine, P0, CardId::new(8), Zone::Hand);

        engine.play_card(P0, card, PlayMode::Mana).unwrap();

        let player = &engine.state().players[P0];
        assert!(player.zones.is_in(card, Zone::Mana));
        assert_eq!(player.max_mana, 1);
        assert_eq!(player.current_mana, 1);
        assert!(player.mana_played_this_turn);
    }

    #[test]
    fn test_play_field_pays_cost_and_sets_sickness() {
        let mut engine = engine();
        engine.state_mut().players[P0].max_mana = 3;
        engine.state_mut().players[P0].current_mana = 3;
        let card = put(&mut engine, P0, CardId::new(4), Zone::Hand);

        engine.play_card(P0, card, PlayMode::Field).unwrap();

        let player = &engine.state().players[P0];
        assert_eq!(player.current_mana, 1);
        let on_field = player.zones.get_in(card, Zone::Battlefield).unwrap();
        assert!(!on_field.can_attack);
    }

    #[test]
    fn test_insufficient_mana() {
        let mut engine = engine();
        let card = put(&mut engine, P0, CardId::new(12), Zone::Hand);

        let result = engine.play_card(P0, card, PlayMode::Field);

        assert_eq!(result, Err(CommandError::InsufficientMana { needed: 7, available: 0 }));
        assert!(engine.state().players[P0].zones.is_in(card, Zone::Hand));
    }

    #[test]
    fn test_on_play_effect_draws() {
        let mut engine = engine();
        engine.state_mut().players[P0].current_mana = 3;
        engine.state_mut().players[P0].max_mana = 3;
        let scholar = put(&mut engine, P0, CardId::new(6), Zone::Hand);
        let hand_before = engine.state().players[P0].hand_size();

        engine.play_card(P0, scholar, PlayMode::Field).unwrap();

        // Scholar left the hand, one card drawn.
        assert_eq!(engine.state().players[P0].hand_size(), hand_before);
        let events = engine.drain_events();
        assert!(matches!(
            &events[..],
            [GameEvent::EffectTriggered { player, message }] if *player == P0 && message.contains("draws 1 card")
        ));
    }

    #[test]
    fn test_no_attackers_skips_blockers() {
        let mut engine = engine();

        engine.advance_phase(P0).unwrap();
        engine.declare_attackers(P0, &[]).unwrap();
        engine.advance_phase(P0).unwrap();

        assert_eq!(engine.phase(), Phase::MainPhase2);
    }

    #[test]
    fn test_attack_and_block_flow() {
        let mut engine = engine();
        let attacker = put(&mut engine, P0, CardId::new(5), Zone::Battlefield);
        let blocker = put(&mut engine, P1, CardId::new(2), Zone::Battlefield);
        engine.state_mut().players[P0].zones.get_mut(attacker).unwrap().refresh();

        engine.advance_phase(P0).unwrap();
        engine.declare_attackers(P0, &[attacker]).unwrap();
        assert!(engine.state().players[P0].zones.get(attacker).unwrap().tapped);
        engine.advance_phase(P0).unwrap();
        assert_eq!(engine.phase(), Phase::DeclareBlockers);

        let assignments = BTreeMap::from([(attacker, vec![blocker])]);
        engine.declare_blockers(P1, &assignments).unwrap();
        assert!(!engine.state().players[P1].zones.get(blocker).unwrap().tapped);

        engine.advance_phase(P0).unwrap();

        // Cinder Hound 3/2 into Stone Sentry 1/4.
        assert_eq!(engine.phase(), Phase::MainPhase2);
        assert_eq!(engine.state().players[P1].zones.get(blocker).unwrap().defense, 1);
        assert_eq!(engine.state().players[P0].zones.get(attacker).unwrap().defense, 1);
        assert!(!engine.state().combat.has_attackers());
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::CombatResolved {
                attacker: P0,
                report: CombatReport::default(),
            }]
        );
    }

    #[test]
    fn test_sick_attacker_dropped() {
        let mut engine = engine();
        let fresh = put(&mut engine, P0, CardId::new(4), Zone::Battlefield);

        engine.advance_phase(P0).unwrap();
        let outcome = engine.declare_attackers(P0, &[fresh]).unwrap();

        assert_eq!(outcome.dropped, vec![fresh]);
        assert!(!engine.state().combat.has_attackers());
    }

    #[test]
    fn test_blocker_claimed_once() {
        let mut engine = engine();
        let a1 = put(&mut engine, P0, CardId::new(4), Zone::Battlefield);
        let a2 = put(&mut engine, P0, CardId::new(4), Zone::Battlefield);
        let b = put(&mut engine, P1, CardId::new(2), Zone::Battlefield);
        for card in engine.state_mut().players[P0].zones.cards_in_mut(Zone::Battlefield) {
            card.refresh();
        }

        engine.advance_phase(P0).unwrap();
        engine.declare_attackers(P0, &[a1, a2]).unwrap();
        engine.advance_phase(P0).unwrap();

        let assignments = BTreeMap::from([(a1, vec![b]), (a2, vec![b])]);
        let outcome = engine.declare_blockers(P1, &assignments).unwrap();

        assert_eq!(outcome.dropped, vec![b]);
        assert_eq!(engine.state().combat.blockers_for(a1), &[b]);
        assert!(engine.state().combat.blockers_for(a2).is_empty());
    }

    #[test]
    fn test_repeat_declaration_rejected() {
        let mut engine = engine();

        engine.advance_phase(P0).unwrap();
        engine.declare_attackers(P0, &[]).unwrap();

        assert_eq!(engine.declare_attackers(P0, &[]), Err(CommandError::AlreadyDeclared));
    }

    #[test]
    fn test_end_turn_handoff() {
        let mut engine = engine();
        engine.state_mut().players[P1].max_mana = 3;
        let deck_before = engine.state().players[P1].deck_size();

        for _ in 0..3 {
            engine.apply(P0, &Command::NextPhase).unwrap();
        }
        assert_eq!(engine.phase(), Phase::EndPhase);
        engine.apply(P0, &Command::NextPhase).unwrap();

        let incoming = &engine.state().players[P1];
        assert_eq!(engine.active_player(), P1);
        assert_eq!(engine.phase(), Phase::MainPhase1);
        assert_eq!(engine.state().turn_number, 2);
        assert_eq!(incoming.current_mana, 3);
        assert_eq!(incoming.deck_size(), deck_before - 1);
        assert!(!incoming.drawn_this_turn);
        assert!(matches!(
            engine.drain_events().last(),
            Some(GameEvent::TurnPassed { from, to, turn: 2 }) if *from == P0 && *to == P1
        ));
    }

    #[test]
    fn test_history_recorded() {
        let mut engine = engine();

        engine.apply(P0, &Command::DrawCard).unwrap();
        engine.apply(P0, &Command::NextPhase).unwrap();
        let _ = engine.apply(P1, &Command::NextPhase);

        let history = &engine.state().history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].command, Command::DrawCard);
        assert_eq!(history[1].player, P0);
    }

    #[test]
    fn test_game_result_messages() {
        let result = GameResult::Winner(P1);

        assert!(result.is_winner(P1));
        assert!(!result.is_winner(P0));
        assert_eq!(result.message_for(P1), "You win!");
        assert_eq!(result.message_for(P0), "You lose!");
    }
}
