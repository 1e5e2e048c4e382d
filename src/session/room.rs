//! One match: two seats and the engine behind them.
//!
//! ## Lifecycle
//!
//! ```text
//! Waiting --(second seat filled)--> Running --(seat leaves)--> Waiting
//! ```
//!
//! The engine exists only while both seats are filled. When a seat leaves,
//! the engine is dropped and the match waits for a new opponent; nothing of
//! the abandoned game survives.
//!
//! In solo matches seat 1 is taken by a computer policy, which plays its
//! whole turn inside the command that handed it the turn.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::SessionError;
use super::message::{ClientId, Delivery, Notification};
use super::registry::MatchId;
use crate::ai::{play_turn, GreedyOpponent, OpponentPolicy};
use crate::cards::CardCatalog;
use crate::core::action::Command;
use crate::core::config::MatchConfig;
use crate::core::player::{PlayerId, PlayerMap};
use crate::effects::EffectRegistry;
use crate::rules::{GameEngine, GameEvent};

/// Who sits in a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    /// A connected client.
    Human(ClientId),
    /// The solo-mode policy.
    Computer,
}

/// A two-seat match.
pub struct Match {
    id: MatchId,
    config: MatchConfig,
    catalog: Arc<CardCatalog>,
    effects: Arc<EffectRegistry>,
    seats: PlayerMap<Option<Occupant>>,
    engine: Option<GameEngine>,
    policy: Box<dyn OpponentPolicy>,
    game_over_sent: PlayerMap<bool>,
    closed: bool,
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("id", &self.id)
            .field("seats", &self.seats)
            .field("running", &self.engine.is_some())
            .finish()
    }
}

impl Match {
    /// Create a waiting match.
    #[must_use]
    pub fn new(id: MatchId, config: MatchConfig, catalog: Arc<CardCatalog>, effects: Arc<EffectRegistry>) -> Self {
        Self {
            id,
            config,
            catalog,
            effects,
            seats: PlayerMap::with_value(None),
            engine: None,
            policy: Box::new(GreedyOpponent),
            game_over_sent: PlayerMap::with_value(false),
            closed: false,
        }
    }

    /// Create a solo match: seat 1 is played by the greedy policy.
    #[must_use]
    pub fn solo(id: MatchId, config: MatchConfig, catalog: Arc<CardCatalog>, effects: Arc<EffectRegistry>) -> Self {
        let mut room = Self::new(id, config, catalog, effects);
        room.seats[PlayerId::SECOND] = Some(Occupant::Computer);
        room
    }

    /// Replace the computer policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    // === Queries ===

    /// Match id.
    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Is a game in progress?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.engine.is_some()
    }

    /// The engine, while running.
    #[must_use]
    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    /// Mutable engine, while running.
    pub fn engine_mut(&mut self) -> Option<&mut GameEngine> {
        self.engine.as_mut()
    }

    /// Seat held by `client`.
    #[must_use]
    pub fn seat_of(&self, client: ClientId) -> Option<PlayerId> {
        PlayerId::both().find(|&seat| self.seats[seat] == Some(Occupant::Human(client)))
    }

    /// Occupant of a seat.
    #[must_use]
    pub fn occupant(&self, seat: PlayerId) -> Option<Occupant> {
        self.seats[seat]
    }

    /// No human is seated.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        !self.seats.iter().any(|(_, o)| matches!(o, Some(Occupant::Human(_))))
    }

    /// Has the match been destroyed?
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mark the match destroyed. Later joins are refused.
    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.engine = None;
    }

    // === Lifecycle ===

    /// Seat a client. The game starts as soon as both seats are filled.
    pub fn join(&mut self, client: ClientId) -> Result<(PlayerId, Vec<Delivery>), SessionError> {
        if self.closed {
            return Err(SessionError::UnknownMatch(self.id));
        }
        if let Some(seat) = self.seat_of(client) {
            return Ok((seat, vec![self.greeting(seat, client)]));
        }

        let seat = PlayerId::both()
            .find(|&seat| self.seats[seat].is_none())
            .ok_or(SessionError::MatchFull)?;
        self.seats[seat] = Some(Occupant::Human(client));
        info!(match_id = %self.id, %client, %seat, "seat joined");

        if !self.seats.iter().all(|(_, o)| o.is_some()) {
            return Ok((seat, vec![self.greeting(seat, client)]));
        }

        self.start();
        self.run_computer_turns();
        Ok((seat, self.flush()))
    }

    /// What a seat sees on connect: its snapshot, or a waiting notice.
    fn greeting(&self, seat: PlayerId, client: ClientId) -> Delivery {
        let notification = match &self.engine {
            Some(engine) => Notification::State {
                view: Box::new(engine.snapshot(seat)),
            },
            None => Notification::Waiting { seat },
        };
        Delivery {
            seat,
            client,
            notification,
        }
    }

    /// Free a client's seat and reset the match to waiting.
    pub fn leave(&mut self, client: ClientId) -> Result<PlayerId, SessionError> {
        let seat = self.seat_of(client).ok_or(SessionError::NotSeated)?;
        self.seats[seat] = None;

        if self.engine.take().is_some() {
            info!(match_id = %self.id, %client, "match reset to waiting");
        }
        self.game_over_sent = PlayerMap::with_value(false);
        info!(match_id = %self.id, %client, %seat, "seat left");
        Ok(seat)
    }

    fn start(&mut self) {
        let engine = GameEngine::new(self.config.clone(), &self.catalog, Arc::clone(&self.effects));
        self.engine = Some(engine);
        self.game_over_sent = PlayerMap::with_value(false);
        info!(match_id = %self.id, "match running");
    }

    // === Commands ===

    /// Apply a command from a seated client.
    pub fn submit(&mut self, client: ClientId, command: &Command) -> Result<Vec<Delivery>, SessionError> {
        let seat = self.seat_of(client).ok_or(SessionError::NotSeated)?;
        self.apply(seat, command)
    }

    /// Treat the active seat's turn timer as expired: an implicit `next_phase`.
    pub fn expire_turn(&mut self) -> Result<Vec<Delivery>, SessionError> {
        let engine = self.engine.as_ref().ok_or(SessionError::NotStarted)?;
        let seat = engine.active_player();
        self.apply(seat, &Command::NextPhase)
    }

    fn apply(&mut self, seat: PlayerId, command: &Command) -> Result<Vec<Delivery>, SessionError> {
        let engine = self.engine.as_mut().ok_or(SessionError::NotStarted)?;

        if let Err(err) = engine.apply(seat, command) {
            warn!(match_id = %self.id, %seat, command = command.name(), kind = err.kind(), "command rejected");
            return Err(err.into());
        }

        self.run_computer_turns();
        Ok(self.flush())
    }

    /// Let the computer play while it holds the turn.
    fn run_computer_turns(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        while !engine.is_over() {
            let seat = engine.active_player();
            if self.seats[seat] != Some(Occupant::Computer) {
                break;
            }
            let issued = play_turn(self.policy.as_ref(), engine, seat);
            if engine.active_player() == seat && !engine.is_over() {
                warn!(match_id = %self.id, %seat, commands = issued.len(), "computer turn did not finish");
                break;
            }
        }
    }

    /// Turn queued engine events and fresh snapshots into deliveries.
    fn flush(&mut self) -> Vec<Delivery> {
        let Some(engine) = self.engine.as_mut() else {
            return Vec::new();
        };
        let events = engine.drain_events();
        let mut deliveries = Vec::new();

        for seat in PlayerId::both() {
            let Some(Occupant::Human(client)) = self.seats[seat] else {
                continue;
            };
            let mut send = |notification| {
                deliveries.push(Delivery {
                    seat,
                    client,
                    notification,
                })
            };

            send(Notification::State {
                view: Box::new(engine.snapshot(seat)),
            });

            for event in &events {
                match event {
                    GameEvent::EffectTriggered { message, .. } => send(Notification::EffectTriggered {
                        message: message.clone(),
                    }),
                    GameEvent::GameOver(result) if !self.game_over_sent[seat] => {
                        self.game_over_sent[seat] = true;
                        send(Notification::GameOver {
                            message: result.message_for(seat).to_string(),
                        });
                    }
                    _ => {}
                }
            }
        }

        deliveries
    }
}
