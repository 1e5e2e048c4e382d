//! Match registry.
//!
//! Maps match ids to isolated matches. Each match sits behind its own mutex,
//! so commands for one match are applied strictly one at a time while
//! different matches never wait on each other. The card catalog and effect
//! handlers are immutable and shared by every match.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::SessionError;
use super::message::{decode_command, ClientId, Delivery};
use super::room::Match;
use crate::cards::CardCatalog;
use crate::core::action::Command;
use crate::core::config::MatchConfig;
use crate::core::player::PlayerId;
use crate::effects::EffectRegistry;

/// Match identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "match-{}", self.0)
    }
}

/// All live matches.
///
/// ```
/// use duel_ccg::core::MatchConfig;
/// use duel_ccg::session::{ClientId, MatchRegistry};
///
/// let registry = MatchRegistry::standard();
/// let id = registry.create(MatchConfig::new().with_seed(1));
///
/// registry.join(id, ClientId(1)).unwrap();
/// let (_, deliveries) = registry.join(id, ClientId(2)).unwrap();
/// assert_eq!(deliveries.len(), 2);
/// ```
pub struct MatchRegistry {
    matches: DashMap<MatchId, Arc<Mutex<Match>>>,
    next_id: AtomicU64,
    catalog: Arc<CardCatalog>,
    effects: Arc<EffectRegistry>,
}

impl MatchRegistry {
    /// Create a registry over a catalog and effect handlers.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, effects: Arc<EffectRegistry>) -> Self {
        Self {
            matches: DashMap::new(),
            next_id: AtomicU64::new(1),
            catalog,
            effects,
        }
    }

    /// Registry over the standard catalog and built-in effects.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Arc::new(CardCatalog::standard()), Arc::new(EffectRegistry::standard()))
    }

    /// Open a waiting two-player match.
    pub fn create(&self, config: MatchConfig) -> MatchId {
        let id = self.allocate();
        let room = Match::new(id, config, Arc::clone(&self.catalog), Arc::clone(&self.effects));
        self.matches.insert(id, Arc::new(Mutex::new(room)));
        info!(match_id = %id, "match created");
        id
    }

    /// Open a match against the computer.
    pub fn create_solo(&self, config: MatchConfig) -> MatchId {
        let id = self.allocate();
        let room = Match::solo(id, config, Arc::clone(&self.catalog), Arc::clone(&self.effects));
        self.matches.insert(id, Arc::new(Mutex::new(room)));
        info!(match_id = %id, "solo match created");
        id
    }

    fn allocate(&self) -> MatchId {
        MatchId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Handle to a match.
    #[must_use]
    pub fn get(&self, id: MatchId) -> Option<Arc<Mutex<Match>>> {
        self.matches.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    fn lookup(&self, id: MatchId) -> Result<Arc<Mutex<Match>>, SessionError> {
        self.get(id).ok_or(SessionError::UnknownMatch(id))
    }

    /// Does the match exist?
    #[must_use]
    pub fn contains(&self, id: MatchId) -> bool {
        self.matches.contains_key(&id)
    }

    /// Number of live matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// No live matches?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Seat a client.
    pub fn join(&self, id: MatchId, client: ClientId) -> Result<(PlayerId, Vec<Delivery>), SessionError> {
        self.lookup(id)?.lock().join(client)
    }

    /// Free a client's seat. The match is destroyed once no client is seated.
    ///
    /// Removal re-checks the seats under the map's shard lock, so a client
    /// that joins between the leave and the removal keeps the match alive.
    /// A client still holding a handle to a destroyed match cannot join it.
    pub fn leave(&self, id: MatchId, client: ClientId) -> Result<PlayerId, SessionError> {
        let seat = self.lookup(id)?.lock().leave(client)?;

        let removed = self.matches.remove_if(&id, |_, room| {
            let mut room = room.lock();
            if room.is_abandoned() {
                room.close();
                true
            } else {
                false
            }
        });
        if removed.is_some() {
            info!(match_id = %id, "match destroyed");
        }
        Ok(seat)
    }

    /// Apply a command from a seated client.
    pub fn submit(&self, id: MatchId, client: ClientId, command: &Command) -> Result<Vec<Delivery>, SessionError> {
        self.lookup(id)?.lock().submit(client, command)
    }

    /// Decode and apply a JSON command.
    pub fn submit_json(&self, id: MatchId, client: ClientId, text: &str) -> Result<Vec<Delivery>, SessionError> {
        let command = decode_command(text)?;
        self.submit(id, client, &command)
    }

    /// Expire the active seat's turn timer.
    pub fn expire_turn(&self, id: MatchId) -> Result<Vec<Delivery>, SessionError> {
        self.lookup(id)?.lock().expire_turn()
    }
}
