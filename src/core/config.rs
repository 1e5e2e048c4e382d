//! Match configuration.
//!
//! Hosts configure a match at creation time via `MatchConfig`:
//! starting life, deck and opening hand sizes, the draw policy, the seat that
//! moves first, and an optional RNG seed.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// How the manual `draw_card` command is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// The active player may draw manually once per turn, in addition to the
    /// automatic draw at the start of each handed-off turn.
    #[default]
    OncePerTurn,
    /// Only the automatic turn-start draw happens; `draw_card` is rejected.
    AutoDrawOnly,
}

/// Complete match configuration.
///
/// ```
/// use duel_ccg::core::{DrawPolicy, MatchConfig};
///
/// let config = MatchConfig::new()
///     .with_starting_life(30)
///     .with_seed(7)
///     .with_draw_policy(DrawPolicy::AutoDrawOnly);
///
/// assert_eq!(config.starting_life, 30);
/// assert_eq!(config.deck_size, 40);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Life total each player starts with.
    pub starting_life: i32,

    /// Number of cards in each constructed deck.
    pub deck_size: usize,

    /// Cards drawn by each player before the first turn.
    pub opening_hand_size: usize,

    /// Manual draw policy.
    pub draw_policy: DrawPolicy,

    /// Seat that takes the first turn.
    pub first_player: PlayerId,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            deck_size: 40,
            opening_hand_size: 5,
            draw_policy: DrawPolicy::OncePerTurn,
            first_player: PlayerId::FIRST,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the draw policy.
    #[must_use]
    pub fn with_draw_policy(mut self, policy: DrawPolicy) -> Self {
        self.draw_policy = policy;
        self
    }

    /// Set the seat that moves first.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
