//! Effect descriptors.
//!
//! A card's triggered effect is data: a `kind` naming the handler that runs
//! it and integer parameters the handler interprets. New effects are added
//! by registering a handler for a new kind, not by changing the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Effect kind for "draw cards". Parameter `count` (default 1).
pub const DRAW_CARDS: &str = "draw";

/// Triggered effect attached to a card template.
///
/// ```
/// use duel_ccg::effects::{EffectSpec, DRAW_CARDS};
///
/// let spec = EffectSpec::draw(2);
/// assert_eq!(spec.kind, DRAW_CARDS);
/// assert_eq!(spec.param("count", 1), 2);
/// assert_eq!(spec.param("missing", 7), 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Handler key.
    pub kind: String,

    /// Integer parameters, interpreted by the handler.
    #[serde(default)]
    pub params: BTreeMap<String, i64>,
}

impl EffectSpec {
    /// Create an effect with no parameters.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: i64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Create a draw-cards effect.
    #[must_use]
    pub fn draw(count: i64) -> Self {
        Self::new(DRAW_CARDS).with_param("count", count)
    }

    /// Get a parameter with a default.
    #[must_use]
    pub fn param(&self, key: &str, default: i64) -> i64 {
        self.params.get(key).copied().unwrap_or(default)
    }
}
