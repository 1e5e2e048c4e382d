//! Effect resolution - dispatching effects to handlers.
//!
//! The `EffectRegistry` maps effect kinds to `EffectHandler`s. The engine
//! hands every triggered `EffectSpec` to the registry; it never matches on
//! effect kinds itself.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::effect::{EffectSpec, DRAW_CARDS};
use crate::core::entity::InstanceId;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::PlayerState;

/// What a handler may touch while resolving.
pub struct EffectContext<'a> {
    /// Player controlling the source card.
    pub controller: PlayerId,
    /// Card whose effect is resolving.
    pub source: InstanceId,
    /// Both players' state.
    pub players: &'a mut PlayerMap<PlayerState>,
}

impl EffectContext<'_> {
    /// Display name of the source card.
    #[must_use]
    pub fn source_name(&self) -> String {
        self.players[self.controller]
            .zones
            .get(self.source)
            .map_or_else(|| self.source.to_string(), |c| c.template.name.clone())
    }
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved; the message is shown to players.
    Resolved(String),
    /// Effect had nothing to do.
    Skipped,
    /// No handler is registered for this kind.
    Unknown(String),
}

/// Executes one kind of effect.
pub trait EffectHandler: Send + Sync {
    /// Apply the effect, returning a player-facing message.
    fn apply(&self, spec: &EffectSpec, ctx: &mut EffectContext<'_>) -> ResolveResult;
}

/// Draws `count` cards (default 1) for the controller.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawCards;

impl EffectHandler for DrawCards {
    fn apply(&self, spec: &EffectSpec, ctx: &mut EffectContext<'_>) -> ResolveResult {
        let count = spec.param("count", 1).max(0);
        let player = &mut ctx.players[ctx.controller];

        // Stops at the first empty draw, so huge counts cost at most a deck.
        let drawn = (0..count).map_while(|_| player.zones.draw()).count();
        if drawn == 0 {
            return ResolveResult::Skipped;
        }

        let plural = if drawn == 1 { "card" } else { "cards" };
        ResolveResult::Resolved(format!(
            "{}: {} draws {} {}.",
            ctx.source_name(),
            ctx.controller,
            drawn,
            plural
        ))
    }
}

/// Effect handlers keyed by kind.
///
/// ```
/// use duel_ccg::effects::{EffectRegistry, DRAW_CARDS};
///
/// let registry = EffectRegistry::standard();
/// assert!(registry.handles(DRAW_CARDS));
/// assert!(!registry.handles("summon_dragon"));
/// ```
#[derive(Default)]
pub struct EffectRegistry {
    handlers: FxHashMap<String, Box<dyn EffectHandler>>,
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.handlers.keys().collect();
        kinds.sort();
        f.debug_struct("EffectRegistry").field("kinds", &kinds).finish()
    }
}

impl EffectRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in handlers.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(DRAW_CARDS, DrawCards);
        registry
    }

    /// Register (or replace) the handler for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, handler: impl EffectHandler + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    /// Is there a handler for `kind`?
    #[must_use]
    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Dispatch an effect to its handler.
    pub fn resolve(&self, spec: &EffectSpec, ctx: &mut EffectContext<'_>) -> ResolveResult {
        match self.handlers.get(&spec.kind) {
            Some(handler) => handler.apply(spec, ctx),
            None => {
                warn!(kind = %spec.kind, source = %ctx.source, "no handler for effect kind");
                ResolveResult::Unknown(spec.kind.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardId, DeckBuilder};
    use crate::zones::{Zone, ZonePosition};

    fn players_with_deck(deck_cards: usize) -> (PlayerMap<PlayerState>, InstanceId) {
        let catalog = CardCatalog::standard();
        let mut players = PlayerMap::new(|p| PlayerState::new(p, 20));
        let mut builder = DeckBuilder::new(&catalog, PlayerId::FIRST);

        for card in builder.from_list(&vec![CardId::new(1); deck_cards]).unwrap() {
            players[PlayerId::FIRST].zones.add(card, Zone::Deck, ZonePosition::Top);
        }
        let scholar = builder.single(CardId::new(6)).unwrap();
        let source = scholar.id;
        players[PlayerId::FIRST].zones.add(scholar, Zone::Battlefield, ZonePosition::Top);

        (players, source)
    }

    #[test]
    fn test_draw_handler() {
        let (mut players, source) = players_with_deck(3);
        let registry = EffectRegistry::standard();
        let mut ctx = EffectContext {
            controller: PlayerId::FIRST,
            source,
            players: &mut players,
        };

        let result = registry.resolve(&EffectSpec::draw(2), &mut ctx);

        assert_eq!(
            result,
            ResolveResult::Resolved("River Scholar: Player 0 draws 2 cards.".to_string())
        );
        assert_eq!(players[PlayerId::FIRST].zones.zone_size(Zone::Hand), 2);
        assert_eq!(players[PlayerId::FIRST].zones.zone_size(Zone::Deck), 1);
    }

    #[test]
    fn test_draw_handler_empty_deck() {
        let (mut players, source) = players_with_deck(0);
        let mut ctx = EffectContext {
            controller: PlayerId::FIRST,
            source,
            players: &mut players,
        };

        assert_eq!(DrawCards.apply(&EffectSpec::draw(1), &mut ctx), ResolveResult::Skipped);
    }

    #[test]
    fn test_draw_handler_huge_count_empties_deck() {
        let (mut players, source) = players_with_deck(4);
        let mut ctx = EffectContext {
            controller: PlayerId::FIRST,
            source,
            players: &mut players,
        };

        let result = DrawCards.apply(&EffectSpec::draw(i64::MAX), &mut ctx);

        assert_eq!(
            result,
            ResolveResult::Resolved("River Scholar: Player 0 draws 4 cards.".to_string())
        );
        assert_eq!(players[PlayerId::FIRST].zones.zone_size(Zone::Deck), 0);
        assert_eq!(players[PlayerId::FIRST].zones.zone_size(Zone::Hand), 4);
    }

    #[test]
    fn test_unknown_kind() {
        let (mut players, source) = players_with_deck(1);
        let mut ctx = EffectContext {
            controller: PlayerId::FIRST,
            source,
            players: &mut players,
        };

        let result = EffectRegistry::standard().resolve(&EffectSpec::new("meteor"), &mut ctx);
        assert_eq!(result, ResolveResult::Unknown("meteor".to_string()));
        assert_eq!(players[PlayerId::FIRST].zones.zone_size(Zone::Hand), 0);
    }

    #[test]
    fn test_custom_handler() {
        struct GainLife;
        impl EffectHandler for GainLife {
            fn apply(&self, spec: &EffectSpec, ctx: &mut EffectContext<'_>) -> ResolveResult {
                let amount = spec.param("amount", 0) as i32;
                ctx.players[ctx.controller].life += amount;
                ResolveResult::Resolved(format!("gained {amount}"))
            }
        }

        let (mut players, source) = players_with_deck(0);
        let mut registry = EffectRegistry::standard();
        registry.register("gain_life", GainLife);

        let mut ctx = EffectContext {
            controller: PlayerId::FIRST,
            source,
            players: &mut players,
        };
        registry.resolve(&EffectSpec::new("gain_life").with_param("amount", 4), &mut ctx);

        assert_eq!(players[PlayerId::FIRST].life, 24);
    }
}
