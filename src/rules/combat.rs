//! Combat: declarations and damage resolution.
//!
//! ## Resolution order
//!
//! 1. First-strike pass: first-strike attackers damage their blockers and
//!    first-strike blockers damage their attacker.
//! 2. Cleanup: creatures with defense <= 0 go to their owner's graveyard.
//! 3. Regular pass: every surviving creature that has not dealt damage yet
//!    deals it now.
//! 4. Cleanup again.
//! 5. Unblocked attackers damage the defending player; resolution stops the
//!    moment that player's life reaches 0.
//!
//! Damage inside one pass is simultaneous. An attacker's damage is split over
//! its blockers in declaration order, each blocker absorbing up to its
//! remaining defense; whatever is left after the last blocker is lost.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::state::PlayerState;
use crate::zones::{Zone, ZonePosition};

/// What an attacker is attacking. Only players can be attacked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackTarget {
    /// The defending player.
    Player(PlayerId),
}

/// One declared attacker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    pub attacker: InstanceId,
    pub target: AttackTarget,
}

/// Blockers in the order they absorb damage.
pub type BlockerList = SmallVec<[InstanceId; 4]>;

/// Declarations for the current combat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Attackers in declaration order.
    pub attackers: Vec<AttackDeclaration>,

    /// Attacker -> blockers.
    pub blocks: BTreeMap<InstanceId, BlockerList>,

    /// Attackers were declared this combat.
    pub attackers_declared: bool,

    /// Blockers were declared this combat.
    pub blockers_declared: bool,
}

impl CombatState {
    /// Create an empty combat state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attacker.
    pub fn declare_attacker(&mut self, attacker: InstanceId, target: AttackTarget) {
        self.attackers.push(AttackDeclaration { attacker, target });
    }

    /// Record the blockers for an attacker.
    pub fn assign_blockers(&mut self, attacker: InstanceId, blockers: BlockerList) {
        if !blockers.is_empty() {
            self.blocks.insert(attacker, blockers);
        }
    }

    /// Is any creature attacking?
    #[must_use]
    pub fn has_attackers(&self) -> bool {
        !self.attackers.is_empty()
    }

    /// Is this creature attacking?
    #[must_use]
    pub fn is_attacking(&self, id: InstanceId) -> bool {
        self.attackers.iter().any(|d| d.attacker == id)
    }

    /// Is this creature assigned as a blocker?
    #[must_use]
    pub fn is_blocking(&self, id: InstanceId) -> bool {
        self.blocks.values().any(|b| b.contains(&id))
    }

    /// Blockers assigned to an attacker.
    #[must_use]
    pub fn blockers_for(&self, attacker: InstanceId) -> &[InstanceId] {
        self.blocks.get(&attacker).map_or(&[], |b| b.as_slice())
    }

    /// Forget all declarations.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of one combat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Creatures moved to a graveyard, in removal order.
    pub destroyed: Vec<InstanceId>,

    /// Damage dealt to the defending player.
    pub player_damage: i32,

    /// The defending player's life reached 0.
    pub lethal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DamagePass {
    FirstStrike,
    Regular,
}

/// An attacker and the blockers that were still on the battlefield when
/// combat started.
struct Engagement {
    attacker: InstanceId,
    blockers: BlockerList,
}

/// Computes combat damage between two battlefields.
pub struct CombatResolver;

impl CombatResolver {
    /// Resolve a combat.
    ///
    /// `attacking` owns the declared attackers, `defending` owns the blockers
    /// and takes unblocked damage.
    pub fn resolve(
        attacking: &mut PlayerState,
        defending: &mut PlayerState,
        combat: &CombatState,
    ) -> CombatReport {
        let mut report = CombatReport::default();

        // Assignments that name no live blocker leave the attacker unblocked.
        let engagements: Vec<Engagement> = combat
            .attackers
            .iter()
            .filter(|d| attacking.zones.is_in(d.attacker, Zone::Battlefield))
            .map(|d| Engagement {
                attacker: d.attacker,
                blockers: combat
                    .blockers_for(d.attacker)
                    .iter()
                    .copied()
                    .filter(|&b| defending.zones.is_in(b, Zone::Battlefield))
                    .collect(),
            })
            .collect();

        let mut struck: FxHashSet<InstanceId> = FxHashSet::default();

        for pass in [DamagePass::FirstStrike, DamagePass::Regular] {
            for engagement in engagements.iter().filter(|e| !e.blockers.is_empty()) {
                Self::exchange(attacking, defending, engagement, pass, &mut struck);
            }
            report.destroyed.extend(Self::cleanup(attacking));
            report.destroyed.extend(Self::cleanup(defending));
        }

        for engagement in engagements.iter().filter(|e| e.blockers.is_empty()) {
            let Some(attacker) = attacking.zones.get_in(engagement.attacker, Zone::Battlefield) else {
                continue;
            };
            let damage = attacker.attack();
            defending.life -= damage;
            report.player_damage += damage;

            if defending.life <= 0 {
                report.lethal = true;
                break;
            }
        }

        report
    }

    /// Trade damage between one attacker and its blockers for a single pass.
    fn exchange(
        attacking: &mut PlayerState,
        defending: &mut PlayerState,
        engagement: &Engagement,
        pass: DamagePass,
        struck: &mut FxHashSet<InstanceId>,
    ) {
        let Some(attacker) = attacking.zones.get_in(engagement.attacker, Zone::Battlefield) else {
            return;
        };

        let blockers: BlockerList = engagement
            .blockers
            .iter()
            .copied()
            .filter(|&b| defending.zones.is_in(b, Zone::Battlefield))
            .collect();
        if blockers.is_empty() {
            return;
        }

        let strikes = |id: InstanceId, first_strike: bool, struck: &FxHashSet<InstanceId>| match pass {
            DamagePass::FirstStrike => first_strike,
            DamagePass::Regular => !struck.contains(&id),
        };

        let attacker_damage = if strikes(attacker.id, attacker.has_first_strike(), struck) {
            Some(attacker.attack())
        } else {
            None
        };

        // Blocker damage is totalled before anything is applied.
        let mut return_damage = 0;
        let mut striking_blockers: BlockerList = SmallVec::new();
        for &id in &blockers {
            if let Some(blocker) = defending.zones.get(id) {
                if strikes(id, blocker.has_first_strike(), struck) {
                    return_damage += blocker.attack();
                    striking_blockers.push(id);
                }
            }
        }

        if let Some(amount) = attacker_damage {
            struck.insert(engagement.attacker);
            Self::distribute(defending, &blockers, amount);
        }
        struck.extend(striking_blockers);

        if let Some(attacker) = attacking.zones.get_mut(engagement.attacker) {
            attacker.take_damage(return_damage);
        }
    }

    /// Split `amount` over blockers in order; excess is discarded.
    fn distribute(defending: &mut PlayerState, blockers: &[InstanceId], amount: i32) {
        let mut remaining = amount.max(0);
        for &id in blockers {
            if remaining == 0 {
                break;
            }
            if let Some(blocker) = defending.zones.get_mut(id) {
                let absorbed = remaining.min(blocker.defense.max(0));
                blocker.take_damage(absorbed);
                remaining -= absorbed;
            }
        }
    }

    /// Move destroyed creatures to the graveyard.
    fn cleanup(player: &mut PlayerState) -> Vec<InstanceId> {
        let dead: Vec<InstanceId> = player
            .zones
            .cards_in(Zone::Battlefield)
            .filter(|c| !c.is_alive())
            .map(|c| c.id)
            .collect();

        for &id in &dead {
            player.zones.move_to(id, Zone::Graveyard, ZonePosition::Top);
        }
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardInstance, CardTemplate, FIRST_STRIKE};

    struct Board {
        attacking: PlayerState,
        defending: PlayerState,
        combat: CombatState,
        next_seq: u32,
    }

    impl Board {
        fn new() -> Self {
            Self {
                attacking: PlayerState::new(PlayerId::FIRST, 20),
                defending: PlayerState::new(PlayerId::SECOND, 20),
                combat: CombatState::new(),
                next_seq: 0,
            }
        }

        fn creature(&mut self, owner: PlayerId, attack: i32, defense: i32, first_strike: bool) -> InstanceId {
            let mut template = CardTemplate::new(CardId::new(100), "Test Creature", 1, attack, defense);
            if first_strike {
                template = template.with_ability(FIRST_STRIKE);
            }
            let id = InstanceId::new(template.id, owner, self.next_seq);
            self.next_seq += 1;

            let player = if owner == PlayerId::FIRST { &mut self.attacking } else { &mut self.defending };
            player.zones.add(CardInstance::new(id, template), Zone::Battlefield, ZonePosition::Top);
            id
        }

        fn attack(&mut self, attacker: InstanceId, blockers: &[InstanceId]) {
            self.combat.declare_attacker(attacker, AttackTarget::Player(PlayerId::SECOND));
            self.combat.assign_blockers(attacker, blockers.iter().copied().collect());
        }

        fn resolve(&mut self) -> CombatReport {
            CombatResolver::resolve(&mut self.attacking, &mut self.defending, &self.combat)
        }
    }

    #[test]
    fn test_unblocked_attacker_hits_player() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 3, 3, false);
        board.attack(a, &[]);

        let report = board.resolve();

        assert_eq!(board.defending.life, 17);
        assert_eq!(report.player_damage, 3);
        assert!(board.attacking.zones.is_in(a, Zone::Battlefield));
    }

    #[test]
    fn test_blocked_trade() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 5, 5, false);
        let b = board.creature(PlayerId::SECOND, 2, 3, false);
        board.attack(a, &[b]);

        let report = board.resolve();

        assert!(board.defending.zones.is_in(b, Zone::Graveyard));
        assert_eq!(board.attacking.zones.get(a).unwrap().defense, 3);
        assert_eq!(board.defending.life, 20);
        assert_eq!(report.destroyed, vec![b]);
    }

    #[test]
    fn test_first_strike_kills_before_damage() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 4, 4, true);
        let b = board.creature(PlayerId::SECOND, 10, 3, false);
        board.attack(a, &[b]);

        board.resolve();

        assert!(board.defending.zones.is_in(b, Zone::Graveyard));
        assert_eq!(board.attacking.zones.get(a).unwrap().defense, 4);
    }

    #[test]
    fn test_first_strike_not_applied_twice() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 2, 5, true);
        let b = board.creature(PlayerId::SECOND, 1, 5, false);
        board.attack(a, &[b]);

        board.resolve();

        // 2 in the first-strike pass only; blocker strikes back for 1 in the regular pass.
        assert_eq!(board.defending.zones.get(b).unwrap().defense, 3);
        assert_eq!(board.attacking.zones.get(a).unwrap().defense, 4);
    }

    #[test]
    fn test_first_strike_blocker_kills_attacker_first() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 5, 2, false);
        let b = board.creature(PlayerId::SECOND, 2, 1, true);
        board.attack(a, &[b]);

        board.resolve();

        assert!(board.attacking.zones.is_in(a, Zone::Graveyard));
        assert_eq!(board.defending.zones.get(b).unwrap().defense, 1);
        assert!(board.defending.zones.is_in(b, Zone::Battlefield));
    }

    #[test]
    fn test_damage_split_in_order_without_overflow_carry() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 4, 10, false);
        let b1 = board.creature(PlayerId::SECOND, 1, 3, false);
        let b2 = board.creature(PlayerId::SECOND, 1, 3, false);
        board.attack(a, &[b1, b2]);

        board.resolve();

        assert!(board.defending.zones.is_in(b1, Zone::Graveyard));
        assert_eq!(board.defending.zones.get(b2).unwrap().defense, 2);
        assert_eq!(board.attacking.zones.get(a).unwrap().defense, 8);
    }

    #[test]
    fn test_excess_damage_discarded() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 9, 10, false);
        let b = board.creature(PlayerId::SECOND, 1, 2, false);
        board.attack(a, &[b]);

        let report = board.resolve();

        assert_eq!(report.player_damage, 0);
        assert_eq!(board.defending.life, 20);
    }

    #[test]
    fn test_assignment_to_missing_blocker_counts_as_unblocked() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 3, 3, false);
        let ghost = InstanceId::new(CardId::new(100), PlayerId::SECOND, 99);
        board.attack(a, &[ghost]);

        board.resolve();

        assert_eq!(board.defending.life, 17);
    }

    #[test]
    fn test_mutual_destruction() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 3, 3, false);
        let b = board.creature(PlayerId::SECOND, 3, 3, false);
        board.attack(a, &[b]);

        let report = board.resolve();

        assert!(board.attacking.zones.is_in(a, Zone::Graveyard));
        assert!(board.defending.zones.is_in(b, Zone::Graveyard));
        assert_eq!(report.destroyed.len(), 2);
    }

    #[test]
    fn test_lethal_stops_further_damage() {
        let mut board = Board::new();
        board.defending.life = 4;
        let a1 = board.creature(PlayerId::FIRST, 5, 1, false);
        let a2 = board.creature(PlayerId::FIRST, 5, 1, false);
        board.attack(a1, &[]);
        board.attack(a2, &[]);

        let report = board.resolve();

        assert!(report.lethal);
        assert_eq!(board.defending.life, -1);
        assert_eq!(report.player_damage, 5);
    }

    #[test]
    fn test_combat_state_queries() {
        let mut board = Board::new();
        let a = board.creature(PlayerId::FIRST, 1, 1, false);
        let b = board.creature(PlayerId::SECOND, 1, 1, false);
        board.attack(a, &[b]);

        assert!(board.combat.has_attackers());
        assert!(board.combat.is_attacking(a));
        assert!(board.combat.is_blocking(b));
        assert_eq!(board.combat.blockers_for(a), &[b]);

        board.combat.clear();
        assert!(!board.combat.has_attackers());
        assert!(board.combat.blockers_for(a).is_empty());
    }
}
