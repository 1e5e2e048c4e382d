//! Turn phases.
//!
//! ```text
//! MainPhase1 -> DeclareAttackers -> DeclareBlockers -> MainPhase2 -> EndPhase
//!      ^               |   (no attackers)                  ^           |
//!      |               +-----------------------------------+           |
//!      +--------------------------- turn handoff ----------------------+
//! ```

use serde::{Deserialize, Serialize};

/// A step of the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Play mana and creatures.
    #[default]
    #[serde(rename = "MAIN_PHASE_1")]
    MainPhase1,
    /// Active player declares attackers.
    DeclareAttackers,
    /// Defending player declares blockers.
    DeclareBlockers,
    /// Play mana and creatures after combat.
    #[serde(rename = "MAIN_PHASE_2")]
    MainPhase2,
    /// Leaving this phase hands the turn over.
    EndPhase,
}

/// What leaving a phase does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Move to the next phase of the same turn.
    To(Phase),
    /// Resolve combat, then move to `MainPhase2`.
    ResolveCombat,
    /// End the turn and hand off to the opponent.
    EndTurn,
}

impl Phase {
    /// Transition taken when the active player advances out of this phase.
    ///
    /// `has_attackers` only matters when leaving `DeclareAttackers`: with no
    /// attackers the blockers step is skipped.
    ///
    /// ```
    /// use duel_ccg::rules::{Phase, Transition};
    ///
    /// assert_eq!(Phase::DeclareAttackers.advance(false), Transition::To(Phase::MainPhase2));
    /// assert_eq!(Phase::DeclareAttackers.advance(true), Transition::To(Phase::DeclareBlockers));
    /// assert_eq!(Phase::DeclareBlockers.advance(true), Transition::ResolveCombat);
    /// ```
    #[must_use]
    pub fn advance(self, has_attackers: bool) -> Transition {
        match self {
            Phase::MainPhase1 => Transition::To(Phase::DeclareAttackers),
            Phase::DeclareAttackers if has_attackers => Transition::To(Phase::DeclareBlockers),
            Phase::DeclareAttackers => Transition::To(Phase::MainPhase2),
            Phase::DeclareBlockers => Transition::ResolveCombat,
            Phase::MainPhase2 => Transition::To(Phase::EndPhase),
            Phase::EndPhase => Transition::EndTurn,
        }
    }

    /// Wire name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::MainPhase1 => "MAIN_PHASE_1",
            Phase::DeclareAttackers => "DECLARE_ATTACKERS",
            Phase::DeclareBlockers => "DECLARE_BLOCKERS",
            Phase::MainPhase2 => "MAIN_PHASE_2",
            Phase::EndPhase => "END_PHASE",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        assert_eq!(Phase::MainPhase1.advance(false), Transition::To(Phase::DeclareAttackers));
        assert_eq!(Phase::MainPhase2.advance(false), Transition::To(Phase::EndPhase));
        assert_eq!(Phase::EndPhase.advance(false), Transition::EndTurn);
    }

    #[test]
    fn test_wire_names_match_serde() {
        for phase in [
            Phase::MainPhase1,
            Phase::DeclareAttackers,
            Phase::DeclareBlockers,
            Phase::MainPhase2,
            Phase::EndPhase,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.name()));
        }
    }
}
