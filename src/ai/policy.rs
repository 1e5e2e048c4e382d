//! Opponent policies for solo play.
//!
//! A policy looks at the state and proposes the next command for its seat,
//! one command at a time. `play_turn` feeds those commands through the
//! engine until the turn is handed over or the match ends, so a policy can
//! never do anything a human seat could not.

use tracing::{debug, warn};

use crate::core::action::{Command, PlayMode};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::{GameEngine, Phase};
use crate::zones::Zone;

/// Upper bound on commands issued in one turn.
pub const MAX_TURN_COMMANDS: usize = 16;

/// Chooses commands for a computer-controlled seat.
pub trait OpponentPolicy: Send + Sync {
    /// Next command for `seat`.
    ///
    /// Returns `None` if the seat has nothing to do.
    fn choose_command(&self, state: &GameState, seat: PlayerId) -> Option<Command>;
}

/// First-match greedy policy.
///
/// Each turn:
/// 1. Commit the first hand card as mana (if no mana was played yet).
/// 2. Play the first affordable hand card to the battlefield.
/// 3. Attack with every ready creature.
/// 4. Advance phases until the turn passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyOpponent;

impl GreedyOpponent {
    fn played_to_field(state: &GameState, seat: PlayerId) -> bool {
        state.history.iter().any(|record| {
            record.player == seat
                && record.turn == state.turn_number
                && matches!(record.command, Command::PlayCard { mode: PlayMode::Field, .. })
        })
    }
}

impl OpponentPolicy for GreedyOpponent {
    fn choose_command(&self, state: &GameState, seat: PlayerId) -> Option<Command> {
        if state.is_over() || state.active_player != seat {
            return None;
        }
        let me = &state.players[seat];

        let command = match state.phase {
            Phase::MainPhase1 => {
                if !me.mana_played_this_turn {
                    if let Some(&card) = me.zones.ids_in(Zone::Hand).first() {
                        return Some(Command::PlayCard { card, mode: PlayMode::Mana });
                    }
                }
                let affordable = me
                    .zones
                    .cards_in(Zone::Hand)
                    .find(|c| c.cost() <= me.current_mana)
                    .map(|c| c.id);
                match affordable {
                    Some(card) if !Self::played_to_field(state, seat) => {
                        Command::PlayCard { card, mode: PlayMode::Field }
                    }
                    _ => Command::NextPhase,
                }
            }
            Phase::DeclareAttackers if !state.combat.attackers_declared => Command::DeclareAttackers {
                attackers: me
                    .zones
                    .cards_in(Zone::Battlefield)
                    .filter(|c| c.is_ready())
                    .map(|c| c.id)
                    .collect(),
            },
            _ => Command::NextPhase,
        };
        Some(command)
    }
}

/// Let `policy` play `seat`'s turn to completion.
///
/// Returns the commands that were accepted.
pub fn play_turn(policy: &dyn OpponentPolicy, engine: &mut GameEngine, seat: PlayerId) -> Vec<Command> {
    let mut issued = Vec::new();

    for _ in 0..MAX_TURN_COMMANDS {
        let Some(command) = policy.choose_command(engine.state(), seat) else {
            break;
        };
        match engine.apply(seat, &command) {
            Ok(_) => {
                debug!(%seat, command = command.name(), "policy command");
                issued.push(command);
            }
            Err(err) => {
                warn!(%seat, command = command.name(), %err, "policy command rejected");
                break;
            }
        }
        if engine.is_over() || engine.active_player() != seat {
            break;
        }
    }

    issued
}
