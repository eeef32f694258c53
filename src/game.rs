//! Game engine: repeated prisoner's dilemma between two agents
//!
//! Payoffs are written straight into the agents; the return value only
//! carries action counts for the realized cooperation rate.

use crate::agent::Agent;
use crate::strategy::Action;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Temptation, reward, punishment and sucker's payoffs
pub const TEMPTATION: f64 = 5.0;
pub const REWARD: f64 = 3.0;
pub const PUNISHMENT: f64 = 1.0;
pub const SUCKER: f64 = 0.0;

/// Payoffs `(row, column)` for one round
pub fn payoff(a_i: Action, a_j: Action) -> (f64, f64) {
    match (a_i, a_j) {
        (Action::Cooperate, Action::Cooperate) => (REWARD, REWARD),
        (Action::Cooperate, Action::Defect) => (SUCKER, TEMPTATION),
        (Action::Defect, Action::Cooperate) => (TEMPTATION, SUCKER),
        (Action::Defect, Action::Defect) => (PUNISHMENT, PUNISHMENT),
    }
}

/// Action counts observed in one match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Cooperate moves made by either player, `0..=2T`
    pub cooperative_actions: usize,
    /// Always `2T`
    pub total_actions: usize,
}

impl MatchOutcome {
    pub fn absorb(&mut self, other: MatchOutcome) {
        self.cooperative_actions += other.cooperative_actions;
        self.total_actions += other.total_actions;
    }

    pub fn cooperation_rate(&self) -> f64 {
        if self.total_actions == 0 {
            0.0
        } else {
            self.cooperative_actions as f64 / self.total_actions as f64
        }
    }
}

/// Play `rounds` rounds between `agent_i` and `agent_j`, adding each round's
/// payoff to both agents.
///
/// Strategies are deterministic, so `_rng` is not drawn from; it is accepted
/// to keep the random source threaded through every game.
pub fn play_ipd<R: Rng + ?Sized>(
    agent_i: &mut Agent,
    agent_j: &mut Agent,
    rounds: usize,
    _rng: &mut R,
) -> MatchOutcome {
    let mut prev_i: Option<Action> = None;
    let mut prev_j: Option<Action> = None;
    let mut outcome = MatchOutcome::default();

    for t in 0..rounds {
        let a_i = agent_i.strategy.decide_action(t, prev_j);
        let a_j = agent_j.strategy.decide_action(t, prev_i);

        let (p_i, p_j) = payoff(a_i, a_j);
        agent_i.payoff += p_i;
        agent_j.payoff += p_j;

        outcome.cooperative_actions += usize::from(a_i.is_cooperate()) + usize::from(a_j.is_cooperate());
        outcome.total_actions += 2;

        prev_i = Some(a_i);
        prev_j = Some(a_j);
    }
    outcome
}
