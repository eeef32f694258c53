//! Per-generation output rows

use crate::agent::Agent;
use crate::strategy::STRATEGY_COUNT;
use serde::{Deserialize, Serialize};

/// One row of the history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Fraction of played moves that were Cooperate
    pub realized_coop_rate: f64,
    /// Mean cooperation potential of the strategies in play
    pub strategy_coop_rate: f64,
    /// Shannon entropy of the strategy distribution
    pub diversity: f64,
    pub avg_payoff: f64,
    /// Agents per strategy, indexed by strategy integer code
    pub strategy_counts: [usize; STRATEGY_COUNT],
}

impl GenerationRecord {
    /// Strategy counts normalized to proportions (zeros for an empty population)
    pub fn strategy_proportions(&self) -> [f64; STRATEGY_COUNT] {
        let total: usize = self.strategy_counts.iter().sum();
        let mut props = [0.0; STRATEGY_COUNT];
        if total > 0 {
            for (p, &c) in props.iter_mut().zip(self.strategy_counts.iter()) {
                *p = c as f64 / total as f64;
            }
        }
        props
    }

    /// The four scalar metrics in column order
    pub fn metrics(&self) -> [f64; 4] {
        [self.realized_coop_rate, self.strategy_coop_rate, self.diversity, self.avg_payoff]
    }
}

/// One agent's state in one generation, for animation tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTraceRow {
    pub generation: usize,
    pub node_id: usize,
    /// Strategy as a three-character bit string
    pub strategy_bits: String,
    pub payoff: f64,
}

impl NodeTraceRow {
    pub fn capture(generation: usize, agent: &Agent) -> Self {
        Self {
            generation,
            node_id: agent.id,
            strategy_bits: agent.strategy.bit_string(),
            payoff: agent.payoff,
        }
    }
}
