//! Agents and the population they live in
//!
//! Agent ids equal node ids, so the population is stored densely and agent
//! `i` always sits at index `i`. Strategies only change through
//! [`Population::commit`], which swaps in a whole generation at once.

use crate::error::{Result, SimError};
use crate::strategy::Strategy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A player bound to one network node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: usize,
    pub strategy: Strategy,
    /// Payoff accumulated over the current generation's games
    pub payoff: f64,
}

impl Agent {
    pub fn new(id: usize, strategy: Strategy) -> Self {
        Self { id, strategy, payoff: 0.0 }
    }

    pub fn reset_payoff(&mut self) {
        self.payoff = 0.0;
    }
}

/// All agents of a run, indexed by node id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// One agent per node, strategies drawn in node order
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let agents = (0..size).map(|id| Agent::new(id, Strategy::random(rng))).collect();
        Self { agents }
    }

    pub fn from_strategies(strategies: impl IntoIterator<Item = Strategy>) -> Self {
        let agents = strategies
            .into_iter()
            .enumerate()
            .map(|(id, s)| Agent::new(id, s))
            .collect();
        Self { agents }
    }

    /// Wrap existing agents; ids must equal their positions.
    pub fn from_agents(agents: Vec<Agent>) -> Result<Self> {
        if let Some((pos, a)) = agents.iter().enumerate().find(|(pos, a)| a.id != *pos) {
            return Err(SimError::config(format!(
                "agent id {} stored at position {}",
                a.id, pos
            )));
        }
        Ok(Self { agents })
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Agent> {
        self.agents.get(id)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        self.agents.iter().map(|a| a.strategy).collect()
    }

    pub fn reset_payoffs(&mut self) {
        self.agents.iter_mut().for_each(Agent::reset_payoff);
    }

    pub fn total_payoff(&self) -> f64 {
        self.agents.iter().map(|a| a.payoff).sum()
    }

    /// Mutable access to two distinct agents at once (the two ends of an edge)
    pub fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Agent, &mut Agent)> {
        if i == j || i >= self.agents.len() || j >= self.agents.len() {
            return None;
        }
        if i < j {
            let (head, tail) = self.agents.split_at_mut(j);
            Some((&mut head[i], &mut tail[0]))
        } else {
            let (head, tail) = self.agents.split_at_mut(i);
            Some((&mut tail[0], &mut head[j]))
        }
    }

    /// Replace every agent's strategy with the buffered next generation.
    pub fn commit(&mut self, next: Vec<Strategy>) -> Result<()> {
        if next.len() != self.agents.len() {
            return Err(SimError::config(format!(
                "next generation has {} strategies for {} agents",
                next.len(),
                self.agents.len()
            )));
        }
        for (agent, strategy) in self.agents.iter_mut().zip(next) {
            agent.strategy = strategy;
        }
        Ok(())
    }

    pub fn into_agents(self) -> Vec<Agent> {
        self.agents
    }
}
