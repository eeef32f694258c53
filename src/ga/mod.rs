//! Network-local GA reproduction
//!
//! Every node breeds its replacement from its closed neighborhood (itself
//! plus its neighbors): two tournament-selected parents, uniform crossover,
//! bit-flip mutation, and in meta mode an occasional extra crossover with the
//! population's most common strategy.
//!
//! Reproduction is two-phase. [`next_generation`] only borrows the population
//! immutably and returns a buffer of child strategies; [`reproduce_population`]
//! then commits that buffer in one step, so no node ever sees a sibling's new
//! strategy.

mod operators;
mod policy;
mod selection;

pub use operators::{mutate, uniform_crossover};
pub use policy::{ModelType, ReproductionPolicy, TOURNAMENT_SIZE};
pub use selection::{meta_strategy, tournament_select};

use crate::agent::{Agent, Population};
use crate::error::{Result, SimError};
use crate::network::Network;
use crate::strategy::Strategy;
use log::debug;
use rand::Rng;

/// What happened during one reproduction step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReproductionReport {
    /// Meta strategy used this generation (meta mode only)
    pub meta_strategy: Option<Strategy>,
    /// Nodes whose child was blended with the meta strategy
    pub meta_blends: usize,
}

/// Compute every node's child strategy from the current snapshot.
///
/// Nodes are processed in ascending id order; the returned vector is indexed
/// by node id.
pub fn next_generation<R: Rng + ?Sized>(
    population: &Population,
    network: &Network,
    policy: &ReproductionPolicy,
    rng: &mut R,
) -> Result<(Vec<Strategy>, ReproductionReport)> {
    if network.node_count() != population.len() {
        return Err(SimError::config(format!(
            "network has {} nodes but population has {} agents",
            network.node_count(),
            population.len()
        )));
    }

    let agents = population.agents();
    let mut report = ReproductionReport::default();
    if policy.use_meta {
        report.meta_strategy = meta_strategy(agents);
    }

    let mut next = Vec::with_capacity(agents.len());
    for node in network.nodes() {
        let pool: Vec<&Agent> = network
            .closed_neighborhood(node)
            .into_iter()
            .map(|id| &agents[id])
            .collect();

        let parent1 = tournament_select(&pool, policy.tournament_size, rng).unwrap_or(&agents[node]);
        let parent2 = tournament_select(&pool, policy.tournament_size, rng).unwrap_or(&agents[node]);

        let mut child = uniform_crossover(parent1.strategy, parent2.strategy, rng);
        child = mutate(child, policy.mutation_rate, rng);

        if let Some(meta) = report.meta_strategy {
            if rng.gen::<f64>() < policy.meta_influence {
                child = uniform_crossover(child, meta, rng);
                report.meta_blends += 1;
            }
        }
        next.push(child);
    }
    Ok((next, report))
}

/// Replace the whole population's strategies with the next generation.
pub fn reproduce_population<R: Rng + ?Sized>(
    population: &mut Population,
    network: &Network,
    policy: &ReproductionPolicy,
    rng: &mut R,
) -> Result<ReproductionReport> {
    let (next, report) = next_generation(population, network, policy, rng)?;
    population.commit(next)?;
    if let Some(meta) = report.meta_strategy {
        debug!("Meta strategy {} blended into {} children", meta, report.meta_blends);
    }
    Ok(report)
}
