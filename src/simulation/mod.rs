//! Simulation driver
//!
//! One run moves through `Initializing`, then `Playing → Measuring →
//! Reproducing` once per generation, and ends in `Done`. A single seeded
//! `StdRng` is created in [`Simulation::new`] and used, in a fixed order, for
//! network construction, initial strategies and every GA draw; the same
//! config therefore always yields the same history.

mod config;
mod digest;
mod sweep;

pub use config::SimulationConfig;
pub use digest::HistoryDigest;
pub use sweep::{parse_seed_range, run_seeds, sweep_seeds};

use crate::agent::{Agent, Population};
use crate::error::{Result, SimError};
use crate::game::{play_ipd, MatchOutcome};
use crate::ga::{reproduce_population, ReproductionPolicy};
use crate::metrics::{
    cooperation_rate_from_strategies, strategy_counts, strategy_diversity_entropy, GenerationRecord,
    NodeTraceRow,
};
use crate::network::Network;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Where the driver is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Initializing,
    Playing,
    Measuring,
    Reproducing,
    Done,
}

/// Everything a finished run hands to its caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub config: SimulationConfig,
    /// One record per generation, in order
    pub history: Vec<GenerationRecord>,
    /// The network the run was played on
    pub network: Network,
    /// Final agents, with the last generation's payoffs
    pub agents: Vec<Agent>,
    /// Empty unless `record_node_trace` was set
    pub node_trace: Vec<NodeTraceRow>,
    pub digest: HistoryDigest,
}

impl RunOutput {
    /// Fail unless `other` reproduced this run's history bit for bit.
    pub fn ensure_same_history(&self, other: &RunOutput) -> Result<()> {
        if self.digest != other.digest || self.history != other.history {
            return Err(SimError::Integrity(format!(
                "histories differ: {} vs {}",
                self.digest.short(),
                other.digest.short()
            )));
        }
        Ok(())
    }
}

/// A run in progress
pub struct Simulation {
    config: SimulationConfig,
    policy: ReproductionPolicy,
    network: Network,
    population: Population,
    rng: StdRng,
    generation: usize,
    phase: Phase,
    history: Vec<GenerationRecord>,
    node_trace: Vec<NodeTraceRow>,
    digest: HistoryDigest,
}

impl Simulation {
    /// Validate `config`, build the network and seed the population.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let network = config.topology_spec().build(config.num_agents, &mut rng)?;
        let population = Population::random(network.node_count(), &mut rng);
        let policy = config.policy();

        info!(
            "Initialized {} network: {} nodes, {} edges",
            config.topology,
            network.node_count(),
            network.edge_count()
        );

        let phase = if config.generations == 0 { Phase::Done } else { Phase::Initializing };
        Ok(Self {
            history: Vec::new(),
            config,
            policy,
            network,
            population,
            rng,
            generation: 0,
            phase,
            node_trace: Vec::new(),
            digest: HistoryDigest::genesis(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Run one full generation. Returns `None` once the run is done.
    pub fn step(&mut self) -> Result<Option<&GenerationRecord>> {
        if self.is_done() {
            return Ok(None);
        }

        self.phase = Phase::Playing;
        let outcome = self.play()?;

        self.phase = Phase::Measuring;
        self.measure(outcome);

        self.phase = Phase::Reproducing;
        reproduce_population(&mut self.population, &self.network, &self.policy, &mut self.rng)?;
        self.generation += 1;

        self.phase = if self.generation >= self.config.generations {
            Phase::Done
        } else {
            Phase::Playing
        };
        Ok(self.history.last())
    }

    /// Step until done and hand back the results.
    pub fn run(mut self) -> Result<RunOutput> {
        info!("Starting run: {}", self.config.summary());
        while self.step()?.is_some() {}
        let output = self.finish();
        if let Some(last) = output.history.last() {
            info!(
                "Run finished after {} generations | realized coop {:.3} | diversity {:.3} | digest {}",
                output.history.len(),
                last.realized_coop_rate,
                last.diversity,
                output.digest.short()
            );
        }
        Ok(output)
    }

    /// Consume the driver, whatever phase it is in.
    pub fn finish(self) -> RunOutput {
        RunOutput {
            config: self.config,
            history: self.history,
            network: self.network,
            agents: self.population.into_agents(),
            node_trace: self.node_trace,
            digest: self.digest,
        }
    }

    fn play(&mut self) -> Result<MatchOutcome> {
        self.population.reset_payoffs();
        let mut total = MatchOutcome::default();
        for (i, j) in self.network.edges() {
            let (agent_i, agent_j) = self
                .population
                .pair_mut(i, j)
                .ok_or_else(|| SimError::config(format!("edge {}-{} has no agents", i, j)))?;
            total.absorb(play_ipd(agent_i, agent_j, self.config.rounds, &mut self.rng));
        }
        Ok(total)
    }

    fn measure(&mut self, outcome: MatchOutcome) {
        let agents = self.population.agents();
        let record = GenerationRecord {
            generation: self.generation,
            realized_coop_rate: outcome.cooperation_rate(),
            strategy_coop_rate: cooperation_rate_from_strategies(agents),
            diversity: strategy_diversity_entropy(agents),
            avg_payoff: self.population.total_payoff() / agents.len() as f64,
            strategy_counts: strategy_counts(agents),
        };
        debug!(
            "gen {:>4} | coop {:.3} | strat coop {:.3} | H {:.3} | payoff {:.2}",
            record.generation,
            record.realized_coop_rate,
            record.strategy_coop_rate,
            record.diversity,
            record.avg_payoff
        );

        if self.config.record_node_trace {
            self.node_trace
                .extend(agents.iter().map(|a| NodeTraceRow::capture(self.generation, a)));
        }
        self.digest.record(&record);
        self.history.push(record);
    }
}

/// Build, run and collect one simulation.
pub fn run_simulation(config: &SimulationConfig) -> Result<RunOutput> {
    Simulation::new(config.clone())?.run()
}
