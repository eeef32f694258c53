//! netipd: evolution of cooperation in the iterated prisoner's dilemma on networks
//!
//! Agents with 3-bit reactive strategies sit on a fixed network, play
//! repeated prisoner's dilemma games with their neighbors, and are replaced
//! every generation by offspring bred from their closed neighborhood.

pub mod agent;
pub mod error;
pub mod ga;
pub mod game;
pub mod metrics;
pub mod network;
pub mod simulation;
pub mod storage;
pub mod strategy;

pub use agent::{Agent, Population};
pub use error::{Result, SimError};
pub use ga::{ModelType, ReproductionPolicy};
pub use game::{play_ipd, MatchOutcome};
pub use metrics::GenerationRecord;
pub use network::{Network, Topology, TopologyKind};
pub use simulation::{run_simulation, RunOutput, Simulation, SimulationConfig};
pub use storage::RunArchive;
pub use strategy::{Action, Strategy};
