//! SimulationConfig: everything a run needs, loadable from JSON
//!
//! Missing fields fall back to the defaults of a standard lattice run, so a
//! config file only has to name what it changes.

use crate::error::{Result, SimError};
use crate::ga::{ModelType, ReproductionPolicy, TOURNAMENT_SIZE};
use crate::network::{Topology, TopologyKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub topology: TopologyKind,
    pub model_type: ModelType,
    pub num_agents: usize,
    pub generations: usize,
    /// IPD rounds per edge per generation
    #[serde(rename = "T")]
    pub rounds: usize,
    pub mutation_rate: f64,
    pub small_world_k: usize,
    pub small_world_p: f64,
    pub scale_free_m: usize,
    /// Only used when `model_type` is `meta_ga`
    pub meta_influence: f64,
    pub seed: u64,
    /// Keep a (generation, node) table of strategies and payoffs
    pub record_node_trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            topology: TopologyKind::Lattice,
            model_type: ModelType::Ga,
            num_agents: 100,
            generations: 100,
            rounds: 50,
            mutation_rate: 0.01,
            small_world_k: 4,
            small_world_p: 0.1,
            scale_free_m: 2,
            meta_influence: 0.3,
            seed: 0,
            record_node_trace: false,
        }
    }
}

impl SimulationConfig {
    /// Default run with meta influence switched on
    pub fn meta_ga() -> Self {
        Self {
            model_type: ModelType::MetaGa,
            ..Self::default()
        }
    }

    pub fn small_world(k: usize, p: f64) -> Self {
        Self {
            topology: TopologyKind::SmallWorld,
            small_world_k: k,
            small_world_p: p,
            ..Self::default()
        }
    }

    pub fn scale_free(m: usize) -> Self {
        Self {
            topology: TopologyKind::ScaleFree,
            scale_free_m: m,
            ..Self::default()
        }
    }

    pub fn with_seed(&self, seed: u64) -> Self {
        Self { seed, ..self.clone() }
    }

    /// Generator and parameters selected by `topology`
    pub fn topology_spec(&self) -> Topology {
        match self.topology {
            TopologyKind::Lattice => Topology::Lattice,
            TopologyKind::SmallWorld => Topology::SmallWorld {
                k: self.small_world_k,
                p: self.small_world_p,
            },
            TopologyKind::ScaleFree => Topology::ScaleFree { m: self.scale_free_m },
        }
    }

    pub fn policy(&self) -> ReproductionPolicy {
        ReproductionPolicy {
            mutation_rate: self.mutation_rate,
            tournament_size: TOURNAMENT_SIZE,
            use_meta: self.model_type == ModelType::MetaGa,
            meta_influence: self.meta_influence,
        }
    }

    /// Reject parameter combinations no generator or operator accepts.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_agents;
        if n == 0 {
            return Err(SimError::config("num_agents must be > 0"));
        }
        match self.topology {
            TopologyKind::Lattice if n < 3 => {
                return Err(SimError::config(format!(
                    "lattice needs at least 3 agents, got {}",
                    n
                )));
            }
            TopologyKind::SmallWorld => {
                if self.small_world_k >= n {
                    return Err(SimError::config(format!(
                        "small_world_k must be smaller than num_agents ({} >= {})",
                        self.small_world_k, n
                    )));
                }
                if !(0.0..=1.0).contains(&self.small_world_p) {
                    return Err(SimError::config(format!(
                        "small_world_p must be in [0, 1], got {}",
                        self.small_world_p
                    )));
                }
            }
            TopologyKind::ScaleFree => {
                if self.scale_free_m < 1 || self.scale_free_m >= n {
                    return Err(SimError::config(format!(
                        "scale_free_m must satisfy 1 <= m < num_agents, got m={} with {} agents",
                        self.scale_free_m, n
                    )));
                }
            }
            TopologyKind::Lattice => {}
        }
        self.policy().validate()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} / {} | agents={} | generations={} | T={} | mutation={} | seed={}",
            self.topology, self.model_type, self.num_agents, self.generations,
            self.rounds, self.mutation_rate, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.topology_spec(), Topology::Lattice);
        assert!(!cfg.policy().use_meta);
    }

    #[test]
    fn test_meta_preset() {
        let cfg = SimulationConfig::meta_ga();
        assert!(cfg.policy().use_meta);
        assert_eq!(cfg.policy().meta_influence, 0.3);
    }

    #[test]
    fn test_meta_influence_alone_does_not_enable_meta() {
        let cfg = SimulationConfig { meta_influence: 0.9, ..SimulationConfig::default() };
        assert!(!cfg.policy().use_meta);
    }

    #[test]
    fn test_topology_validation() {
        let small = SimulationConfig { num_agents: 2, ..SimulationConfig::default() };
        assert!(small.validate().is_err());

        let sw = SimulationConfig { num_agents: 4, ..SimulationConfig::small_world(4, 0.1) };
        assert!(sw.validate().is_err());
        let sw = SimulationConfig { num_agents: 5, ..SimulationConfig::small_world(4, 0.1) };
        assert!(sw.validate().is_ok());
        assert!(SimulationConfig::small_world(4, 1.5).validate().is_err());

        assert!(SimulationConfig::scale_free(0).validate().is_err());
        let sf = SimulationConfig { num_agents: 3, ..SimulationConfig::scale_free(3) };
        assert!(sf.validate().is_err());

        let zero = SimulationConfig { num_agents: 0, ..SimulationConfig::scale_free(1) };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_rate_validation() {
        let cfg = SimulationConfig { mutation_rate: 1.5, ..SimulationConfig::default() };
        assert!(matches!(cfg.validate(), Err(SimError::Configuration(_))));
        let cfg = SimulationConfig { meta_influence: -0.5, ..SimulationConfig::meta_ga() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let cfg = SimulationConfig::from_json(
            r#"{"topology": "scale_free", "model_type": "meta_ga", "T": 10, "seed": 7}"#,
        )
        .unwrap();
        assert_eq!(cfg.topology, TopologyKind::ScaleFree);
        assert_eq!(cfg.model_type, ModelType::MetaGa);
        assert_eq!(cfg.rounds, 10);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.num_agents, 100);
        assert_eq!(cfg.topology_spec(), Topology::ScaleFree { m: 2 });
    }

    #[test]
    fn test_unknown_topology_rejected() {
        assert!(SimulationConfig::from_json(r#"{"topology": "torus"}"#).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("netipd-config-{}.json", std::process::id()));
        let cfg = SimulationConfig::small_world(6, 0.2).with_seed(99);
        cfg.to_file(&path).unwrap();
        let loaded = SimulationConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
