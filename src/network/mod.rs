//! Network: the fixed interaction graph agents play on
//!
//! A run builds its network once, from one of three generative models, and
//! never changes it afterwards.

mod generators;
mod graph;

pub use generators::{lattice, scale_free, small_world};
pub use graph::Network;

use crate::error::{Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which generator a run uses, as named in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyKind {
    Lattice,
    SmallWorld,
    ScaleFree,
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice => write!(f, "lattice"),
            Self::SmallWorld => write!(f, "small_world"),
            Self::ScaleFree => write!(f, "scale_free"),
        }
    }
}

impl FromStr for TopologyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lattice" => Ok(Self::Lattice),
            "small_world" => Ok(Self::SmallWorld),
            "scale_free" => Ok(Self::ScaleFree),
            other => Err(SimError::config(format!("Unknown topology: {}", other))),
        }
    }
}

/// A generator together with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Topology {
    /// Ring, two neighbors per node
    Lattice,
    /// Watts–Strogatz with `k` nearest neighbors and rewiring probability `p`
    SmallWorld { k: usize, p: f64 },
    /// Barabási–Albert attaching `m` edges per new node
    ScaleFree { m: usize },
}

impl Topology {
    pub fn kind(&self) -> TopologyKind {
        match self {
            Self::Lattice => TopologyKind::Lattice,
            Self::SmallWorld { .. } => TopologyKind::SmallWorld,
            Self::ScaleFree { .. } => TopologyKind::ScaleFree,
        }
    }

    /// Generate the graph over `n` nodes.
    pub fn build<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Network> {
        match *self {
            Self::Lattice => lattice(n),
            Self::SmallWorld { k, p } => small_world(n, k, p, rng),
            Self::ScaleFree { m } => scale_free(n, m, rng),
        }
    }
}
