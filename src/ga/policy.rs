//! ReproductionPolicy: the knobs of one GA reproduction step
//!
//! Presets follow the same pattern as the other policy types: a sensible
//! `Default` plus named constructors for common experimental settings.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of candidates drawn per tournament
pub const TOURNAMENT_SIZE: usize = 3;

/// Plain network GA, or GA with a pull toward the most common strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    #[default]
    Ga,
    MetaGa,
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ga => write!(f, "ga"),
            Self::MetaGa => write!(f, "meta_ga"),
        }
    }
}

impl FromStr for ModelType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ga" => Ok(Self::Ga),
            "meta_ga" => Ok(Self::MetaGa),
            other => Err(SimError::config(format!("Unknown model type: {}", other))),
        }
    }
}

/// Parameters of network-local reproduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproductionPolicy {
    /// Per-bit flip probability
    pub mutation_rate: f64,
    /// Candidates sampled per tournament (capped by pool size)
    pub tournament_size: usize,
    /// Whether the meta strategy takes part in reproduction
    pub use_meta: bool,
    /// Per-node probability of an extra crossover with the meta strategy
    pub meta_influence: f64,
}

impl Default for ReproductionPolicy {
    fn default() -> Self {
        Self {
            mutation_rate: 0.01,
            tournament_size: TOURNAMENT_SIZE,
            use_meta: false,
            meta_influence: 0.3,
        }
    }
}

impl ReproductionPolicy {
    /// Standard GA with the given mutation rate, meta influence off
    pub fn standard(mutation_rate: f64) -> Self {
        Self {
            mutation_rate,
            ..Self::default()
        }
    }

    /// Turn on meta influence with the given per-node probability
    pub fn with_meta(self, meta_influence: f64) -> Self {
        Self {
            use_meta: true,
            meta_influence,
            ..self
        }
    }

    /// Selection and crossover only: offspring bits always come from parents
    pub fn no_variation() -> Self {
        Self::standard(0.0)
    }

    pub fn model_type(&self) -> ModelType {
        if self.use_meta { ModelType::MetaGa } else { ModelType::Ga }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimError::config(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.meta_influence) {
            return Err(SimError::config(format!(
                "meta_influence must be in [0, 1], got {}",
                self.meta_influence
            )));
        }
        if self.tournament_size == 0 {
            return Err(SimError::config("tournament_size must be >= 1"));
        }
        Ok(())
    }
}
