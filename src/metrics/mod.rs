//! Population metrics
//!
//! Diversity and genotype-level cooperation are computed from strategies
//! alone; realized cooperation comes from the game engine's action counts.

mod aggregate;
mod record;

pub use aggregate::{aggregate_over_seeds, MetricSummary, SeedAggregate};
pub use record::{GenerationRecord, NodeTraceRow};

use crate::agent::Agent;
use crate::strategy::STRATEGY_COUNT;

/// Guard added inside the logarithm
pub const ENTROPY_EPSILON: f64 = 1e-12;

/// Histogram of strategies, indexed by strategy integer code
pub fn strategy_counts(agents: &[Agent]) -> [usize; STRATEGY_COUNT] {
    let mut counts = [0usize; STRATEGY_COUNT];
    for a in agents {
        counts[usize::from(a.strategy.to_index())] += 1;
    }
    counts
}

/// Shannon entropy (natural log) of the strategy distribution.
pub fn strategy_diversity_entropy(agents: &[Agent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    let total = agents.len() as f64;
    strategy_counts(agents)
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * (p + ENTROPY_EPSILON).ln()
        })
        .sum()
}

/// Mean cooperation potential of the population's strategies
pub fn cooperation_rate_from_strategies(agents: &[Agent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    agents.iter().map(|a| a.strategy.cooperation_potential()).sum::<f64>() / agents.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Population;
    use crate::strategy::Strategy;

    #[test]
    fn test_entropy_monomorphic() {
        let pop = Population::from_strategies(vec![Strategy::TIT_FOR_TAT; 25]);
        assert!(strategy_diversity_entropy(pop.agents()).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_even_split() {
        let pop = Population::from_strategies(Strategy::all().cycle().take(80));
        let h = strategy_diversity_entropy(pop.agents());
        assert!((h - 8f64.ln()).abs() < 1e-9, "entropy {}", h);
    }

    #[test]
    fn test_entropy_two_strategies() {
        let pop = Population::from_strategies(vec![
            Strategy::ALL_DEFECT,
            Strategy::ALL_COOPERATE,
            Strategy::ALL_DEFECT,
            Strategy::ALL_COOPERATE,
        ]);
        assert!((strategy_diversity_entropy(pop.agents()) - 2f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_population() {
        assert_eq!(strategy_diversity_entropy(&[]), 0.0);
        assert_eq!(cooperation_rate_from_strategies(&[]), 0.0);
        assert_eq!(strategy_counts(&[]), [0; STRATEGY_COUNT]);
    }

    #[test]
    fn test_strategy_cooperation_rate() {
        let pop = Population::from_strategies(vec![Strategy::ALL_DEFECT, Strategy::ALL_COOPERATE]);
        assert!((cooperation_rate_from_strategies(pop.agents()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_counts() {
        let pop = Population::from_strategies(vec![
            Strategy::TIT_FOR_TAT,
            Strategy::TIT_FOR_TAT,
            Strategy::ALL_DEFECT,
        ]);
        let counts = strategy_counts(pop.agents());
        assert_eq!(counts[6], 2);
        assert_eq!(counts[0], 1);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }
}
