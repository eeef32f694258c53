//! Cross-seed aggregation of history tables
//!
//! Runs of the same configuration under different seeds are grouped by
//! generation; each metric gets a mean and a population standard deviation.

use super::GenerationRecord;
use crate::strategy::STRATEGY_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean and population standard deviation (ddof = 0) of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub std: f64,
}

impl MetricSummary {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        Self { mean, std: var.sqrt() }
    }
}

/// Aggregated statistics for a single generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedAggregate {
    pub generation: usize,
    /// Number of runs that reached this generation
    pub runs: usize,
    pub realized_coop_rate: MetricSummary,
    pub strategy_coop_rate: MetricSummary,
    pub diversity: MetricSummary,
    pub avg_payoff: MetricSummary,
    /// Per-strategy proportion, indexed by strategy integer code
    pub strategy_proportions: [MetricSummary; STRATEGY_COUNT],
}

/// Group every run's records by generation and summarize each group.
///
/// Output is in ascending generation order.
pub fn aggregate_over_seeds(runs: &[Vec<GenerationRecord>]) -> Vec<SeedAggregate> {
    let mut by_generation: BTreeMap<usize, Vec<&GenerationRecord>> = BTreeMap::new();
    for record in runs.iter().flatten() {
        by_generation.entry(record.generation).or_default().push(record);
    }

    by_generation
        .into_iter()
        .map(|(generation, records)| {
            let proportions: Vec<[f64; STRATEGY_COUNT]> =
                records.iter().map(|r| r.strategy_proportions()).collect();
            let mut strategy_proportions = [MetricSummary::default(); STRATEGY_COUNT];
            for (s, summary) in strategy_proportions.iter_mut().enumerate() {
                let samples: Vec<f64> = proportions.iter().map(|p| p[s]).collect();
                *summary = MetricSummary::from_samples(&samples);
            }

            SeedAggregate {
                generation,
                runs: records.len(),
                realized_coop_rate: summarize(&records, |r| r.realized_coop_rate),
                strategy_coop_rate: summarize(&records, |r| r.strategy_coop_rate),
                diversity: summarize(&records, |r| r.diversity),
                avg_payoff: summarize(&records, |r| r.avg_payoff),
                strategy_proportions,
            }
        })
        .collect()
}

fn summarize(records: &[&GenerationRecord], f: impl Fn(&GenerationRecord) -> f64) -> MetricSummary {
    let samples: Vec<f64> = records.iter().map(|&r| f(r)).collect();
    MetricSummary::from_samples(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(generation: usize, coop: f64, payoff: f64, counts: [usize; STRATEGY_COUNT]) -> GenerationRecord {
        GenerationRecord {
            generation,
            realized_coop_rate: coop,
            strategy_coop_rate: coop,
            diversity: 0.0,
            avg_payoff: payoff,
            strategy_counts: counts,
        }
    }

    #[test]
    fn test_summary_stats() {
        let s = MetricSummary::from_samples(&[1.0, 3.0]);
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.std, 1.0);
        assert_eq!(MetricSummary::from_samples(&[]), MetricSummary::default());
    }

    #[test]
    fn test_aggregate_two_seeds() {
        let mut all_c = [0; STRATEGY_COUNT];
        all_c[7] = 4;
        let mut half = [0; STRATEGY_COUNT];
        half[7] = 2;
        half[0] = 2;

        let run_a = vec![record(0, 0.2, 10.0, all_c), record(1, 0.4, 12.0, all_c)];
        let run_b = vec![record(0, 0.6, 20.0, half), record(1, 0.4, 14.0, half)];
        let agg = aggregate_over_seeds(&[run_a, run_b]);

        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].generation, 0);
        assert_eq!(agg[0].runs, 2);
        assert!((agg[0].realized_coop_rate.mean - 0.4).abs() < 1e-12);
        assert!((agg[0].realized_coop_rate.std - 0.2).abs() < 1e-12);
        assert_eq!(agg[0].avg_payoff.mean, 15.0);
        assert_eq!(agg[1].realized_coop_rate.std, 0.0);
        assert!((agg[0].strategy_proportions[7].mean - 0.75).abs() < 1e-12);
        assert!((agg[0].strategy_proportions[0].mean - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ragged_runs() {
        let counts = [1; STRATEGY_COUNT];
        let run_a = vec![record(0, 0.5, 1.0, counts)];
        let run_b = vec![record(0, 0.5, 1.0, counts), record(1, 0.9, 2.0, counts)];
        let agg = aggregate_over_seeds(&[run_a, run_b]);
        assert_eq!(agg[1].runs, 1);
        assert_eq!(agg[1].realized_coop_rate.mean, 0.9);
    }
}
