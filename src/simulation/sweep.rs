//! Multi-seed runs

use super::{run_simulation, RunOutput, SimulationConfig};
use crate::error::{Result, SimError};
use crate::metrics::{aggregate_over_seeds, SeedAggregate};
use log::info;

/// Parse seed lists such as `"0-9"`, `"0,3,7"` or `"0-3,7-9"`.
///
/// Result is sorted and de-duplicated; empty parts are skipped.
pub fn parse_seed_range(spec: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_seed(start, part)?;
                let end = parse_seed(end, part)?;
                if start > end {
                    return Err(SimError::SeedRange(format!("'{}' is a reversed range", part)));
                }
                seeds.extend(start..=end);
            }
            None => seeds.push(parse_seed(part, part)?),
        }
    }
    seeds.sort_unstable();
    seeds.dedup();
    Ok(seeds)
}

fn parse_seed(text: &str, part: &str) -> Result<u64> {
    text.trim()
        .parse()
        .map_err(|_| SimError::SeedRange(format!("'{}' is not a seed or seed range", part)))
}

/// Run `config` once per seed, in the given order.
pub fn run_seeds(config: &SimulationConfig, seeds: &[u64]) -> Result<Vec<RunOutput>> {
    info!("Sweeping {} seeds: {}", seeds.len(), config.summary());
    seeds.iter().map(|&seed| run_simulation(&config.with_seed(seed))).collect()
}

/// Run every seed and aggregate the histories per generation.
pub fn sweep_seeds(config: &SimulationConfig, seeds: &[u64]) -> Result<Vec<SeedAggregate>> {
    let histories: Vec<_> = run_seeds(config, seeds)?.into_iter().map(|out| out.history).collect();
    Ok(aggregate_over_seeds(&histories))
}
