//! Tournament selection and the meta strategy

use crate::agent::Agent;
use crate::strategy::{Strategy, STRATEGY_COUNT};
use rand::Rng;

/// Best of `min(size, pool.len())` candidates drawn with replacement.
///
/// Ties keep the earliest-drawn candidate. A single-member pool returns that
/// member without drawing. Returns `None` only for an empty pool.
pub fn tournament_select<'a, R: Rng + ?Sized>(
    pool: &[&'a Agent],
    size: usize,
    rng: &mut R,
) -> Option<&'a Agent> {
    match pool.len() {
        0 => None,
        1 => Some(pool[0]),
        len => {
            let draws = size.min(len).max(1);
            let mut best = pool[rng.gen_range(0..len)];
            for _ in 1..draws {
                let candidate = pool[rng.gen_range(0..len)];
                if candidate.payoff > best.payoff {
                    best = candidate;
                }
            }
            Some(best)
        }
    }
}

/// Most frequent strategy among `agents`.
///
/// On a tie in counts, the strategy that appears first when scanning agents
/// in id order wins.
pub fn meta_strategy(agents: &[Agent]) -> Option<Strategy> {
    let mut counts = [0usize; STRATEGY_COUNT];
    let mut first_seen: Vec<Strategy> = Vec::with_capacity(STRATEGY_COUNT);
    for a in agents {
        let idx = usize::from(a.strategy.to_index());
        if counts[idx] == 0 {
            first_seen.push(a.strategy);
        }
        counts[idx] += 1;
    }

    let mut best: Option<(Strategy, usize)> = None;
    for s in first_seen {
        let c = counts[usize::from(s.to_index())];
        match best {
            Some((_, best_count)) if c <= best_count => {}
            _ => best = Some((s, c)),
        }
    }
    best.map(|(s, _)| s)
}
