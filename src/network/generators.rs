//! Topology generators: ring lattice, Watts–Strogatz, Barabási–Albert
//!
//! All generators take the run's random source by reference so that network
//! construction consumes draws in a fixed position of the run's sequence.

use super::Network;
use crate::error::{Result, SimError};
use log::warn;
use rand::Rng;

/// Ring where every node links to its predecessor and successor.
pub fn lattice(n: usize) -> Result<Network> {
    if n < 3 {
        return Err(SimError::config(format!(
            "lattice needs at least 3 agents, got {}",
            n
        )));
    }
    let mut g = Network::empty(n);
    for i in 0..n {
        g.add_edge(i, (i + 1) % n);
    }
    Ok(g)
}

/// Watts–Strogatz small-world graph.
///
/// Odd `k` is lowered to the even value below it.
pub fn small_world<R: Rng + ?Sized>(n: usize, k: usize, p: f64, rng: &mut R) -> Result<Network> {
    if k >= n {
        return Err(SimError::config(format!(
            "small_world_k must be smaller than num_agents ({} >= {})",
            k, n
        )));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::config(format!(
            "small_world_p must be in [0, 1], got {}",
            p
        )));
    }
    let k = if k % 2 == 1 {
        warn!("small_world_k={} is odd, using {}", k, k - 1);
        k - 1
    } else {
        k
    };
    let half = k / 2;

    let mut g = Network::empty(n);
    for j in 1..=half {
        for u in 0..n {
            g.add_edge(u, (u + j) % n);
        }
    }

    for j in 1..=half {
        for u in 0..n {
            let v = (u + j) % n;
            if rng.gen::<f64>() >= p {
                continue;
            }
            let mut w = rng.gen_range(0..n);
            let mut saturated = false;
            while w == u || g.has_edge(u, w) {
                w = rng.gen_range(0..n);
                if g.degree(u) >= n - 1 {
                    saturated = true;
                    break;
                }
            }
            if !saturated {
                g.remove_edge(u, v);
                g.add_edge(u, w);
            }
        }
    }
    Ok(g)
}

/// Barabási–Albert preferential attachment graph, grown from a star on
/// nodes `0..=m`.
pub fn scale_free<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Result<Network> {
    if m < 1 {
        return Err(SimError::config("scale_free_m must be >= 1"));
    }
    if m >= n {
        return Err(SimError::config(format!(
            "scale_free_m must be smaller than num_agents ({} >= {})",
            m, n
        )));
    }

    let mut g = Network::empty(n);
    for leaf in 1..=m {
        g.add_edge(0, leaf);
    }

    // Each node appears once per incident edge, so uniform draws from this
    // list are degree-proportional.
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * m * n);
    for node in 0..=m {
        repeated.extend(std::iter::repeat(node).take(g.degree(node)));
    }

    for source in (m + 1)..n {
        let targets = distinct_sample(&repeated, m, rng);
        for &t in &targets {
            g.add_edge(source, t);
        }
        repeated.extend_from_slice(&targets);
        repeated.extend(std::iter::repeat(source).take(m));
    }
    Ok(g)
}

/// Draw from `seq` with replacement until `count` distinct values are held,
/// keeping first-drawn order.
fn distinct_sample<R: Rng + ?Sized>(seq: &[usize], count: usize, rng: &mut R) -> Vec<usize> {
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let x = seq[rng.gen_range(0..seq.len())];
        if !picked.contains(&x) {
            picked.push(x);
        }
    }
    picked
}
