//! Variation operators on 3-bit strategies

use crate::strategy::Strategy;
use rand::Rng;

/// Take each bit from `s1` with probability 0.5, otherwise from `s2`.
///
/// Consumes exactly three draws, one per bit in (b0, b1, b2) order.
pub fn uniform_crossover<R: Rng + ?Sized>(s1: Strategy, s2: Strategy, rng: &mut R) -> Strategy {
    let (a, b) = (s1.bits(), s2.bits());
    let mut child = a;
    for i in 0..3 {
        child[i] = if rng.gen::<f64>() < 0.5 { a[i] } else { b[i] };
    }
    Strategy::from_bits(child)
}

/// Flip each bit independently with probability `rate` (three draws).
pub fn mutate<R: Rng + ?Sized>(strategy: Strategy, rate: f64, rng: &mut R) -> Strategy {
    let mut bits = strategy.bits();
    for bit in &mut bits {
        if rng.gen::<f64>() < rate {
            *bit = bit.flipped();
        }
    }
    Strategy::from_bits(bits)
}
