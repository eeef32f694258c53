//! Strategy: 3-bit reactive rules for the iterated prisoner's dilemma
//!
//! A strategy is the triple (opening move, reply to C, reply to D). With one
//! bit per slot there are exactly eight strategies, numbered 0..8 as
//! `b0 * 4 + b1 * 2 + b2`.

use crate::error::{Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of distinct strategies in the 3-bit domain
pub const STRATEGY_COUNT: usize = 8;

/// A single move in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Defect = 0,
    Cooperate = 1,
}

impl Action {
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 1 { Action::Cooperate } else { Action::Defect }
    }

    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn flipped(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    pub fn is_cooperate(self) -> bool {
        self == Action::Cooperate
    }
}

/// Reactive strategy encoded as three bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Strategy {
    /// b0: move in round 0 (or with no history)
    pub opening: Action,
    /// b1: reply when the opponent last cooperated
    pub on_cooperate: Action,
    /// b2: reply when the opponent last defected
    pub on_defect: Action,
}

impl Strategy {
    pub const ALL_DEFECT: Strategy = Strategy::new(Action::Defect, Action::Defect, Action::Defect);
    pub const ALL_COOPERATE: Strategy =
        Strategy::new(Action::Cooperate, Action::Cooperate, Action::Cooperate);
    pub const TIT_FOR_TAT: Strategy =
        Strategy::new(Action::Cooperate, Action::Cooperate, Action::Defect);

    pub const fn new(opening: Action, on_cooperate: Action, on_defect: Action) -> Self {
        Self { opening, on_cooperate, on_defect }
    }

    pub fn from_bits(bits: [Action; 3]) -> Self {
        Self::new(bits[0], bits[1], bits[2])
    }

    /// Bits in (b0, b1, b2) order
    pub fn bits(&self) -> [Action; 3] {
        [self.opening, self.on_cooperate, self.on_defect]
    }

    /// Integer code `b0 * 4 + b1 * 2 + b2`
    pub fn to_index(self) -> u8 {
        (self.opening.bit() << 2) | (self.on_cooperate.bit() << 1) | self.on_defect.bit()
    }

    pub fn from_index(index: u8) -> Result<Self> {
        if usize::from(index) >= STRATEGY_COUNT {
            return Err(SimError::InvalidStrategyIndex(index));
        }
        Ok(Self::new(
            Action::from_bit(index >> 2),
            Action::from_bit(index >> 1),
            Action::from_bit(index),
        ))
    }

    /// All eight strategies in index order
    pub fn all() -> impl Iterator<Item = Strategy> + Clone {
        (0..STRATEGY_COUNT as u8).filter_map(|i| Strategy::from_index(i).ok())
    }

    /// Draw b0, b1, b2 as independent fair coin flips, in that order
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let opening = Action::from_bit(u8::from(rng.gen::<bool>()));
        let on_cooperate = Action::from_bit(u8::from(rng.gen::<bool>()));
        let on_defect = Action::from_bit(u8::from(rng.gen::<bool>()));
        Self::new(opening, on_cooperate, on_defect)
    }

    /// Pick the move for `round_index` given what the opponent did last round.
    pub fn decide_action(&self, round_index: usize, opponent_prev_action: Option<Action>) -> Action {
        match opponent_prev_action {
            _ if round_index == 0 => self.opening,
            None => self.opening,
            Some(Action::Cooperate) => self.on_cooperate,
            Some(Action::Defect) => self.on_defect,
        }
    }

    /// Fraction of cooperate bits in the genotype, ignoring play
    pub fn cooperation_potential(&self) -> f64 {
        let ones: u8 = self.bits().iter().map(|a| a.bit()).sum();
        f64::from(ones) / 3.0
    }

    /// Three-character form such as `"110"`
    pub fn bit_string(&self) -> String {
        self.bits().iter().map(|a| if a.is_cooperate() { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bit_string())
    }
}

impl FromStr for Strategy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| *b == b'0' || *b == b'1') {
            return Err(SimError::config(format!("invalid strategy bit string '{}'", s)));
        }
        Ok(Self::new(
            Action::from_bit(bytes[0] - b'0'),
            Action::from_bit(bytes[1] - b'0'),
            Action::from_bit(bytes[2] - b'0'),
        ))
    }
}

impl TryFrom<String> for Strategy {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.bit_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOTH: [Action; 2] = [Action::Cooperate, Action::Defect];

    #[test]
    fn test_opening_move_ignores_opponent() {
        for s in Strategy::all() {
            assert_eq!(s.decide_action(0, None), s.opening);
            for a in BOTH {
                assert_eq!(s.decide_action(0, Some(a)), s.opening);
            }
        }
    }

    #[test]
    fn test_missing_history_uses_opening() {
        for s in Strategy::all() {
            assert_eq!(s.decide_action(7, None), s.opening);
        }
    }

    #[test]
    fn test_reactive_moves() {
        for s in Strategy::all() {
            for t in 1..5 {
                assert_eq!(s.decide_action(t, Some(Action::Cooperate)), s.on_cooperate);
                assert_eq!(s.decide_action(t, Some(Action::Defect)), s.on_defect);
            }
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for i in 0..8u8 {
            let s = Strategy::from_index(i).unwrap();
            assert_eq!(s.to_index(), i);
        }
        assert_eq!(Strategy::all().count(), STRATEGY_COUNT);
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(matches!(Strategy::from_index(8), Err(SimError::InvalidStrategyIndex(8))));
        assert!(Strategy::from_index(255).is_err());
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(Strategy::ALL_DEFECT.to_index(), 0);
        assert_eq!(Strategy::TIT_FOR_TAT.to_index(), 6);
        assert_eq!(Strategy::ALL_COOPERATE.to_index(), 7);
        let s = Strategy::from_index(4).unwrap();
        assert_eq!(s.bits(), [Action::Cooperate, Action::Defect, Action::Defect]);
    }

    #[test]
    fn test_cooperation_potential() {
        assert_eq!(Strategy::ALL_DEFECT.cooperation_potential(), 0.0);
        assert_eq!(Strategy::ALL_COOPERATE.cooperation_potential(), 1.0);
        assert!((Strategy::TIT_FOR_TAT.cooperation_potential() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_bit_string_and_parse() {
        assert_eq!(Strategy::TIT_FOR_TAT.bit_string(), "110");
        assert_eq!("110".parse::<Strategy>().unwrap(), Strategy::TIT_FOR_TAT);
        assert!("12".parse::<Strategy>().is_err());
        assert!("1a0".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_serde_as_bit_string() {
        let json = serde_json::to_string(&Strategy::TIT_FOR_TAT).unwrap();
        assert_eq!(json, "\"110\"");
        let back: Strategy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Strategy::TIT_FOR_TAT);
    }

    #[test]
    fn test_random_is_seeded() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        let xs: Vec<Strategy> = (0..20).map(|_| Strategy::random(&mut a)).collect();
        let ys: Vec<Strategy> = (0..20).map(|_| Strategy::random(&mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_flip() {
        assert_eq!(Action::Cooperate.flipped(), Action::Defect);
        assert_eq!(Action::Defect.flipped().flipped(), Action::Defect);
    }
}
