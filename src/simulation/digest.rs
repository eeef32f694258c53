//! HistoryDigest: a SHA-256 hash chain over generation records
//!
//! Each record is folded into the previous root, so two runs share a root
//! hash only if every record matches bit for bit, in order.

use crate::metrics::GenerationRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const GENESIS_TAG: &[u8] = b"netipd-history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDigest {
    /// Hash after the most recent record
    pub root_hash: String,
    /// Number of records folded in
    pub generations: usize,
}

impl Default for HistoryDigest {
    fn default() -> Self {
        Self::genesis()
    }
}

impl HistoryDigest {
    /// Digest of an empty history
    pub fn genesis() -> Self {
        Self {
            root_hash: hex::encode(Sha256::digest(GENESIS_TAG)),
            generations: 0,
        }
    }

    pub fn from_history(history: &[GenerationRecord]) -> Self {
        let mut digest = Self::genesis();
        for record in history {
            digest.record(record);
        }
        digest
    }

    /// Chain one more record onto the root
    pub fn record(&mut self, record: &GenerationRecord) {
        self.root_hash = Self::chain_hash(&self.root_hash, record);
        self.generations += 1;
    }

    /// Whether `history` reproduces this digest exactly
    pub fn verify(&self, history: &[GenerationRecord]) -> bool {
        Self::from_history(history) == *self
    }

    /// First 12 hex digits, for log lines
    pub fn short(&self) -> &str {
        &self.root_hash[..12.min(self.root_hash.len())]
    }

    fn chain_hash(prev_hash: &str, record: &GenerationRecord) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prev_hash.as_bytes());
        hasher.update((record.generation as u64).to_le_bytes());
        for metric in record.metrics() {
            hasher.update(metric.to_le_bytes());
        }
        for count in record.strategy_counts {
            hasher.update((count as u64).to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::STRATEGY_COUNT;

    fn record(generation: usize, payoff: f64) -> GenerationRecord {
        GenerationRecord {
            generation,
            realized_coop_rate: 0.5,
            strategy_coop_rate: 0.5,
            diversity: 1.0,
            avg_payoff: payoff,
            strategy_counts: [1; STRATEGY_COUNT],
        }
    }

    #[test]
    fn test_genesis() {
        let d = HistoryDigest::genesis();
        assert_eq!(d.generations, 0);
        assert_eq!(d.root_hash.len(), 64);
        assert!(d.verify(&[]));
    }

    #[test]
    fn test_chain_changes_root() {
        let mut d = HistoryDigest::genesis();
        let before = d.root_hash.clone();
        d.record(&record(0, 10.0));
        assert_ne!(d.root_hash, before);
        assert_eq!(d.generations, 1);
    }

    #[test]
    fn test_verify_detects_tampering() {
        let history = vec![record(0, 10.0), record(1, 11.0), record(2, 12.0)];
        let d = HistoryDigest::from_history(&history);
        assert!(d.verify(&history));

        let mut tampered = history.clone();
        tampered[1].avg_payoff = 11.000001;
        assert!(!d.verify(&tampered));
        assert!(!d.verify(&history[..2]));
    }

    #[test]
    fn test_order_matters() {
        let a = HistoryDigest::from_history(&[record(0, 1.0), record(1, 2.0)]);
        let b = HistoryDigest::from_history(&[record(1, 2.0), record(0, 1.0)]);
        assert_ne!(a.root_hash, b.root_hash);
    }
}
