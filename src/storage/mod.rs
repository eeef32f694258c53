//! Run archives
//!
//! A finished run is written as one JSON document: metadata, config, history,
//! final agents, network and (optionally) the node trace. Loading checks the
//! stored SHA-256 of the history and the history hash chain before handing
//! the run back.

use crate::error::{Result, SimError};
use crate::simulation::RunOutput;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub run_id: String,
    pub created_at: DateTime<Utc>,
    pub generations: usize,
    pub num_agents: usize,
    pub edge_count: usize,
    /// SHA-256 of the JSON-encoded history
    pub history_checksum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunArchive {
    pub metadata: ArchiveMetadata,
    pub run: RunOutput,
}

impl RunArchive {
    pub fn new(run: RunOutput) -> Result<Self> {
        let metadata = ArchiveMetadata {
            run_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            generations: run.history.len(),
            num_agents: run.agents.len(),
            edge_count: run.network.edge_count(),
            history_checksum: history_checksum(&run)?,
        };
        Ok(Self { metadata, run })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(
            "Saved run {} ({} generations) to {}",
            self.metadata.run_id,
            self.metadata.generations,
            path.display()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let archive: RunArchive = serde_json::from_str(&data)?;
        archive.verify()?;
        Ok(archive)
    }

    /// Check the run id, the stored checksum and the history hash chain.
    pub fn verify(&self) -> Result<()> {
        if Uuid::parse_str(&self.metadata.run_id).is_err() {
            return Err(SimError::Integrity(format!(
                "run id '{}' is not a UUID",
                self.metadata.run_id
            )));
        }
        let checksum = history_checksum(&self.run)?;
        if checksum != self.metadata.history_checksum {
            return Err(SimError::Integrity(format!(
                "history checksum mismatch for run {}",
                self.metadata.run_id
            )));
        }
        if !self.run.digest.verify(&self.run.history) {
            return Err(SimError::Integrity(format!(
                "history digest does not match records for run {}",
                self.metadata.run_id
            )));
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "Run {} | {} | {} agents, {} edges | {} generations | digest {}",
            self.metadata.run_id.get(..8).unwrap_or(&self.metadata.run_id),
            self.run.config.summary(),
            self.metadata.num_agents,
            self.metadata.edge_count,
            self.metadata.generations,
            self.run.digest.short()
        )
    }
}

fn history_checksum(run: &RunOutput) -> Result<String> {
    let json = serde_json::to_string(&run.history)?;
    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{run_simulation, SimulationConfig};

    fn tiny_run() -> RunOutput {
        let cfg = SimulationConfig {
            num_agents: 10,
            generations: 3,
            rounds: 4,
            record_node_trace: true,
            ..SimulationConfig::default()
        };
        run_simulation(&cfg).unwrap()
    }

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("netipd-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_save_and_load() {
        let archive = RunArchive::new(tiny_run()).unwrap();
        let path = temp_path("archive");
        archive.save(&path).unwrap();
        let loaded = RunArchive::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.metadata.run_id, archive.metadata.run_id);
        assert_eq!(loaded.run.history, archive.run.history);
        assert_eq!(loaded.run.network, archive.run.network);
        assert_eq!(loaded.run.node_trace.len(), 30);
        assert_eq!(loaded.metadata.edge_count, 10);
    }

    #[test]
    fn test_tampered_history_rejected() {
        let mut archive = RunArchive::new(tiny_run()).unwrap();
        archive.run.history[1].avg_payoff += 1.0;
        assert!(matches!(archive.verify(), Err(SimError::Integrity(_))));
    }

    #[test]
    fn test_edited_run_id_rejected() {
        let mut archive = RunArchive::new(tiny_run()).unwrap();
        archive.metadata.run_id = "\u{20ac}\u{20ac}\u{20ac}\u{20ac}".to_string();
        assert!(archive.summary().starts_with("Run \u{20ac}"));

        let path = temp_path("bad-run-id");
        archive.save(&path).unwrap();
        let res = RunArchive::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(res, Err(SimError::Integrity(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let res = RunArchive::load(temp_path("does-not-exist"));
        assert!(matches!(res, Err(SimError::Io(_))));
    }
}
