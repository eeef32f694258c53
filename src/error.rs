//! Error type shared by the simulation engine and its persistence layer

/// Errors raised while configuring, running or archiving a simulation
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Strategy index must be between 0 and 7, got {0}")]
    InvalidStrategyIndex(u8),

    #[error("Invalid seed range: {0}")]
    SeedRange(String),

    #[error("Archive integrity check failed: {0}")]
    Integrity(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
