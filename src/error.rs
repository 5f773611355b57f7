//! Error types for Marga

use thiserror::Error;

use crate::core::NodeKey;

/// Marga error type
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The open list's key index and heap contents disagree. This is a
    /// broken invariant inside the search structures, never a legitimate
    /// search outcome, and aborts the owning session.
    #[error("Open list desync at key ({},{})", .key.x, .key.z)]
    Desync { key: NodeKey },
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
