//! Oracle committee errors

use thiserror::Error;

use lib_types::LifecycleError;

use crate::validator::ValidationError;

/// Error during committee operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("price submissions are paused")]
    EmergencyPaused,

    #[error("quorum not met: {valid} valid signatures of {required} required")]
    QuorumNotMet { valid: usize, required: usize },

    #[error("timestamp {timestamp} not after last accepted {last_accepted}")]
    NonMonotonic { timestamp: u64, last_accepted: u64 },

    #[error("asset identifier is empty, oversized, or carries edge whitespace")]
    InvalidAsset,

    #[error("oracle index {0} out of range")]
    InvalidOracleIndex(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for committee operations
pub type OracleResult<T> = Result<T, OracleError>;
