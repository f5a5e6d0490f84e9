//! Governance errors

use thiserror::Error;

use lib_types::LifecycleError;

/// Error during governance operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("caller is not a multisig owner")]
    NotOwner,

    #[error("unknown proposal {0}")]
    UnknownProposal(u64),

    #[error("proposal {0} already executed")]
    AlreadyExecuted(u64),

    #[error("insufficient signatures: {have} of {need} required")]
    InsufficientSignatures { have: usize, need: usize },

    #[error("execution delay not elapsed: ready at {ready_at}, now {now}")]
    DelayNotElapsed { ready_at: u64, now: u64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot remove the last owner")]
    WouldOrphanOwners,
}

/// Result type for governance operations
pub type GovernanceResult<T> = Result<T, GovernanceError>;
