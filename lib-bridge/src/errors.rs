//! Bridge errors

use thiserror::Error;

use lib_ledger::LedgerError;
use lib_oracle::OracleError;
use lib_types::LifecycleError;

/// Error during bridge operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("swap amount {amount} below minimum {minimum}")]
    BelowMinimum { amount: u64, minimum: u64 },

    #[error("conversion truncates to zero")]
    DustResult,

    #[error("swap of {attempted} would exceed the daily volume ceiling {limit}")]
    VolumeExceeded { attempted: u64, limit: u64 },

    #[error("conversion result exceeds the 64-bit amount range")]
    AmountOverflow,
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
