//! Ledger errors

use thiserror::Error;

use lib_oracle::OracleError;
use lib_types::LifecycleError;

/// Error during ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("sender and recipient are the same account")]
    SelfTransfer,

    #[error("initial supply already minted")]
    AlreadyMinted,

    #[error("caller is not the bridge authority")]
    NotAuthority,

    #[error("mint of {amount} would exceed the supply cap {cap}")]
    SupplyCapExceeded { amount: u64, cap: u64 },

    #[error("price update is {age}s away from the accepted price, limit {limit}s")]
    StalePrice { age: u64, limit: u64 },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
