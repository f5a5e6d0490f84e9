//! qOracle Governance - Delayed Multi-Signature Administration
//!
//! Proposal/sign/execute with a k-of-N owner threshold and a minimum
//! wall-clock execution delay. Owner-set management (add, remove, change
//! threshold) happens exclusively through executed proposals.
//!
//! # Key principles
//!
//! 1. **No immediate execution**: every proposal waits out its delay
//! 2. **Owners only**: proposing and signing require current ownership
//! 3. **Replay-proof**: the executed flag permanently retires a proposal

pub mod errors;
pub mod multisig;
pub mod proposal;

pub use errors::{GovernanceError, GovernanceResult};
pub use multisig::GovernanceMultisig;
pub use proposal::{Proposal, ProposalAction};
