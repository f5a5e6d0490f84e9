//! Governance proposals

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use lib_types::Address;

/// Administrative action a proposal executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Append `parameter` (an address) to the owner set.
    AddOwner,
    /// Remove `parameter` (an address) from the owner set.
    RemoveOwner,
    /// Set the signing threshold to `parameter` (a decimal integer).
    ChangeThreshold,
    /// Record execution only; no core state side-effect.
    Generic,
}

/// A pending or executed multisig proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u64,
    pub to: Address,
    pub value: u64,
    pub data: String,
    pub action: ProposalAction,
    pub parameter: String,
    pub created_at: u64,
    pub execution_delay: u64,
    pub signatures: BTreeSet<Address>,
    pub executed: bool,
}

impl Proposal {
    /// Earliest wall-clock second at which execution may succeed.
    pub fn ready_at(&self) -> u64 {
        self.created_at.saturating_add(self.execution_delay)
    }
}
