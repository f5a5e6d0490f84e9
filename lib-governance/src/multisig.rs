//! k-of-N delayed multisig
//!
//! Owners propose, co-sign, and - once the threshold is met and the delay
//! has elapsed - execute administrative actions. The owner set and the
//! proposal table mutate under one lock so an execution observes a
//! consistent ownership view.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lib_types::config::EXECUTION_DELAY_SECS;
use lib_types::{events, Address, Clock, LifecycleError, LifecycleGuard};

use crate::errors::{GovernanceError, GovernanceResult};
use crate::proposal::{Proposal, ProposalAction};

#[derive(Debug)]
struct MultisigState {
    owners: Vec<Address>,
    threshold: u32,
    proposals: BTreeMap<u64, Proposal>,
}

/// The governance multisig.
pub struct GovernanceMultisig {
    guard: LifecycleGuard,
    clock: Arc<dyn Clock>,
    next_id: AtomicU64,
    state: Mutex<MultisigState>,
}

impl GovernanceMultisig {
    /// Build the multisig over the initial owner set. `threshold` is
    /// taken as given; later changes go through `ChangeThreshold`
    /// proposals, which enforce `1 <= threshold <= |owners|`.
    pub fn new(
        deployer: Address,
        owners: Vec<Address>,
        threshold: u32,
        clock: Arc<dyn Clock>,
    ) -> Self {
        tracing::info!(owners = owners.len(), threshold, "governance multisig created");
        GovernanceMultisig {
            guard: LifecycleGuard::new("governance-multisig", deployer),
            clock,
            next_id: AtomicU64::new(1),
            state: Mutex::new(MultisigState {
                owners,
                threshold,
                proposals: BTreeMap::new(),
            }),
        }
    }

    /// Create a proposal. Only current owners may propose; the execution
    /// delay starts counting immediately.
    pub fn propose(
        &self,
        proposer: &Address,
        to: Address,
        value: u64,
        data: String,
        action: ProposalAction,
        parameter: String,
    ) -> GovernanceResult<u64> {
        self.guard.require_active(proposer)?;

        let mut state = self.state.lock();
        if !state.owners.contains(proposer) {
            drop(state);
            events::security("governance-multisig", "proposal rejected: not an owner");
            return Err(GovernanceError::NotOwner);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let proposal = Proposal {
            id,
            to,
            value,
            data,
            action,
            parameter,
            created_at: self.clock.now_unix(),
            execution_delay: EXECUTION_DELAY_SECS,
            signatures: Default::default(),
            executed: false,
        };
        state.proposals.insert(id, proposal);
        drop(state);

        tracing::info!(id, proposer = %proposer, ?action, "proposal created");
        Ok(id)
    }

    /// Add `signer` to the proposal's signature set. Signing is
    /// idempotent: re-signing neither errors nor double-counts.
    pub fn sign(&self, id: u64, signer: &Address) -> GovernanceResult<()> {
        self.guard.require_active(signer)?;

        let mut state = self.state.lock();
        if !state.owners.contains(signer) {
            drop(state);
            events::security("governance-multisig", "signature rejected: not an owner");
            return Err(GovernanceError::NotOwner);
        }
        let threshold = state.threshold;
        let proposal = state
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        proposal.signatures.insert(signer.clone());
        let collected = proposal.signatures.len();
        drop(state);

        tracing::info!(id, signer = %signer, collected, threshold, "proposal signed");
        Ok(())
    }

    /// Execute a ripened proposal: threshold met, delay elapsed. Dispatches
    /// on the proposal action; the executed flag prevents replay.
    pub fn execute(&self, id: u64) -> GovernanceResult<()> {
        self.guard.require_initialized()?;

        let now = self.clock.now_unix();
        let mut state = self.state.lock();

        let proposal = state
            .proposals
            .get(&id)
            .ok_or(GovernanceError::UnknownProposal(id))?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        let have = proposal.signatures.len();
        let need = state.threshold as usize;
        if have < need {
            return Err(GovernanceError::InsufficientSignatures { have, need });
        }
        let ready_at = proposal.ready_at();
        if now < ready_at {
            return Err(GovernanceError::DelayNotElapsed { ready_at, now });
        }

        let action = proposal.action;
        let parameter = proposal.parameter.clone();
        self.dispatch(&mut state, action, &parameter)?;

        // the action ran; retire the proposal
        let proposal = state
            .proposals
            .get_mut(&id)
            .expect("proposal existence checked above");
        proposal.executed = true;
        let threshold = state.threshold;
        drop(state);

        tracing::info!(id, ?action, threshold, "proposal executed");
        Ok(())
    }

    fn dispatch(
        &self,
        state: &mut MultisigState,
        action: ProposalAction,
        parameter: &str,
    ) -> GovernanceResult<()> {
        match action {
            ProposalAction::AddOwner => {
                let owner = Address::from(parameter);
                if state.owners.contains(&owner) {
                    return Err(GovernanceError::InvalidParameter(format!(
                        "{owner} is already an owner"
                    )));
                }
                state.owners.push(owner);
            }
            ProposalAction::RemoveOwner => {
                let owner = Address::from(parameter);
                let position = state
                    .owners
                    .iter()
                    .position(|o| *o == owner)
                    .ok_or_else(|| {
                        GovernanceError::InvalidParameter(format!("{owner} is not an owner"))
                    })?;
                if state.owners.len() == 1 {
                    return Err(GovernanceError::WouldOrphanOwners);
                }
                state.owners.remove(position);
                // keep the threshold satisfiable
                let owner_count = state.owners.len() as u32;
                if state.threshold > owner_count {
                    tracing::warn!(from = state.threshold, to = owner_count, "threshold clamped after owner removal");
                    state.threshold = owner_count;
                }
            }
            ProposalAction::ChangeThreshold => {
                let threshold: u32 = parameter.trim().parse().map_err(|_| {
                    GovernanceError::InvalidParameter(format!("unparseable threshold {parameter:?}"))
                })?;
                if threshold == 0 || threshold as usize > state.owners.len() {
                    return Err(GovernanceError::InvalidParameter(format!(
                        "threshold {threshold} outside [1, {}]",
                        state.owners.len()
                    )));
                }
                state.threshold = threshold;
            }
            ProposalAction::Generic => {}
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    pub fn owners(&self) -> Vec<Address> {
        self.state.lock().owners.clone()
    }

    pub fn threshold(&self) -> u32 {
        self.state.lock().threshold
    }

    pub fn proposal(&self, id: u64) -> Option<Proposal> {
        self.state.lock().proposals.get(&id).cloned()
    }

    pub fn is_executed(&self, id: u64) -> bool {
        self.state
            .lock()
            .proposals
            .get(&id)
            .map(|p| p.executed)
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn finalize_launch(&self, sender: &Address) -> Result<(), LifecycleError> {
        self.guard.finalize_launch(sender)
    }

    pub fn burn_key(&self, sender: &Address) -> Result<(), LifecycleError> {
        self.guard.burn_key(sender)
    }

    pub fn is_initialized(&self) -> bool {
        self.guard.is_initialized()
    }

    pub fn is_key_burned(&self) -> bool {
        self.guard.is_key_burned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::ManualClock;

    const NOW: u64 = 1_700_000_000;

    fn admin() -> Address {
        Address::from("ST1ADMIN")
    }

    fn owner(i: usize) -> Address {
        Address::from(format!("ST{}OWNER", i + 1))
    }

    fn multisig(owner_count: usize, threshold: u32) -> (GovernanceMultisig, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(NOW));
        let owners = (0..owner_count).map(owner).collect();
        let multisig =
            GovernanceMultisig::new(admin(), owners, threshold, clock.clone() as Arc<dyn Clock>);
        multisig.finalize_launch(&admin()).unwrap();
        (multisig, clock)
    }

    fn propose(multisig: &GovernanceMultisig, action: ProposalAction, parameter: &str) -> u64 {
        multisig
            .propose(
                &owner(0),
                Address::from("ST1TARGET"),
                0,
                String::new(),
                action,
                parameter.to_string(),
            )
            .unwrap()
    }

    fn ripen(multisig: &GovernanceMultisig, id: u64, signers: usize, clock: &ManualClock) {
        for i in 0..signers {
            multisig.sign(id, &owner(i)).unwrap();
        }
        clock.set(NOW + EXECUTION_DELAY_SECS);
    }

    // ===== PROPOSE / SIGN =====

    #[test]
    fn test_propose_requires_ownership() {
        let (multisig, _) = multisig(3, 2);
        assert_eq!(
            multisig.propose(
                &Address::from("ST9OUTSIDER"),
                Address::from("ST1TARGET"),
                0,
                String::new(),
                ProposalAction::Generic,
                String::new(),
            ),
            Err(GovernanceError::NotOwner)
        );
    }

    #[test]
    fn test_proposal_ids_increment() {
        let (multisig, _) = multisig(3, 2);
        let first = propose(&multisig, ProposalAction::Generic, "");
        let second = propose(&multisig, ProposalAction::Generic, "");
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_sign_unknown_and_non_owner() {
        let (multisig, _) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::Generic, "");

        assert_eq!(
            multisig.sign(999, &owner(0)),
            Err(GovernanceError::UnknownProposal(999))
        );
        assert_eq!(
            multisig.sign(id, &Address::from("ST9OUTSIDER")),
            Err(GovernanceError::NotOwner)
        );
    }

    #[test]
    fn test_sign_is_idempotent() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::Generic, "");

        multisig.sign(id, &owner(0)).unwrap();
        multisig.sign(id, &owner(0)).unwrap();
        assert_eq!(multisig.proposal(id).unwrap().signatures.len(), 1);

        clock.set(NOW + EXECUTION_DELAY_SECS);
        assert_eq!(
            multisig.execute(id),
            Err(GovernanceError::InsufficientSignatures { have: 1, need: 2 })
        );
    }

    // ===== EXECUTE =====

    #[test]
    fn test_execute_enforces_threshold_then_delay() {
        let (multisig, clock) = multisig(4, 3);
        let id = propose(&multisig, ProposalAction::ChangeThreshold, "4");

        for i in 0..3 {
            multisig.sign(id, &owner(i)).unwrap();
        }

        // an hour in: signatures suffice, the delay does not
        clock.set(NOW + 3600);
        assert_eq!(
            multisig.execute(id),
            Err(GovernanceError::DelayNotElapsed {
                ready_at: NOW + EXECUTION_DELAY_SECS,
                now: NOW + 3600
            })
        );

        clock.set(NOW + EXECUTION_DELAY_SECS);
        multisig.execute(id).unwrap();
        assert_eq!(multisig.threshold(), 4);
        assert!(multisig.is_executed(id));
    }

    #[test]
    fn test_execute_replay_rejected() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::Generic, "");
        ripen(&multisig, id, 2, &clock);

        multisig.execute(id).unwrap();
        assert_eq!(multisig.execute(id), Err(GovernanceError::AlreadyExecuted(id)));
        assert_eq!(multisig.sign(id, &owner(2)), Err(GovernanceError::AlreadyExecuted(id)));
    }

    #[test]
    fn test_execute_unknown_proposal() {
        let (multisig, _) = multisig(3, 2);
        assert_eq!(multisig.execute(42), Err(GovernanceError::UnknownProposal(42)));
    }

    // ===== ACTION DISPATCH =====

    #[test]
    fn test_add_owner() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::AddOwner, "ST4OWNER");
        ripen(&multisig, id, 2, &clock);

        multisig.execute(id).unwrap();
        assert!(multisig.owners().contains(&Address::from("ST4OWNER")));
        assert_eq!(multisig.owners().len(), 4);
    }

    #[test]
    fn test_add_existing_owner_rejected() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::AddOwner, owner(1).as_str());
        ripen(&multisig, id, 2, &clock);

        assert!(matches!(
            multisig.execute(id),
            Err(GovernanceError::InvalidParameter(_))
        ));
        // the failed dispatch did not retire the proposal
        assert!(!multisig.is_executed(id));
        assert_eq!(multisig.owners().len(), 3);
    }

    #[test]
    fn test_remove_owner_clamps_threshold() {
        let (multisig, clock) = multisig(3, 3);
        let id = propose(&multisig, ProposalAction::RemoveOwner, owner(2).as_str());
        ripen(&multisig, id, 3, &clock);

        multisig.execute(id).unwrap();
        assert_eq!(multisig.owners().len(), 2);
        // 3-of-2 is unsatisfiable; clamped down
        assert_eq!(multisig.threshold(), 2);
    }

    #[test]
    fn test_remove_unknown_owner_rejected() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::RemoveOwner, "ST9OUTSIDER");
        ripen(&multisig, id, 2, &clock);

        assert!(matches!(
            multisig.execute(id),
            Err(GovernanceError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_remove_last_owner_rejected() {
        let (multisig, clock) = multisig(1, 1);
        let id = propose(&multisig, ProposalAction::RemoveOwner, owner(0).as_str());
        ripen(&multisig, id, 1, &clock);

        assert_eq!(multisig.execute(id), Err(GovernanceError::WouldOrphanOwners));
        assert_eq!(multisig.owners().len(), 1);
    }

    #[test]
    fn test_change_threshold_validation() {
        let (multisig, clock) = multisig(3, 2);

        for (parameter, expect_ok) in [("0", false), ("4", false), ("x", false), ("3", true)] {
            let id = propose(&multisig, ProposalAction::ChangeThreshold, parameter);
            for i in 0..2 {
                multisig.sign(id, &owner(i)).unwrap();
            }
            // each proposal is created at the current clock; ripen it fully
            clock.advance(EXECUTION_DELAY_SECS);
            let result = multisig.execute(id);
            if expect_ok {
                result.unwrap();
                assert_eq!(multisig.threshold(), 3);
            } else {
                assert!(matches!(result, Err(GovernanceError::InvalidParameter(_))));
            }
        }
    }

    #[test]
    fn test_generic_action_records_execution_only() {
        let (multisig, clock) = multisig(3, 2);
        let id = propose(&multisig, ProposalAction::Generic, "anything");
        ripen(&multisig, id, 2, &clock);

        multisig.execute(id).unwrap();
        assert!(multisig.is_executed(id));
        assert_eq!(multisig.owners().len(), 3);
        assert_eq!(multisig.threshold(), 2);
    }

    // ===== LIFECYCLE =====

    #[test]
    fn test_pre_launch_gating() {
        let clock = Arc::new(ManualClock::new(NOW));
        let multisig = GovernanceMultisig::new(
            admin(),
            vec![owner(0)],
            1,
            clock as Arc<dyn Clock>,
        );

        assert_eq!(
            multisig.propose(
                &owner(0),
                Address::from("ST1TARGET"),
                0,
                String::new(),
                ProposalAction::Generic,
                String::new(),
            ),
            Err(GovernanceError::Lifecycle(LifecycleError::NotInitialized))
        );
        assert_eq!(
            multisig.execute(1),
            Err(GovernanceError::Lifecycle(LifecycleError::NotInitialized))
        );
    }

    #[test]
    fn test_key_burn_leaves_proposal_flow_open() {
        let (multisig, clock) = multisig(3, 2);
        multisig.burn_key(&admin()).unwrap();

        // governance is owner-driven, not admin-driven; it survives the burn
        let id = propose(&multisig, ProposalAction::Generic, "");
        ripen(&multisig, id, 2, &clock);
        multisig.execute(id).unwrap();
    }
}
