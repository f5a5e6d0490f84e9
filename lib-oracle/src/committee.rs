//! Oracle committee
//!
//! Owns the canonical current price, a bounded history ring, the fixed
//! oracle identities, advisory per-oracle performance counters, and the
//! emergency-pause flag.
//!
//! # Invariants
//!
//! 1. Accepted updates form a total order of strictly increasing message
//!    timestamps
//! 2. An update is accepted iff at least `QUORUM_THRESHOLD` distinct active
//!    oracle indices produced verifier-valid signatures over the exact
//!    canonical serialization of its message
//! 3. The history ring never exceeds `PRICE_HISTORY_CAPACITY` entries and
//!    evicts oldest-first
//! 4. Three consecutive rejected submissions auto-enter the paused state

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use lib_crypto::SignatureVerifier;
use lib_types::config::{
    EMERGENCY_PAUSE_THRESHOLD, NUM_ORACLES, PRICE_HISTORY_CAPACITY, QUORUM_THRESHOLD,
};
use lib_types::{events, Address, Clock, LifecycleError, LifecycleGuard};

use crate::errors::{OracleError, OracleResult};
use crate::message::{PriceMessage, PriceUpdate};
use crate::validator::PriceValidator;

/// A committee member, fixed at construction. The `active` flag is a
/// runtime toggle used to exclude compromised signers from future quorums;
/// it does not change the quorum threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleIdentity {
    pub index: usize,
    pub pubkey: Vec<u8>,
    pub address: Address,
    pub active: bool,
}

/// Advisory per-oracle performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OraclePerformance {
    pub successful_updates: u64,
    pub failed_updates: u64,
    pub last_update_time: u64,
}

/// Canonical price state guarded by one lock so readers can never observe
/// a torn last-accepted/history pair.
#[derive(Debug)]
struct PriceState {
    last_accepted: PriceMessage,
    history: VecDeque<PriceMessage>,
}

/// Atomic snapshot of committee state for external persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitteeSnapshot {
    pub last_accepted: PriceMessage,
    pub history: Vec<PriceMessage>,
    pub active: Vec<bool>,
    pub performance: Vec<OraclePerformance>,
    pub failed_update_counter: u64,
    pub emergency_paused: bool,
    pub initialized: bool,
    pub burned: bool,
    pub admin: Address,
}

/// The price oracle committee.
pub struct OracleCommittee {
    guard: LifecycleGuard,
    verifier: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
    validator: PriceValidator,
    oracles: RwLock<Vec<OracleIdentity>>,
    state: Mutex<PriceState>,
    performance: Mutex<Vec<OraclePerformance>>,
    failed_updates: AtomicU64,
    emergency_paused: AtomicBool,
}

impl OracleCommittee {
    /// Build the committee over exactly `NUM_ORACLES` identities. All
    /// oracles start active; the price state starts at the zero sentinel
    /// so the first accepted update bypasses the deviation predicate.
    pub fn new(
        admin: Address,
        oracle_keys: [(Vec<u8>, Address); NUM_ORACLES],
        verifier: Arc<dyn SignatureVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let oracles = oracle_keys
            .into_iter()
            .enumerate()
            .map(|(index, (pubkey, address))| OracleIdentity {
                index,
                pubkey,
                address,
                active: true,
            })
            .collect();

        tracing::info!(oracles = NUM_ORACLES, quorum = QUORUM_THRESHOLD, "oracle committee created");

        OracleCommittee {
            guard: LifecycleGuard::new("oracle-committee", admin),
            verifier,
            clock,
            validator: PriceValidator::default(),
            oracles: RwLock::new(oracles),
            state: Mutex::new(PriceState {
                last_accepted: PriceMessage::new(0, 0, 15, 0, "BTC"),
                history: VecDeque::with_capacity(PRICE_HISTORY_CAPACITY),
            }),
            performance: Mutex::new(vec![OraclePerformance::default(); NUM_ORACLES]),
            failed_updates: AtomicU64::new(0),
            emergency_paused: AtomicBool::new(false),
        }
    }

    /// Central acceptance function. The check order is contractual:
    /// lifecycle, pause, digest, signature dedup/verify, quorum,
    /// monotonicity, validity predicates, then commit.
    ///
    /// Counted rejections (everything past the pause gate) advance the
    /// failure counter; reaching `EMERGENCY_PAUSE_THRESHOLD` auto-pauses.
    /// Acceptance resets the counter.
    pub fn submit_price_update(&self, update: &PriceUpdate) -> OracleResult<()> {
        self.guard.require_initialized()?;

        if self.emergency_paused.load(Ordering::SeqCst) {
            tracing::warn!("price update rejected: committee paused");
            return Err(OracleError::EmergencyPaused);
        }

        match self.try_accept(update) {
            Ok(contributors) => {
                self.failed_updates.store(0, Ordering::SeqCst);
                self.record_success(&contributors, update.message.timestamp);
                tracing::info!(
                    price = update.message.price,
                    asset = %update.message.asset,
                    timestamp = update.message.timestamp,
                    signers = contributors.len(),
                    "price update accepted"
                );
                Ok(())
            }
            Err(err) => {
                let failures = self.failed_updates.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::warn!(failures, error = %err, "price update rejected");
                if failures >= EMERGENCY_PAUSE_THRESHOLD {
                    self.emergency_paused.store(true, Ordering::SeqCst);
                    events::security(
                        "oracle-committee",
                        "automatic emergency pause after repeated rejected updates",
                    );
                }
                Err(err)
            }
        }
    }

    /// Runs steps 3-9 of the acceptance algorithm and returns the
    /// contributing oracle indices on success.
    fn try_accept(&self, update: &PriceUpdate) -> OracleResult<Vec<usize>> {
        if !update.message.asset_is_well_formed() {
            return Err(OracleError::InvalidAsset);
        }

        let digest = update.message.digest();

        // Dedup by oracle index, first occurrence wins. Out-of-range
        // indices and deactivated oracles are dropped from the count, not
        // hard errors: the rest of the envelope may still carry a quorum.
        let mut seen = [false; NUM_ORACLES];
        let mut contributors = Vec::new();
        let mut rejected_signers = Vec::new();
        {
            let oracles = self.oracles.read();
            for sig in &update.signatures {
                let index = sig.oracle_index;
                if index >= NUM_ORACLES || seen[index] {
                    continue;
                }
                seen[index] = true;
                if !oracles[index].active {
                    continue;
                }
                if self.verifier.verify(&oracles[index].pubkey, &digest, &sig.signature) {
                    contributors.push(index);
                } else {
                    rejected_signers.push(index);
                }
            }
        }
        self.record_failures(&rejected_signers);

        if contributors.len() < QUORUM_THRESHOLD {
            events::security("oracle-committee", "price update quorum not met");
            return Err(OracleError::QuorumNotMet {
                valid: contributors.len(),
                required: QUORUM_THRESHOLD,
            });
        }

        let mut state = self.state.lock();

        if update.message.timestamp <= state.last_accepted.timestamp {
            return Err(OracleError::NonMonotonic {
                timestamp: update.message.timestamp,
                last_accepted: state.last_accepted.timestamp,
            });
        }

        self.validator
            .validate(&update.message, self.clock.now_unix(), state.last_accepted.price)?;

        // Commit
        state.last_accepted = update.message.clone();
        if state.history.len() == PRICE_HISTORY_CAPACITY {
            state.history.pop_front();
        }
        state.history.push_back(update.message.clone());

        Ok(contributors)
    }

    fn record_success(&self, contributors: &[usize], timestamp: u64) {
        let mut performance = self.performance.lock();
        for &index in contributors {
            let perf = &mut performance[index];
            perf.successful_updates += 1;
            perf.last_update_time = timestamp;
        }
    }

    fn record_failures(&self, rejected: &[usize]) {
        if rejected.is_empty() {
            return;
        }
        let mut performance = self.performance.lock();
        for &index in rejected {
            performance[index].failed_updates += 1;
        }
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// Snapshot of the last accepted message. Never torn: the whole
    /// message is cloned under the price lock.
    pub fn current_price(&self) -> PriceMessage {
        self.state.lock().last_accepted.clone()
    }

    /// Accepted messages, oldest first, at most `PRICE_HISTORY_CAPACITY`.
    pub fn history(&self) -> Vec<PriceMessage> {
        self.state.lock().history.iter().cloned().collect()
    }

    pub fn is_emergency_paused(&self) -> bool {
        self.emergency_paused.load(Ordering::SeqCst)
    }

    pub fn failed_update_count(&self) -> u64 {
        self.failed_updates.load(Ordering::SeqCst)
    }

    pub fn oracle_performance(&self) -> Vec<OraclePerformance> {
        self.performance.lock().clone()
    }

    pub fn is_oracle_active(&self, index: usize) -> bool {
        self.oracles.read().get(index).map(|o| o.active).unwrap_or(false)
    }

    pub fn active_oracle_count(&self) -> usize {
        self.oracles.read().iter().filter(|o| o.active).count()
    }

    /// Whether enough oracles remain active to ever assemble a quorum.
    pub fn has_sufficient_quorum(&self) -> bool {
        self.active_oracle_count() >= QUORUM_THRESHOLD
    }

    /// Atomic snapshot for external persistence (recovery must preserve
    /// monotonicity and the burned state).
    pub fn snapshot(&self) -> CommitteeSnapshot {
        let state = self.state.lock();
        CommitteeSnapshot {
            last_accepted: state.last_accepted.clone(),
            history: state.history.iter().cloned().collect(),
            active: self.oracles.read().iter().map(|o| o.active).collect(),
            performance: self.performance.lock().clone(),
            failed_update_counter: self.failed_updates.load(Ordering::SeqCst),
            emergency_paused: self.emergency_paused.load(Ordering::SeqCst),
            initialized: self.guard.is_initialized(),
            burned: self.guard.is_key_burned(),
            admin: self.guard.admin(),
        }
    }

    // ------------------------------------------------------------------
    // Admin surface
    // ------------------------------------------------------------------

    /// Pause future submissions. Accepted state is untouched.
    pub fn emergency_pause(&self, sender: &Address) -> OracleResult<()> {
        self.guard.require_admin(sender)?;
        self.emergency_paused.store(true, Ordering::SeqCst);
        events::security("oracle-committee", "emergency pause activated by admin");
        Ok(())
    }

    /// Resume submissions and restart the consecutive-failure window.
    pub fn resume(&self, sender: &Address) -> OracleResult<()> {
        self.guard.require_admin(sender)?;
        self.emergency_paused.store(false, Ordering::SeqCst);
        self.failed_updates.store(0, Ordering::SeqCst);
        tracing::info!(sender = %sender, "committee operations resumed");
        Ok(())
    }

    pub fn deactivate_oracle(&self, sender: &Address, index: usize) -> OracleResult<()> {
        self.guard.require_admin(sender)?;
        self.set_oracle_active(index, false)?;
        tracing::warn!(oracle = index, "oracle deactivated");
        Ok(())
    }

    pub fn activate_oracle(&self, sender: &Address, index: usize) -> OracleResult<()> {
        self.guard.require_admin(sender)?;
        self.set_oracle_active(index, true)?;
        tracing::info!(oracle = index, "oracle activated");
        Ok(())
    }

    fn set_oracle_active(&self, index: usize, active: bool) -> OracleResult<()> {
        let mut oracles = self.oracles.write();
        let oracle = oracles
            .get_mut(index)
            .ok_or(OracleError::InvalidOracleIndex(index))?;
        oracle.active = active;
        Ok(())
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

    pub fn admin(&self) -> Address {
        self.guard.admin()
    }
}
