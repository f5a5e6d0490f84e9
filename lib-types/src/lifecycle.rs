//! Launch lifecycle guard
//!
//! One-shot lifecycle shared by every mutable component:
//! `Uninitialized -> Active -> Burned`. While uninitialized only the admin
//! may act. Once the key is burned the stored admin identity becomes the
//! burn sentinel and every admin-gated operation is rejected permanently;
//! user-initiated ledger operations keep working.
//!
//! Each component owns a guard value and gates its entry points explicitly
//! (composition, not inheritance).
//!
//! # Invariants
//!
//! 1. `initialized` and `burned` transition `false -> true` exactly once
//! 2. After `burn_key`, `require_admin` fails for every sender, including
//!    the former admin
//! 3. The stored admin address equals the sentinel iff `burned`

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::address::Address;
use crate::events;

/// Error during lifecycle gating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("component not initialized")]
    NotInitialized,

    #[error("admin access required")]
    NotAdmin,

    #[error("admin key burned - component is immutable")]
    Immutable,
}

/// Observable stage of a guarded component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStage {
    Uninitialized,
    Active,
    Burned,
}

/// Launch protection embedded in every mutable component.
#[derive(Debug)]
pub struct LifecycleGuard {
    component: &'static str,
    initialized: AtomicBool,
    burned: AtomicBool,
    admin: RwLock<Address>,
}

impl LifecycleGuard {
    pub fn new(component: &'static str, admin: Address) -> Self {
        tracing::info!(component, admin = %admin, "lifecycle guard created");
        LifecycleGuard {
            component,
            initialized: AtomicBool::new(false),
            burned: AtomicBool::new(false),
            admin: RwLock::new(admin),
        }
    }

    /// Gate for public operations. While uninitialized only the admin may
    /// act; after launch every sender passes. The burned state does not
    /// close this gate.
    pub fn require_active(&self, sender: &Address) -> Result<(), LifecycleError> {
        if !self.initialized.load(Ordering::SeqCst) && *sender != *self.admin.read() {
            events::security(self.component, "pre-launch access rejected");
            return Err(LifecycleError::NotInitialized);
        }
        Ok(())
    }

    /// Sender-free form of the launch gate, for operations with no caller
    /// identity (committee submissions, proposal execution).
    pub fn require_initialized(&self) -> Result<(), LifecycleError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(LifecycleError::NotInitialized);
        }
        Ok(())
    }

    /// Gate for admin operations. Burned is checked first: a burned
    /// component reports `Immutable`, never `NotAdmin`, regardless of who
    /// asks.
    pub fn require_admin(&self, sender: &Address) -> Result<(), LifecycleError> {
        if self.burned.load(Ordering::SeqCst) {
            events::security(self.component, "admin operation rejected: key burned");
            return Err(LifecycleError::Immutable);
        }
        if *sender != *self.admin.read() {
            events::security(self.component, "admin operation rejected: not admin");
            return Err(LifecycleError::NotAdmin);
        }
        Ok(())
    }

    pub fn finalize_launch(&self, sender: &Address) -> Result<(), LifecycleError> {
        self.require_admin(sender)?;
        self.initialized.store(true, Ordering::SeqCst);
        tracing::info!(component = self.component, sender = %sender, "launch finalized");
        Ok(())
    }

    /// Irreversibly burn the admin key. The stored admin identity is
    /// replaced with the sentinel; `burned` is raised first so a concurrent
    /// `require_admin` can never pass against the half-updated state.
    pub fn burn_key(&self, sender: &Address) -> Result<(), LifecycleError> {
        self.require_admin(sender)?;
        self.burned.store(true, Ordering::SeqCst);
        *self.admin.write() = Address::burned_sentinel();
        events::security(self.component, "admin key burned - component immutable");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn is_key_burned(&self) -> bool {
        self.burned.load(Ordering::SeqCst)
    }

    pub fn admin(&self) -> Address {
        self.admin.read().clone()
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn stage(&self) -> LifecycleStage {
        if self.burned.load(Ordering::SeqCst) {
            LifecycleStage::Burned
        } else if self.initialized.load(Ordering::SeqCst) {
            LifecycleStage::Active
        } else {
            LifecycleStage::Uninitialized
        }
    }
}
