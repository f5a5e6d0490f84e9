//! qBTC synthetic token
//!
//! Minting is gated on the oracle: the caller bundles a `PriceUpdate`, the
//! committee must accept it in the same call, and the message must still be
//! fresh against the committee's accepted timestamp at credit time. Burn
//! and transfer are unrestricted modulo lifecycle.
//!
//! The running supply tracker and the balance map mutate under one lock, so
//! the sum of balances equals `total_supply()` at every observable moment.

use parking_lot::Mutex;
use std::sync::Arc;

use lib_oracle::{OracleCommittee, PriceMessage, PriceUpdate};
use lib_types::config::{PRICE_UPDATE_TIMEOUT, QBTC_DECIMALS, QBTC_TOTAL_SUPPLY};
use lib_types::{Address, LifecycleError, LifecycleGuard};

use crate::balances::Book;
use crate::errors::{LedgerError, LedgerResult};

/// The qBTC synthetic asset ledger.
pub struct SyntheticAsset {
    guard: LifecycleGuard,
    oracle: Arc<OracleCommittee>,
    book: Mutex<Book>,
}

impl SyntheticAsset {
    pub fn new(deployer: Address, oracle: Arc<OracleCommittee>) -> Self {
        SyntheticAsset {
            guard: LifecycleGuard::new("qbtc-synthetic", deployer),
            oracle,
            book: Mutex::new(Book::new()),
        }
    }

    /// Mint against a bundled price update.
    ///
    /// Atomic two-step: the committee must accept `update` (any rejection
    /// aborts the mint with nothing mutated), then the message timestamp
    /// must sit within `PRICE_UPDATE_TIMEOUT` of the committee's current
    /// accepted timestamp at credit time. The supply cap is preflighted
    /// before the oracle submission so a cap violation cannot surface after
    /// the committee has already moved.
    pub fn mint(&self, user: &Address, amount: u64, update: &PriceUpdate) -> LedgerResult<()> {
        self.guard.require_active(user)?;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        self.check_cap(amount)?;

        self.oracle.submit_price_update(update)?;

        let current = self.oracle.current_price();
        let age = update.message.timestamp.abs_diff(current.timestamp);
        if age > PRICE_UPDATE_TIMEOUT {
            tracing::warn!(age, "price update too old for minting");
            return Err(LedgerError::StalePrice {
                age,
                limit: PRICE_UPDATE_TIMEOUT,
            });
        }

        {
            let mut book = self.book.lock();
            // recheck under the lock; a concurrent mint may have consumed
            // the preflighted headroom
            if book.total_supply().saturating_add(amount) > QBTC_TOTAL_SUPPLY {
                return Err(LedgerError::SupplyCapExceeded {
                    amount,
                    cap: QBTC_TOTAL_SUPPLY,
                });
            }
            book.credit(user, amount)?;
        }
        tracing::info!(to = %user, amount, "qBTC minted");
        Ok(())
    }

    pub fn burn(&self, user: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(user)?;
        self.book.lock().debit(user, amount)?;
        tracing::info!(from = %user, amount, "qBTC burned");
        Ok(())
    }

    pub fn transfer(&self, sender: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.book.lock().transfer(sender, to, amount)?;
        tracing::info!(from = %sender, to = %to, amount, "qBTC transfer");
        Ok(())
    }

    fn check_cap(&self, amount: u64) -> LedgerResult<()> {
        let supply = self.book.lock().total_supply();
        if supply.saturating_add(amount) > QBTC_TOTAL_SUPPLY {
            return Err(LedgerError::SupplyCapExceeded {
                amount,
                cap: QBTC_TOTAL_SUPPLY,
            });
        }
        Ok(())
    }

    pub fn balance_of(&self, addr: &Address) -> u64 {
        self.book.lock().balance_of(addr)
    }

    pub fn total_supply(&self) -> u64 {
        self.book.lock().total_supply()
    }

    pub fn sum_of_balances(&self) -> u64 {
        self.book.lock().sum_of_balances()
    }

    pub fn current_price(&self) -> PriceMessage {
        self.oracle.current_price()
    }

    pub fn symbol(&self) -> &'static str {
        "qBTC"
    }

    pub fn name(&self) -> &'static str {
        "Synthetic Bitcoin"
    }

    pub const fn decimals(&self) -> u8 {
        QBTC_DECIMALS
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
