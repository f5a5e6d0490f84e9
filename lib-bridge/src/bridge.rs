//! Cross-asset swap bridge
//!
//! Conversion contract: for a swap of amount `a` at the bundled price `p`,
//! the output is `a * p / 10^QUSD_DECIMALS` with a 128-bit intermediate and
//! truncating division. Zero outputs abort with `DustResult`.
//!
//! # Invariants
//!
//! 1. `daily_volume` never exceeds `MAX_DAILY_VOLUME` within a window of
//!    the reset clock
//! 2. A rejected swap leaves oracle, ledger, and bridge state unchanged
//! 3. Swaps serialize over the bridge lock, so volume accounting cannot
//!    race

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use lib_ledger::SyntheticAsset;
use lib_oracle::{OracleCommittee, OracleError, PriceUpdate};
use lib_types::config::{
    MAX_DAILY_VOLUME, MIN_SWAP_AMOUNT, QUSD_DECIMAL_MULTIPLIER, VOLUME_WINDOW_SECS,
};
use lib_types::{Address, Clock, LifecycleError, LifecycleGuard};

use crate::errors::{BridgeError, BridgeResult};

/// Bridge-side books: per-user settled STX plus the volume window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BridgeBooks {
    balances: HashMap<Address, u64>,
    daily_volume: u64,
    last_reset: u64,
}

/// The STX/qBTC swap bridge.
pub struct Bridge {
    guard: LifecycleGuard,
    oracle: Arc<OracleCommittee>,
    qbtc: Arc<SyntheticAsset>,
    clock: Arc<dyn Clock>,
    books: Mutex<BridgeBooks>,
}

impl Bridge {
    pub fn new(
        deployer: Address,
        oracle: Arc<OracleCommittee>,
        qbtc: Arc<SyntheticAsset>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Bridge {
            guard: LifecycleGuard::new("bridge", deployer),
            oracle,
            qbtc,
            clock,
            books: Mutex::new(BridgeBooks::default()),
        }
    }

    /// Swap `stx_amount` STX for qBTC at the bundled price.
    ///
    /// Returns the minted qBTC amount. Every guard (lifecycle, pause,
    /// minimum, dust, volume headroom, supply cap) is evaluated before the
    /// oracle submission inside the mint, so any rejection leaves the
    /// oracle, the qBTC ledger, and the bridge books unchanged.
    pub fn swap_stx_for_qbtc(
        &self,
        user: &Address,
        stx_amount: u64,
        update: &PriceUpdate,
    ) -> BridgeResult<u64> {
        self.guard.require_active(user)?;
        self.require_not_paused()?;
        if stx_amount < MIN_SWAP_AMOUNT {
            return Err(BridgeError::BelowMinimum {
                amount: stx_amount,
                minimum: MIN_SWAP_AMOUNT,
            });
        }
        let qbtc_out = convert(stx_amount, update.message.price)?;

        let mut books = self.books.lock();
        self.roll_window(&mut books);
        self.check_volume_headroom(&books, stx_amount)?;

        // oracle acceptance and the qBTC credit happen inside the mint;
        // nothing before this point has mutated any state
        self.qbtc.mint(user, qbtc_out, update)?;

        *books.balances.entry(user.clone()).or_insert(0) += stx_amount;
        books.daily_volume += stx_amount;
        drop(books);

        tracing::info!(user = %user, stx_amount, qbtc_out, "bridge swap STX->qBTC");
        Ok(qbtc_out)
    }

    /// Swap `qbtc_amount` qBTC back to STX at the bundled price.
    ///
    /// Returns the settled STX amount. The caller's qBTC balance is
    /// preflighted before the oracle submission; only a concurrent drain of
    /// the same account can fail the burn afterwards, and that failure
    /// still leaves ledger and bridge state unchanged.
    pub fn swap_qbtc_for_stx(
        &self,
        user: &Address,
        qbtc_amount: u64,
        update: &PriceUpdate,
    ) -> BridgeResult<u64> {
        self.guard.require_active(user)?;
        self.require_not_paused()?;
        if qbtc_amount < MIN_SWAP_AMOUNT {
            return Err(BridgeError::BelowMinimum {
                amount: qbtc_amount,
                minimum: MIN_SWAP_AMOUNT,
            });
        }
        let stx_out = convert(qbtc_amount, update.message.price)?;

        let mut books = self.books.lock();
        self.roll_window(&mut books);
        self.check_volume_headroom(&books, stx_out)?;

        let have = self.qbtc.balance_of(user);
        if have < qbtc_amount {
            return Err(BridgeError::Ledger(
                lib_ledger::LedgerError::InsufficientBalance {
                    have,
                    need: qbtc_amount,
                },
            ));
        }

        self.oracle.submit_price_update(update)?;
        self.qbtc.burn(user, qbtc_amount)?;

        *books.balances.entry(user.clone()).or_insert(0) += stx_out;
        books.daily_volume += stx_out;
        drop(books);

        tracing::info!(user = %user, qbtc_amount, stx_out, "bridge swap qBTC->STX");
        Ok(stx_out)
    }

    fn require_not_paused(&self) -> BridgeResult<()> {
        if self.oracle.is_emergency_paused() {
            tracing::warn!("bridge swap rejected: oracle paused");
            return Err(BridgeError::Oracle(OracleError::EmergencyPaused));
        }
        Ok(())
    }

    /// Reset the volume counter once the wall clock has advanced a full
    /// window past the last reset.
    fn roll_window(&self, books: &mut BridgeBooks) {
        let now = self.clock.now_unix();
        if now.saturating_sub(books.last_reset) >= VOLUME_WINDOW_SECS {
            books.daily_volume = 0;
            books.last_reset = now;
        }
    }

    fn check_volume_headroom(&self, books: &BridgeBooks, amount: u64) -> BridgeResult<()> {
        let attempted = books
            .daily_volume
            .checked_add(amount)
            .ok_or(BridgeError::AmountOverflow)?;
        if attempted > MAX_DAILY_VOLUME {
            tracing::warn!(attempted, "daily volume ceiling hit");
            return Err(BridgeError::VolumeExceeded {
                attempted,
                limit: MAX_DAILY_VOLUME,
            });
        }
        Ok(())
    }

    pub fn bridge_balance(&self, user: &Address) -> u64 {
        self.books.lock().balances.get(user).copied().unwrap_or(0)
    }

    pub fn daily_volume(&self) -> u64 {
        self.books.lock().daily_volume
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

/// `amount * price / 10^QUSD_DECIMALS`, truncating, with a 128-bit
/// intermediate so the product cannot overflow.
fn convert(amount: u64, price: u64) -> BridgeResult<u64> {
    let scaled = (amount as u128 * price as u128) / QUSD_DECIMAL_MULTIPLIER as u128;
    if scaled == 0 {
        return Err(BridgeError::DustResult);
    }
    u64::try_from(scaled).map_err(|_| BridgeError::AmountOverflow)
}
