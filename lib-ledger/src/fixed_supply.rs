//! BANKON PYTHAI fixed-supply token (BKPY)
//!
//! The entire supply exists at genesis: `mint_initial_supply` credits the
//! constant total to the admin exactly once, and no further minting path
//! exists. Burning debits the holder but the headline `total_supply()`
//! keeps reporting the genesis constant; observers wanting circulating
//! supply subtract `total_burned()` themselves. That contract is pinned by
//! tests.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lib_types::config::{BKPY_DECIMALS, BKPY_TOTAL_SUPPLY};
use lib_types::{Address, LifecycleError, LifecycleGuard};

use crate::balances::Book;
use crate::errors::{LedgerError, LedgerResult};

/// The BKPY governance token ledger.
pub struct FixedSupplyToken {
    guard: LifecycleGuard,
    book: Mutex<Book>,
    minted: AtomicBool,
    total_burned: AtomicU64,
}

impl FixedSupplyToken {
    pub fn new(deployer: Address) -> Self {
        FixedSupplyToken {
            guard: LifecycleGuard::new("bkpy-token", deployer),
            book: Mutex::new(Book::new()),
            minted: AtomicBool::new(false),
            total_burned: AtomicU64::new(0),
        }
    }

    /// One-shot genesis mint to the admin. The second call observes the
    /// raised flag and returns `AlreadyMinted` without mutation.
    pub fn mint_initial_supply(&self, sender: &Address) -> LedgerResult<()> {
        self.guard.require_admin(sender)?;

        if self.minted.swap(true, Ordering::SeqCst) {
            tracing::warn!("initial BKPY supply already minted");
            return Err(LedgerError::AlreadyMinted);
        }

        self.book.lock().seed(sender, BKPY_TOTAL_SUPPLY);
        tracing::info!(to = %sender, supply = BKPY_TOTAL_SUPPLY, "initial BKPY supply minted");
        Ok(())
    }

    pub fn transfer(&self, sender: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.book.lock().transfer(sender, to, amount)?;
        tracing::info!(from = %sender, to = %to, amount, "BKPY transfer");
        Ok(())
    }

    /// Debit the sender without crediting anyone. Does not reduce the
    /// headline supply.
    pub fn burn(&self, sender: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.book.lock().remove(sender, amount)?;
        self.total_burned.fetch_add(amount, Ordering::SeqCst);
        tracing::info!(from = %sender, amount, "BKPY burn");
        Ok(())
    }

    pub fn balance_of(&self, addr: &Address) -> u64 {
        self.book.lock().balance_of(addr)
    }

    /// Headline supply: the genesis constant, regardless of burns.
    pub const fn total_supply(&self) -> u64 {
        BKPY_TOTAL_SUPPLY
    }

    pub fn total_burned(&self) -> u64 {
        self.total_burned.load(Ordering::SeqCst)
    }

    /// Test and audit surface.
    pub fn sum_of_balances(&self) -> u64 {
        self.book.lock().sum_of_balances()
    }

    pub fn symbol(&self) -> &'static str {
        "BKPY"
    }

    pub fn name(&self) -> &'static str {
        "BANKON PYTHAI"
    }

    pub const fn decimals(&self) -> u8 {
        BKPY_DECIMALS
    }

    pub fn is_minted(&self) -> bool {
        self.minted.load(Ordering::SeqCst)
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
