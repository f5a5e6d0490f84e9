//! Locked account-balance book
//!
//! Shared by the three ledgers. The balance map and the running supply sit
//! under one lock so the supply invariant holds at every observable moment:
//! a reader can never see a debit without its matching credit or supply
//! adjustment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use lib_types::Address;

use crate::errors::{LedgerError, LedgerResult};

/// Balance map plus running supply, mutated only as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Book {
    balances: HashMap<Address, u64>,
    total_supply: u64,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, addr: &Address) -> u64 {
        self.balances.get(addr).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Sum over all accounts. Test and audit surface.
    pub fn sum_of_balances(&self) -> u64 {
        self.balances.values().sum()
    }

    /// Move `amount` between two distinct accounts. Supply is untouched.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if from == to {
            return Err(LedgerError::SelfTransfer);
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert(from.clone(), have - amount);
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }

    /// Credit an account and grow the supply tracker.
    pub fn credit(&mut self, to: &Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        self.total_supply += amount;
        Ok(())
    }

    /// Debit an account and shrink the supply tracker.
    pub fn debit(&mut self, from: &Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert(from.clone(), have - amount);
        self.total_supply -= amount;
        Ok(())
    }

    /// One-time genesis credit that bypasses the supply tracker (the
    /// fixed-supply ledger reports a constant instead).
    pub fn seed(&mut self, to: &Address, amount: u64) {
        *self.balances.entry(to.clone()).or_insert(0) += amount;
    }

    /// Debit an account without touching the supply tracker. Counterpart of
    /// [`Book::seed`] for fixed-supply burns.
    pub fn remove(&mut self, from: &Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        self.balances.insert(from.clone(), have - amount);
        Ok(())
    }
}
