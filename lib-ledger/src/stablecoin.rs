//! qUSD stablecoin
//!
//! Supply is controlled by a single bridge authority: only that address may
//! mint and burn. User-to-user transfer is unrestricted modulo lifecycle.

use parking_lot::Mutex;

use lib_types::config::QUSD_DECIMALS;
use lib_types::{events, Address, LifecycleError, LifecycleGuard};

use crate::balances::Book;
use crate::errors::{LedgerError, LedgerResult};

/// The qUSD authority-minted stablecoin ledger.
pub struct AuthorityMintedStable {
    guard: LifecycleGuard,
    authority: Address,
    book: Mutex<Book>,
}

impl AuthorityMintedStable {
    pub fn new(deployer: Address, bridge_authority: Address) -> Self {
        AuthorityMintedStable {
            guard: LifecycleGuard::new("qusd-stablecoin", deployer),
            authority: bridge_authority,
            book: Mutex::new(Book::new()),
        }
    }

    pub fn mint(&self, sender: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.require_authority(sender, "mint")?;
        self.book.lock().credit(to, amount)?;
        tracing::info!(to = %to, amount, "qUSD minted");
        Ok(())
    }

    pub fn burn(&self, sender: &Address, from: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.require_authority(sender, "burn")?;
        self.book.lock().debit(from, amount)?;
        tracing::info!(from = %from, amount, "qUSD burned");
        Ok(())
    }

    pub fn transfer(&self, sender: &Address, to: &Address, amount: u64) -> LedgerResult<()> {
        self.guard.require_active(sender)?;
        self.book.lock().transfer(sender, to, amount)?;
        tracing::info!(from = %sender, to = %to, amount, "qUSD transfer");
        Ok(())
    }

    fn require_authority(&self, sender: &Address, operation: &str) -> LedgerResult<()> {
        if *sender != self.authority {
            events::security(
                "qusd-stablecoin",
                &format!("unauthorized {operation} attempt by {sender}"),
            );
            return Err(LedgerError::NotAuthority);
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

    pub fn bridge_authority(&self) -> &Address {
        &self.authority
    }

    pub fn symbol(&self) -> &'static str {
        "qUSD"
    }

    pub fn name(&self) -> &'static str {
        "Synthetic USDC"
    }

    pub const fn decimals(&self) -> u8 {
        QUSD_DECIMALS
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

    fn admin() -> Address {
        Address::from("ST1ADMIN")
    }

    fn authority() -> Address {
        Address::from("ST3BRIDGE")
    }

    fn user() -> Address {
        Address::from("ST2USER")
    }

    fn token() -> AuthorityMintedStable {
        let token = AuthorityMintedStable::new(admin(), authority());
        token.finalize_launch(&admin()).unwrap();
        token
    }

    // ===== AUTHORITY GATING =====

    #[test]
    fn test_only_authority_mints() {
        let token = token();

        assert_eq!(
            token.mint(&user(), &user(), 100),
            Err(LedgerError::NotAuthority)
        );
        assert_eq!(
            token.mint(&admin(), &user(), 100),
            Err(LedgerError::NotAuthority)
        );
        assert_eq!(token.total_supply(), 0);

        token.mint(&authority(), &user(), 100).unwrap();
        assert_eq!(token.balance_of(&user()), 100);
        assert_eq!(token.total_supply(), 100);
    }

    #[test]
    fn test_only_authority_burns() {
        let token = token();
        token.mint(&authority(), &user(), 100).unwrap();

        assert_eq!(
            token.burn(&user(), &user(), 50),
            Err(LedgerError::NotAuthority)
        );
        assert_eq!(token.balance_of(&user()), 100);

        token.burn(&authority(), &user(), 50).unwrap();
        assert_eq!(token.balance_of(&user()), 50);
        assert_eq!(token.total_supply(), 50);
    }

    #[test]
    fn test_burn_more_than_balance_rejected() {
        let token = token();
        token.mint(&authority(), &user(), 100).unwrap();
        assert_eq!(
            token.burn(&authority(), &user(), 101),
            Err(LedgerError::InsufficientBalance { have: 100, need: 101 })
        );
    }

    // ===== TRANSFER =====

    #[test]
    fn test_user_transfer_unrestricted() {
        let token = token();
        token.mint(&authority(), &user(), 100).unwrap();

        token.transfer(&user(), &admin(), 60).unwrap();
        assert_eq!(token.balance_of(&admin()), 60);
        assert_eq!(token.sum_of_balances(), token.total_supply());
    }

    #[test]
    fn test_transfer_laws() {
        let token = token();
        token.mint(&authority(), &user(), 100).unwrap();

        assert_eq!(token.transfer(&user(), &user(), 10), Err(LedgerError::SelfTransfer));
        assert_eq!(token.transfer(&user(), &admin(), 0), Err(LedgerError::ZeroAmount));
    }

    // ===== LIFECYCLE =====

    #[test]
    fn test_authority_gated_after_key_burn() {
        let token = token();
        token.mint(&authority(), &user(), 100).unwrap();
        token.burn_key(&admin()).unwrap();

        // the authority surface is not admin-gated; it survives the burn
        token.mint(&authority(), &user(), 10).unwrap();
        token.transfer(&user(), &admin(), 10).unwrap();
        assert_eq!(token.total_supply(), 110);
    }

    #[test]
    fn test_metadata() {
        let token = token();
        assert_eq!(token.symbol(), "qUSD");
        assert_eq!(token.name(), "Synthetic USDC");
        assert_eq!(token.decimals(), QUSD_DECIMALS);
        assert_eq!(token.bridge_authority(), &authority());
    }
}
