//! qOracle token ledgers
//!
//! Three account-balance ledgers with different supply disciplines:
//!
//! - [`FixedSupplyToken`] (BKPY): one-shot genesis mint of a constant total
//!   supply, transfer/burn thereafter
//! - [`SyntheticAsset`] (qBTC): mint gated on a fresh committee-accepted
//!   price, running supply tracker, headline supply cap
//! - [`AuthorityMintedStable`] (qUSD): only the declared bridge authority
//!   mints and burns; users transfer freely
//!
//! Every ledger embeds a lifecycle guard and maintains the supply
//! invariant: the sum of balances always equals the tracked supply (for
//! BKPY, the genesis constant minus the burned total).

pub mod balances;
pub mod errors;
pub mod fixed_supply;
pub mod stablecoin;
pub mod synthetic;

pub use errors::{LedgerError, LedgerResult};
pub use fixed_supply::FixedSupplyToken;
pub use stablecoin::AuthorityMintedStable;
pub use synthetic::SyntheticAsset;
