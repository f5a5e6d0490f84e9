//! qOracle - Unified Quantum-Resistant Oracle & Synthetic Asset Ecosystem
//!
//! Wires the component crates into one deployable system:
//!
//! - Oracle committee (k-of-N post-quantum signature quorum)
//! - BKPY fixed-supply token
//! - qBTC synthetic token (oracle-gated mint)
//! - qUSD stablecoin (bridge-authority mint/burn)
//! - Cross-asset swap bridge with a daily volume ceiling
//! - Delayed multi-signature governance
//!
//! Construction wires shared references; `initialize` mints the genesis
//! supply and finalizes every launch; `burn_admin_keys` makes the whole
//! system irreversibly immutable.

pub mod system;

pub use system::{ComponentStatus, OracleSystem, SystemConfig, SystemStatus};

pub use lib_bridge::{Bridge, BridgeError};
pub use lib_crypto::{Dilithium3Verifier, SignatureVerifier};
pub use lib_governance::{GovernanceError, GovernanceMultisig, ProposalAction};
pub use lib_ledger::{AuthorityMintedStable, FixedSupplyToken, LedgerError, SyntheticAsset};
pub use lib_oracle::{OracleCommittee, OracleError, PriceMessage, PriceUpdate};
pub use lib_types::{Address, Clock, LifecycleError, SystemClock};
