//! System wiring
//!
//! Components hold shared, immutable references established here at
//! construction; they never reach into each other's internals, only invoke
//! public operations.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use lib_bridge::Bridge;
use lib_crypto::SignatureVerifier;
use lib_governance::GovernanceMultisig;
use lib_ledger::{AuthorityMintedStable, FixedSupplyToken, SyntheticAsset};
use lib_oracle::{OracleCommittee, PriceMessage};
use lib_types::config::NUM_ORACLES;
use lib_types::{events, Address, Clock};

/// Construction parameters for [`OracleSystem`].
pub struct SystemConfig {
    pub deployer: Address,
    /// `(pubkey, address)` per committee seat.
    pub oracle_keys: [(Vec<u8>, Address); NUM_ORACLES],
    pub governance_owners: Vec<Address>,
    pub governance_threshold: u32,
    pub bridge_authority: Address,
}

/// The wired qOracle deployment.
pub struct OracleSystem {
    committee: Arc<OracleCommittee>,
    bkpy: Arc<FixedSupplyToken>,
    qbtc: Arc<SyntheticAsset>,
    qusd: Arc<AuthorityMintedStable>,
    bridge: Arc<Bridge>,
    governance: Arc<GovernanceMultisig>,
}

/// Lifecycle stage of one component, for status reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub initialized: bool,
    pub key_burned: bool,
}

/// Serializable snapshot of the whole deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub committee: ComponentStatus,
    pub bkpy: ComponentStatus,
    pub qbtc: ComponentStatus,
    pub qusd: ComponentStatus,
    pub bridge: ComponentStatus,
    pub governance: ComponentStatus,
    pub emergency_paused: bool,
    pub current_price: PriceMessage,
}

impl OracleSystem {
    /// Construct every component over the shared verifier and clock.
    pub fn new(
        config: SystemConfig,
        verifier: Arc<dyn SignatureVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let SystemConfig {
            deployer,
            oracle_keys,
            governance_owners,
            governance_threshold,
            bridge_authority,
        } = config;

        let committee = Arc::new(OracleCommittee::new(
            deployer.clone(),
            oracle_keys,
            verifier,
            clock.clone(),
        ));
        let bkpy = Arc::new(FixedSupplyToken::new(deployer.clone()));
        let qbtc = Arc::new(SyntheticAsset::new(deployer.clone(), committee.clone()));
        let qusd = Arc::new(AuthorityMintedStable::new(deployer.clone(), bridge_authority));
        let bridge = Arc::new(Bridge::new(
            deployer.clone(),
            committee.clone(),
            qbtc.clone(),
            clock.clone(),
        ));
        let governance = Arc::new(GovernanceMultisig::new(
            deployer,
            governance_owners,
            governance_threshold,
            clock,
        ));

        tracing::info!("qOracle system constructed");
        OracleSystem {
            committee,
            bkpy,
            qbtc,
            qusd,
            bridge,
            governance,
        }
    }

    /// Mint the BKPY genesis supply and finalize every component launch.
    pub fn initialize(&self, admin: &Address) -> Result<()> {
        self.bkpy
            .mint_initial_supply(admin)
            .context("minting initial BKPY supply")?;

        self.committee.finalize_launch(admin)?;
        self.bkpy.finalize_launch(admin)?;
        self.qbtc.finalize_launch(admin)?;
        self.qusd.finalize_launch(admin)?;
        self.bridge.finalize_launch(admin)?;
        self.governance.finalize_launch(admin)?;

        tracing::info!(admin = %admin, "qOracle system initialized");
        Ok(())
    }

    /// Burn every component's admin key. After this returns the system is
    /// irreversibly immutable: no admin-gated call can ever succeed again.
    pub fn burn_admin_keys(&self, admin: &Address) -> Result<()> {
        self.committee.burn_key(admin)?;
        self.bkpy.burn_key(admin)?;
        self.qbtc.burn_key(admin)?;
        self.qusd.burn_key(admin)?;
        self.bridge.burn_key(admin)?;
        self.governance.burn_key(admin)?;

        events::security("qoracle-system", "all admin keys burned - system immutable");
        Ok(())
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            committee: ComponentStatus {
                initialized: self.committee.is_initialized(),
                key_burned: self.committee.is_key_burned(),
            },
            bkpy: ComponentStatus {
                initialized: self.bkpy.is_initialized(),
                key_burned: self.bkpy.is_key_burned(),
            },
            qbtc: ComponentStatus {
                initialized: self.qbtc.is_initialized(),
                key_burned: self.qbtc.is_key_burned(),
            },
            qusd: ComponentStatus {
                initialized: self.qusd.is_initialized(),
                key_burned: self.qusd.is_key_burned(),
            },
            bridge: ComponentStatus {
                initialized: self.bridge.is_initialized(),
                key_burned: self.bridge.is_key_burned(),
            },
            governance: ComponentStatus {
                initialized: self.governance.is_initialized(),
                key_burned: self.governance.is_key_burned(),
            },
            emergency_paused: self.committee.is_emergency_paused(),
            current_price: self.committee.current_price(),
        }
    }

    // ------------------------------------------------------------------
    // Component access
    // ------------------------------------------------------------------

    pub fn committee(&self) -> &Arc<OracleCommittee> {
        &self.committee
    }

    pub fn bkpy(&self) -> &Arc<FixedSupplyToken> {
        &self.bkpy
    }

    pub fn qbtc(&self) -> &Arc<SyntheticAsset> {
        &self.qbtc
    }

    pub fn qusd(&self) -> &Arc<AuthorityMintedStable> {
        &self.qusd
    }

    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    pub fn governance(&self) -> &Arc<GovernanceMultisig> {
        &self.governance
    }
}
