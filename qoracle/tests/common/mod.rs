//! Shared fixtures for the integration suites.
#![allow(dead_code)] // each suite uses a different subset of the helpers

use std::sync::Arc;

use lib_crypto::testing::StubVerifier;
use lib_crypto::SignatureVerifier;
use lib_types::{Clock, ManualClock};
use qoracle::{Address, OracleSystem, PriceMessage, PriceUpdate, SystemConfig};

pub const NOW: u64 = 1_700_000_000;

/// 1.0 in 15-decimal fixed point.
pub const UNIT_PRICE: u64 = 1_000_000_000_000_000;

pub fn admin() -> Address {
    Address::from("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5")
}

pub fn user() -> Address {
    Address::from("ST2USER")
}

pub fn bridge_authority() -> Address {
    Address::from("ST3BRIDGEAUTH")
}

pub fn oracle_pubkey(index: usize) -> Vec<u8> {
    vec![index as u8 + 1; 32]
}

pub fn governance_owner(index: usize) -> Address {
    Address::from(format!("ST{}GOVOWNER", index + 1))
}

pub struct TestSystem {
    pub system: OracleSystem,
    pub verifier: Arc<StubVerifier>,
    pub clock: Arc<ManualClock>,
}

impl TestSystem {
    /// Quorum-signed update over `message`: `valid` indices carry
    /// registered signatures, `invalid` indices carry garbage.
    pub fn signed_update(&self, message: PriceMessage, valid: &[usize], invalid: &[usize]) -> PriceUpdate {
        let digest = message.digest();
        let mut update = PriceUpdate::new(message);
        for &i in valid {
            let sig = format!("sig-{i}-{:x?}", &digest[..4]).into_bytes();
            self.verifier.allow(&oracle_pubkey(i), &digest, &sig);
            update.add_signature(i, sig);
        }
        for &i in invalid {
            update.add_signature(i, format!("bad-{i}").into_bytes());
        }
        update
    }
}

/// Route component tracing through the test harness when `RUST_LOG` asks
/// for it. Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fully initialized deployment over the stub verifier and a manual
/// clock pinned at [`NOW`].
pub fn deployed_system(governance_owners: usize, governance_threshold: u32) -> TestSystem {
    init_tracing();
    let verifier = Arc::new(StubVerifier::new());
    let clock = Arc::new(ManualClock::new(NOW));

    let config = SystemConfig {
        deployer: admin(),
        oracle_keys: std::array::from_fn(|i| {
            (oracle_pubkey(i), Address::from(format!("ST{}ORACLE", i + 1)))
        }),
        governance_owners: (0..governance_owners).map(governance_owner).collect(),
        governance_threshold,
        bridge_authority: bridge_authority(),
    };

    let system = OracleSystem::new(
        config,
        verifier.clone() as Arc<dyn SignatureVerifier>,
        clock.clone() as Arc<dyn Clock>,
    );
    system.initialize(&admin()).unwrap();

    TestSystem {
        system,
        verifier,
        clock,
    }
}

pub fn price_message(price: u64, timestamp: u64, nonce: u64) -> PriceMessage {
    PriceMessage::new(price, timestamp, 15, nonce, "BTC")
}
