//! Deterministic verifier stub for tests
//!
//! A fixture-table verifier: a `(pubkey, message, signature)` triple
//! verifies iff it was registered with [`StubVerifier::allow`]. Tests drive
//! exact quorum shapes with it - which oracle indices produced valid
//! signatures, which produced garbage - without touching real
//! lattice cryptography.

use parking_lot::RwLock;
use std::collections::HashSet;

use crate::verifier::SignatureVerifier;

/// Fixture-table stand-in for the production verifier.
#[derive(Debug, Default)]
pub struct StubVerifier {
    valid: RwLock<HashSet<(Vec<u8>, Vec<u8>, Vec<u8>)>>,
}

impl StubVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a triple as valid. Everything unregistered verifies false.
    pub fn allow(&self, pubkey: &[u8], message: &[u8], signature: &[u8]) {
        self.valid
            .write()
            .insert((pubkey.to_vec(), message.to_vec(), signature.to_vec()));
    }

    /// Drop a previously registered triple.
    pub fn revoke(&self, pubkey: &[u8], message: &[u8], signature: &[u8]) {
        self.valid
            .write()
            .remove(&(pubkey.to_vec(), message.to_vec(), signature.to_vec()));
    }
}

impl SignatureVerifier for StubVerifier {
    fn verify(&self, pubkey: &[u8], message: &[u8], signature: &[u8]) -> bool {
        self.valid
            .read()
            .contains(&(pubkey.to_vec(), message.to_vec(), signature.to_vec()))
    }
}
