//! qOracle cryptography
//!
//! Two concerns live here: the SHA-256 signing digest used over canonical
//! price-message serializations, and the pluggable signature verification
//! capability. Production binds the capability to CRYSTALS-Dilithium level
//! 3; the test suite binds it to a deterministic fixture-table stub.

pub mod digest;
pub mod testing;
pub mod verifier;

pub use digest::{hash_sha256, hash_sha256_multiple};
pub use verifier::{
    dilithium3_keypair, dilithium3_sign, Dilithium3Verifier, SignatureVerifier,
    DILITHIUM3_PUBLICKEY_BYTES, DILITHIUM3_SIGNATURE_BYTES,
};
