//! Signature verification capability
//!
//! The committee treats signature verification as an abstract predicate
//! `(pubkey, message, signature) -> bool` so the production Dilithium3
//! binding and the deterministic test stub are interchangeable. Nothing
//! above this trait may assume a concrete scheme.

use anyhow::Result;
use pqcrypto_dilithium::dilithium3;
use pqcrypto_traits::sign::{DetachedSignature, PublicKey as SignPublicKey, SecretKey as SignSecretKey};

/// Dilithium3 public key size in bytes.
pub const DILITHIUM3_PUBLICKEY_BYTES: usize = 1952;

/// Dilithium3 detached signature size in bytes.
pub const DILITHIUM3_SIGNATURE_BYTES: usize = 3293;

/// Black-box signature predicate.
///
/// Implementations return `false` for malformed keys or signatures rather
/// than erroring; a verification failure and an unparseable input are the
/// same outcome to the quorum count.
pub trait SignatureVerifier: Send + Sync {
    /// True iff `signature` is a valid signature by `pubkey` over `message`.
    fn verify(&self, pubkey: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// Production binding to CRYSTALS-Dilithium level 3 (detached signatures).
#[derive(Debug, Default, Clone, Copy)]
pub struct Dilithium3Verifier;

impl SignatureVerifier for Dilithium3Verifier {
    fn verify(&self, pubkey: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let pk = match dilithium3::PublicKey::from_bytes(pubkey) {
            Ok(pk) => pk,
            Err(_) => return false,
        };
        let sig = match dilithium3::DetachedSignature::from_bytes(signature) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        dilithium3::verify_detached_signature(&sig, message, &pk).is_ok()
    }
}

/// Generate a Dilithium3 keypair.
///
/// For fixtures and operator tooling; the core never generates keys.
pub fn dilithium3_keypair() -> (Vec<u8>, Vec<u8>) {
    let (pk, sk) = dilithium3::keypair();
    (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
}

/// Produce a detached Dilithium3 signature over `message`.
pub fn dilithium3_sign(message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
    let sk = dilithium3::SecretKey::from_bytes(secret_key)
        .map_err(|_| anyhow::anyhow!("invalid Dilithium3 secret key"))?;

    let signature = dilithium3::detached_sign(message, &sk);
    Ok(signature.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilithium3_key_and_signature_sizes() {
        let (pk, sk) = dilithium3_keypair();
        assert_eq!(pk.len(), DILITHIUM3_PUBLICKEY_BYTES);

        let signature = dilithium3_sign(b"sizing probe", &sk).expect("signing should succeed");
        assert_eq!(signature.len(), DILITHIUM3_SIGNATURE_BYTES);
    }

    #[test]
    fn test_dilithium3_sign_verify_roundtrip() {
        let (pk, sk) = dilithium3_keypair();
        let message = b"price digest stand-in";

        let signature = dilithium3_sign(message, &sk).expect("signing should succeed");
        assert!(Dilithium3Verifier.verify(&pk, message, &signature));
    }

    #[test]
    fn test_dilithium3_wrong_message_fails() {
        let (pk, sk) = dilithium3_keypair();
        let signature = dilithium3_sign(b"original message", &sk).expect("signing should succeed");

        assert!(!Dilithium3Verifier.verify(&pk, b"tampered message", &signature));
    }

    #[test]
    fn test_dilithium3_wrong_key_fails() {
        let (_, sk) = dilithium3_keypair();
        let (other_pk, _) = dilithium3_keypair();
        let signature = dilithium3_sign(b"message", &sk).expect("signing should succeed");

        assert!(!Dilithium3Verifier.verify(&other_pk, b"message", &signature));
    }

    #[test]
    fn test_malformed_inputs_verify_false_not_panic() {
        assert!(!Dilithium3Verifier.verify(&[0u8; 10], b"message", &[0u8; 10]));
        assert!(!Dilithium3Verifier.verify(&[], b"message", &[]));
    }

    #[test]
    fn test_sign_rejects_bad_secret_key() {
        let result = dilithium3_sign(b"message", &[0u8; 17]);
        assert!(result.is_err());
    }
}
