//! Signing digests
//!
//! SHA-256 is the canonical digest for committee-signed price messages.
//! Every signature in the system is produced and verified over the 32-byte
//! digest of the message's canonical serialization, never over the raw
//! serialization itself.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`.
pub fn hash_sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 over multiple segments, equivalent to hashing their
/// concatenation.
pub fn hash_sha256_multiple(segments: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for segment in segments {
        hasher.update(segment);
    }
    hasher.finalize().into()
}
