//! Signed price messages
//!
//! [`PriceMessage`] is the canonical object the committee signs;
//! [`PriceUpdate`] is the envelope carrying it together with the
//! committee's signatures. Serialization is deterministic and unambiguous:
//! fixed-width big-endian integers followed by the raw asset bytes, with
//! the asset identifier bounded and whitespace-free because it carries no
//! length prefix.

use serde::{Deserialize, Serialize};

use lib_crypto::hash_sha256;
use lib_types::config::MAX_ASSET_LEN;

/// The canonical price object the committee signs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMessage {
    /// Fixed-point price.
    pub price: u64,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    /// Price precision.
    pub decimals: u8,
    /// Anti-replay nonce.
    pub nonce: u64,
    /// Asset identifier, e.g. "BTC".
    pub asset: String,
}

impl PriceMessage {
    pub fn new(price: u64, timestamp: u64, decimals: u8, nonce: u64, asset: impl Into<String>) -> Self {
        PriceMessage {
            price,
            timestamp,
            decimals,
            nonce,
            asset: asset.into(),
        }
    }

    /// Canonical wire serialization: big-endian
    /// `price(8) || timestamp(8) || decimals(1) || nonce(8)` followed by the
    /// raw asset bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + 8 + 1 + 8 + self.asset.len());
        data.extend_from_slice(&self.price.to_be_bytes());
        data.extend_from_slice(&self.timestamp.to_be_bytes());
        data.push(self.decimals);
        data.extend_from_slice(&self.nonce.to_be_bytes());
        data.extend_from_slice(self.asset.as_bytes());
        data
    }

    /// SHA-256 signing digest of the canonical serialization.
    pub fn digest(&self) -> [u8; 32] {
        hash_sha256(&self.serialize())
    }

    /// Whether the asset identifier is unambiguous under the unprefixed
    /// serialization: non-empty, at most [`MAX_ASSET_LEN`] bytes, no edge
    /// whitespace.
    pub fn asset_is_well_formed(&self) -> bool {
        !self.asset.is_empty()
            && self.asset.len() <= MAX_ASSET_LEN
            && self.asset.trim() == self.asset
    }
}

/// A single oracle's signature over a price message digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSignature {
    /// Index of the signing oracle; selects the verifying public key.
    pub oracle_index: usize,
    pub signature: Vec<u8>,
    pub timestamp: u64,
}

/// A price message plus the committee signatures vouching for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub message: PriceMessage,
    pub signatures: Vec<OracleSignature>,
}

impl PriceUpdate {
    pub fn new(message: PriceMessage) -> Self {
        PriceUpdate {
            message,
            signatures: Vec::new(),
        }
    }

    pub fn add_signature(&mut self, oracle_index: usize, signature: Vec<u8>) {
        let timestamp = self.message.timestamp;
        self.signatures.push(OracleSignature {
            oracle_index,
            signature,
            timestamp,
        });
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }
}
