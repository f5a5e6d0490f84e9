//! Account addresses
//!
//! Addresses are opaque identifiers here; key derivation and address
//! encoding belong to the embedding chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel installed as the admin identity once the key is burned.
///
/// After the burn no real account can ever match the stored admin again.
pub const BURNED_ADMIN_SENTINEL: &str = "0x000000000000000000000000000000000000dead";

/// An account address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    /// The post-burn admin sentinel.
    pub fn burned_sentinel() -> Self {
        Address(BURNED_ADMIN_SENTINEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Address(s)
    }
}
