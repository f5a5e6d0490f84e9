//! Price validity predicates
//!
//! Pure and stateless: the committee owns ordering and state, this module
//! only answers whether a candidate message is plausible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lib_types::config::{MAX_PRICE, MAX_PRICE_DEVIATION_PCT, MAX_TIMESTAMP_SKEW, MIN_PRICE};

use crate::message::PriceMessage;

/// A candidate message failed one of the validity predicates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("price {price} outside [{min}, {max}]")]
    OutOfBounds { price: u64, min: u64, max: u64 },

    #[error("timestamp {timestamp} skewed more than {max_skew}s from local clock {now}")]
    BadSkew { timestamp: u64, now: u64, max_skew: u64 },

    #[error("deviation {deviation_pct}% from previous price {previous} exceeds {max_pct}%")]
    Deviation {
        deviation_pct: u64,
        previous: u64,
        max_pct: u64,
    },
}

/// Predicate bundle over candidate price messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceValidator {
    pub min_price: u64,
    pub max_price: u64,
    pub max_deviation_pct: u64,
    pub max_skew_secs: u64,
}

impl Default for PriceValidator {
    fn default() -> Self {
        PriceValidator {
            min_price: MIN_PRICE,
            max_price: MAX_PRICE,
            max_deviation_pct: MAX_PRICE_DEVIATION_PCT,
            max_skew_secs: MAX_TIMESTAMP_SKEW,
        }
    }
}

impl PriceValidator {
    pub fn bounds_ok(&self, price: u64) -> bool {
        price >= self.min_price && price <= self.max_price
    }

    /// `now == 0` means the clock is unavailable; skew is then not checked.
    pub fn skew_ok(&self, timestamp: u64, now: u64) -> bool {
        if now == 0 {
            return true;
        }
        timestamp.abs_diff(now) <= self.max_skew_secs
    }

    /// Integer-percentage deviation against the previous price. The old
    /// price is the denominator, not a midpoint: 100 -> 150 is 50%, while
    /// 150 -> 100 is 33%. The asymmetry is contractual.
    ///
    /// The intermediate product is widened to `u128` so prices near
    /// `u64::MAX` cannot overflow `|new - old| * 100`.
    pub fn deviation_ok(&self, new_price: u64, old_price: u64) -> bool {
        if old_price == 0 {
            return true;
        }
        let deviation = (new_price.abs_diff(old_price) as u128 * 100) / old_price as u128;
        deviation <= self.max_deviation_pct as u128
    }

    /// Conjunction of the three predicates, surfacing the first failure.
    pub fn validate(
        &self,
        msg: &PriceMessage,
        now: u64,
        previous_price: u64,
    ) -> Result<(), ValidationError> {
        if !self.bounds_ok(msg.price) {
            return Err(ValidationError::OutOfBounds {
                price: msg.price,
                min: self.min_price,
                max: self.max_price,
            });
        }
        if !self.skew_ok(msg.timestamp, now) {
            return Err(ValidationError::BadSkew {
                timestamp: msg.timestamp,
                now,
                max_skew: self.max_skew_secs,
            });
        }
        if !self.deviation_ok(msg.price, previous_price) {
            let deviation_pct =
                ((msg.price.abs_diff(previous_price) as u128 * 100) / previous_price as u128) as u64;
            return Err(ValidationError::Deviation {
                deviation_pct,
                previous: previous_price,
                max_pct: self.max_deviation_pct,
            });
        }
        Ok(())
    }
}
