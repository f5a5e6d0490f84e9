//! Compile-time configuration for the qOracle core
//!
//! All tunables are constants; there is no runtime configuration surface.
//! Amounts are `u64` base units; times are Unix seconds.

// ---------------------------------------------------------------------------
// Oracle committee
// ---------------------------------------------------------------------------

/// Size of the oracle committee. Identities are fixed at construction.
pub const NUM_ORACLES: usize = 7;

/// Distinct active signers required for a price update to be accepted.
pub const QUORUM_THRESHOLD: usize = 4;

/// Accepted price messages retained in the history ring.
pub const PRICE_HISTORY_CAPACITY: usize = 1024;

/// Consecutive rejected submissions before the committee auto-pauses.
pub const EMERGENCY_PAUSE_THRESHOLD: u64 = 3;

// ---------------------------------------------------------------------------
// Price validation
// ---------------------------------------------------------------------------

pub const MIN_PRICE: u64 = 1;
pub const MAX_PRICE: u64 = 100_000_000_000_000_000; // 10^17

/// Maximum allowed distance between a message timestamp and the local clock.
pub const MAX_TIMESTAMP_SKEW: u64 = 600; // 10 minutes

/// Maximum integer-percentage move against the previously accepted price.
pub const MAX_PRICE_DEVIATION_PCT: u64 = 50;

/// Longest allowed identifier in a price message. The canonical
/// serialization carries the asset unprefixed, so the committee bounds it.
pub const MAX_ASSET_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// BKPY genesis supply: 100,000 whole tokens at 12 decimals.
///
/// The supply must inhabit a `u64` balance cell; 100,000 tokens at 15
/// decimals would not, so the 12-decimal denomination is the canonical one.
pub const BKPY_TOTAL_SUPPLY: u64 = 100_000_000_000_000_000; // 10^17
pub const BKPY_DECIMALS: u8 = 12;

/// qBTC headline supply cap: 21M BTC in satoshis.
pub const QBTC_TOTAL_SUPPLY: u64 = 2_100_000_000_000_000;
pub const QBTC_DECIMALS: u8 = 8;

pub const QUSD_DECIMALS: u8 = 15;
pub const QUSD_DECIMAL_MULTIPLIER: u64 = 1_000_000_000_000_000; // 10^15

/// Maximum age of a bundled price update at synthetic-mint credit time,
/// measured against the committee's current accepted timestamp.
pub const PRICE_UPDATE_TIMEOUT: u64 = 300; // 5 minutes

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

pub const MIN_SWAP_AMOUNT: u64 = 1000;
pub const MAX_DAILY_VOLUME: u64 = 1_000_000_000_000_000; // 10^15

/// Rolling window after which the bridge volume counter resets.
pub const VOLUME_WINDOW_SECS: u64 = 86_400; // 24 hours

// ---------------------------------------------------------------------------
// Governance
// ---------------------------------------------------------------------------

/// Minimum wall-clock delay between proposal creation and execution.
pub const EXECUTION_DELAY_SECS: u64 = 86_400; // 24 hours

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quorum_is_reachable() {
        assert!(QUORUM_THRESHOLD <= NUM_ORACLES);
        assert!(QUORUM_THRESHOLD > NUM_ORACLES / 2);
    }

    #[test]
    fn test_decimal_multiplier_matches_decimals() {
        assert_eq!(QUSD_DECIMAL_MULTIPLIER, 10u64.pow(QUSD_DECIMALS as u32));
    }

    #[test]
    fn test_bkpy_supply_is_whole_tokens() {
        // 100,000 whole tokens at the BKPY denomination
        assert_eq!(BKPY_TOTAL_SUPPLY, 100_000 * 10u64.pow(BKPY_DECIMALS as u32));
    }

    #[test]
    fn test_price_bounds_ordered() {
        assert!(MIN_PRICE < MAX_PRICE);
    }
}
