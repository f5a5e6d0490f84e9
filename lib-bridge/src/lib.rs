//! qOracle cross-asset bridge
//!
//! Swaps STX against qBTC at the committee price carried in the bundled
//! update, with a minimum swap size, dust rejection, and a rolling 24-hour
//! volume ceiling. A swap composes oracle acceptance, synthetic mint or
//! burn, and bridge bookkeeping; every fallible guard runs before the first
//! mutation so a rejected swap leaves all three sub-states untouched.

pub mod bridge;
pub mod errors;

pub use bridge::Bridge;
pub use errors::{BridgeError, BridgeResult};
