//! qOracle price committee
//!
//! A fixed committee of [`NUM_ORACLES`](lib_types::config::NUM_ORACLES)
//! signers is the sole source of price authority. A price update mutates
//! the canonical price only when a quorum of distinct active signers
//! produced verifier-valid signatures over the exact canonical serialization
//! of its message, and the message survives the validity predicates
//! (bounds, clock skew, deviation, strict timestamp monotonicity).
//!
//! Repeated rejected submissions trip an automatic emergency pause.

pub mod committee;
pub mod errors;
pub mod message;
pub mod validator;

pub use committee::{CommitteeSnapshot, OracleCommittee, OracleIdentity, OraclePerformance};
pub use errors::{OracleError, OracleResult};
pub use message::{OracleSignature, PriceMessage, PriceUpdate};
pub use validator::{PriceValidator, ValidationError};
