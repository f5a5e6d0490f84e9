//! Structured event emission
//!
//! Thin helpers over `tracing`. Security-salient failures (lifecycle,
//! quorum, authority) are emitted to the dedicated [`SECURITY_TARGET`] so an
//! embedding subscriber can route them to an audit sink independently of the
//! component's own target. Callers must not hold data locks while emitting.

/// Target carrying security-salient events.
pub const SECURITY_TARGET: &str = "qoracle::security";

/// Emit a security event for `component`.
pub fn security(component: &str, message: &str) {
    tracing::warn!(target: "qoracle::security", component, message);
}
