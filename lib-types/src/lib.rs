//! qOracle shared types
//!
//! Pure data types and cross-cutting disciplines used by every component
//! crate: account addresses, the wall-clock seam, compile-time configuration
//! constants, structured event emission, and the launch lifecycle guard that
//! every mutable component embeds.
//!
//! Nothing in this crate performs I/O beyond `tracing` event emission.

pub mod address;
pub mod clock;
pub mod config;
pub mod events;
pub mod lifecycle;

pub use address::{Address, BURNED_ADMIN_SENTINEL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use lifecycle::{LifecycleError, LifecycleGuard, LifecycleStage};
