//! # Bridge
//!
//! The position bridge: exposes a [`contracts::PositionSource`] through two
//! consumer-facing callback styles.
//!
//! - One-shot: `get_current_position` resolves exactly once, on the next
//!   change notification
//! - Watch: `watch_position` delivers once per change notification until
//!   `clear_watch`
//!
//! Raw source values are normalized into a fixed-precision
//! [`contracts::PositionFix`] before delivery.

mod adapter;
mod metrics;
mod rounding;

pub use adapter::PositionBridge;
pub use metrics::{BridgeMetrics, BridgeMetricsSnapshot};
