//! # Sources
//!
//! Concrete `PositionSource` implementations.
//!
//! - [`SharedPositionStore`]: mutex-guarded staging area for tracked values
//! - [`MockPositionSource`]: synthetic generator for development and demos
//! - [`ReplayPositionSource`]: JSONL recording playback
//! - [`ManualPositionSource`]: hand-driven source for tests and external feeds

mod manual;
mod mock;
mod replay;
mod store;

pub use manual::ManualPositionSource;
pub use mock::{MockPositionSource, MockSourceConfig};
pub use replay::{ReplayConfig, ReplayPositionSource};
pub use store::SharedPositionStore;
