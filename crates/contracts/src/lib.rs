//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Delivery Model
//! - A position source announces *which* fields changed; consumers read a full
//!   snapshot and apply only the announced fields
//! - Callbacks receive owned copies of the position fix, never shared references

mod error;
mod fault;
mod field;
mod fix;
mod options;
mod profile;
mod source;

pub use error::*;
pub use fault::*;
pub use field::*;
pub use fix::*;
pub use options::*;
pub use profile::*;
pub use source::*;
