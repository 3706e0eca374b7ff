//! # Core Types
//!
//! Identity and event types shared across crates.

pub mod address;
pub mod events;

pub use address::Address;
pub use events::{Event, EventKind};
