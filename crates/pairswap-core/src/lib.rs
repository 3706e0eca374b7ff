//! # PairSwap Core - Shared Exchange Logic
//!
//! This crate contains the core types and mathematical logic shared between
//! the exchange program and the asset collaborators it talks to. It provides:
//!
//! - Identity and event types
//! - Constant-product swap formulas and integer square root
//! - UQ112x112 cumulative price accumulators
//! - Constants and configuration values
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain use

// Re-export all modules
pub mod constants;
pub mod errors;
pub mod math;
pub mod oracle;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreError, CoreResult};
pub use types::*;
