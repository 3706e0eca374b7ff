//! # Oracle Module
//!
//! Time-weighted price accumulators maintained by every pool. External
//! consumers sample the cumulative prices at two instants and divide the
//! difference by the elapsed time to get an average.

pub mod cumulative;

pub use cumulative::*;
