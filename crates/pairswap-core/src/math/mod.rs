//! # Mathematical Functions
//!
//! Pure integer math for constant-product pools.

pub mod big_int;
pub mod safe_math;
pub mod swap_math;

// Re-export commonly used functions
pub use big_int::*;
pub use safe_math::*;
pub use swap_math::*;
