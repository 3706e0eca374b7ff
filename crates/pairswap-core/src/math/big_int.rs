//! Big integer operations for high-precision math
//!
//! Products of two reserves need up to 224 bits, so every multiply-then-divide
//! in the exchange goes through a 256-bit intermediate.

use crate::errors::{CoreError, CoreResult};

pub use ethnum::U256;

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// Narrow a U256 back to u128
pub fn u256_to_u128(value: U256) -> CoreResult<u128> {
    if value > U256::new(u128::MAX) {
        return Err(CoreError::MathOverflow);
    }
    Ok(value.as_u128())
}

/// Checked 256-bit multiply
pub fn checked_mul_u256(a: U256, b: U256) -> CoreResult<U256> {
    a.checked_mul(b).ok_or(CoreError::MathOverflow)
}

/// Checked 256-bit add
pub fn checked_add_u256(a: U256, b: U256) -> CoreResult<U256> {
    a.checked_add(b).ok_or(CoreError::MathOverflow)
}

/// Checked 256-bit subtract
pub fn checked_sub_u256(a: U256, b: U256) -> CoreResult<U256> {
    a.checked_sub(b).ok_or(CoreError::MathUnderflow)
}

/// Compute `a * b / denominator` with a 256-bit intermediate
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(CoreError::DivisionByZero);
    }

    let product = U256::new(a) * U256::new(b);
    let denominator = U256::new(denominator);
    let mut quotient = product / denominator;

    if rounding == Rounding::Up && product % denominator != U256::ZERO {
        quotient = checked_add_u256(quotient, U256::ONE)?;
    }

    u256_to_u128(quotient)
}
