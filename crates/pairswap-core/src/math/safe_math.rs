//! # Safe Math Operations
//!
//! Overflow-checked arithmetic used by pool and router accounting.

use crate::constants::MAX_RESERVE;
use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::U256;

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Checked arithmetic returning a core error instead of wrapping
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };
}

safe_arith!(safe_add_u128, u128, checked_add, CoreError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, CoreError::MathUnderflow);

/// Check that a balance fits into 112-bit reserve storage
pub fn ensure_reserve_bounds(value: u128) -> CoreResult<u128> {
    if value > MAX_RESERVE {
        return Err(CoreError::MathOverflow);
    }
    Ok(value)
}

/// Babylonian integer square root, rounding down.
///
/// The iteration is fixed so results are bit-for-bit reproducible:
/// for `y > 3` start at `z = y, x = y / 2 + 1` and step `x = (y / x + x) / 2`
/// while `x < z`; `1..=3` map to 1 and zero maps to zero.
pub fn sqrt_u256(y: U256) -> U256 {
    let two = U256::new(2);
    if y > U256::new(3) {
        let mut z = y;
        let mut x = y / two + U256::ONE;
        while x < z {
            z = x;
            x = (y / x + x) / two;
        }
        z
    } else if y != U256::ZERO {
        U256::ONE
    } else {
        U256::ZERO
    }
}

/// Square root of `a * b` computed without intermediate overflow
pub fn sqrt_product(a: u128, b: u128) -> CoreResult<u128> {
    let product = U256::new(a) * U256::new(b);
    crate::math::big_int::u256_to_u128(sqrt_u256(product))
}
