//! UQ112x112 cumulative prices.
//!
//! A price is stored as a 224-bit fixed-point number with 112 fractional
//! bits. Accumulators add `price * seconds_elapsed` and wrap modulo 2^256;
//! timestamps wrap modulo 2^32. Both wraps cancel out when a consumer
//! subtracts two observations with wrapping arithmetic.

use crate::constants::{Q112, TIMESTAMP_PERIOD};
use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::{u256_to_u128, U256};

/// Encode an integer as UQ112x112
pub fn encode_uq112(value: u128) -> U256 {
    U256::new(value) * U256::new(Q112)
}

/// Divide a UQ112x112 by an integer
pub fn uq_div(value: U256, divisor: u128) -> CoreResult<U256> {
    if divisor == 0 {
        return Err(CoreError::DivisionByZero);
    }
    Ok(value / U256::new(divisor))
}

/// Truncate a host timestamp to the 32-bit period pools record
pub fn block_timestamp(now: u64) -> u32 {
    (now % TIMESTAMP_PERIOD) as u32
}

/// Cumulative prices of one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceAccumulator {
    /// Sum of `reserve1 / reserve0` over time
    pub price0_cumulative: U256,
    /// Sum of `reserve0 / reserve1` over time
    pub price1_cumulative: U256,
    pub block_timestamp_last: u32,
}

impl PriceAccumulator {
    /// Fold in the reserves that were in effect since the last update.
    ///
    /// Accumulates only when time moved forward and both reserves are
    /// non-zero; the timestamp is recorded either way. Returns whether the
    /// accumulators changed.
    pub fn update(&mut self, reserve0: u128, reserve1: u128, timestamp: u32) -> CoreResult<bool> {
        let elapsed = timestamp.wrapping_sub(self.block_timestamp_last);
        let accumulate = elapsed > 0 && reserve0 != 0 && reserve1 != 0;

        if accumulate {
            let elapsed = U256::new(elapsed as u128);
            let price0 = uq_div(encode_uq112(reserve1), reserve0)?;
            let price1 = uq_div(encode_uq112(reserve0), reserve1)?;
            self.price0_cumulative = self.price0_cumulative.wrapping_add(price0.wrapping_mul(elapsed));
            self.price1_cumulative = self.price1_cumulative.wrapping_add(price1.wrapping_mul(elapsed));
        }

        self.block_timestamp_last = timestamp;
        Ok(accumulate)
    }
}

/// Average UQ112x112 price between two accumulator observations
pub fn consult(start: U256, end: U256, elapsed: u32) -> CoreResult<U256> {
    if elapsed == 0 {
        return Err(CoreError::DivisionByZero);
    }
    Ok(end.wrapping_sub(start) / U256::new(elapsed as u128))
}

/// Apply a UQ112x112 average price to an amount, truncating the fraction
pub fn apply_average_price(average: U256, amount: u128) -> CoreResult<u128> {
    let scaled = average
        .checked_mul(U256::new(amount))
        .ok_or(CoreError::MathOverflow)?;
    u256_to_u128(scaled / U256::new(Q112))
}
