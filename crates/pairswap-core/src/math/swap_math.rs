//! # Constant-Product Swap Math
//!
//! Pricing formulas for `x * y = k` pools with a proportional input fee,
//! plus the path walkers routers use to price multi-hop trades.

use crate::constants::{DEFAULT_FEE_DENOMINATOR, DEFAULT_FEE_NUMERATOR, MAX_FEE_DENOMINATOR};
use crate::errors::{CoreError, CoreResult};
use crate::math::big_int::{checked_add_u256, checked_mul_u256, mul_div, u256_to_u128, Rounding, U256};
use crate::math::safe_math::safe_add_u128;
use crate::types::Address;

// ============================================================================
// Fee Rate
// ============================================================================

/// Fraction of every input amount withheld by the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate {
    pub numerator: u128,
    pub denominator: u128,
}

impl FeeRate {
    /// 3/1000
    pub const DEFAULT: FeeRate = FeeRate {
        numerator: DEFAULT_FEE_NUMERATOR,
        denominator: DEFAULT_FEE_DENOMINATOR,
    };

    pub fn new(numerator: u128, denominator: u128) -> CoreResult<Self> {
        let fee = Self { numerator, denominator };
        fee.validate()?;
        Ok(fee)
    }

    /// A fee must keep some of the input, `0 <= numerator < denominator`,
    /// and the denominator is capped at [`MAX_FEE_DENOMINATOR`]
    pub fn validate(&self) -> CoreResult<()> {
        if self.denominator == 0
            || self.denominator > MAX_FEE_DENOMINATOR
            || self.numerator >= self.denominator
        {
            return Err(CoreError::InvalidFee {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }

    /// Share of the input that counts toward the trade (997 for 3/1000)
    pub fn retained(&self) -> u128 {
        self.denominator - self.numerator
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Canonical ordering of an asset pair
pub fn sort_assets(asset_a: Address, asset_b: Address) -> CoreResult<(Address, Address)> {
    if asset_a == asset_b {
        return Err(CoreError::IdenticalAssets);
    }
    let (asset0, asset1) = if asset_a < asset_b {
        (asset_a, asset_b)
    } else {
        (asset_b, asset_a)
    };
    if asset0.is_zero() {
        return Err(CoreError::ZeroAsset);
    }
    Ok((asset0, asset1))
}

// ============================================================================
// Single Hop
// ============================================================================

/// Amount of B worth `amount_a` of A at the current reserve ratio
pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> CoreResult<u128> {
    if amount_a == 0 {
        return Err(CoreError::InsufficientAmount);
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(CoreError::InsufficientLiquidity);
    }
    mul_div(amount_a, reserve_b, reserve_a, Rounding::Down)
}

/// Maximum output for an exact input after the fee is withheld
pub fn get_amount_out(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee: FeeRate,
) -> CoreResult<u128> {
    if amount_in == 0 {
        return Err(CoreError::InsufficientInputAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(CoreError::InsufficientLiquidity);
    }

    let amount_in_with_fee = checked_mul_u256(U256::new(amount_in), U256::new(fee.retained()))?;
    let numerator = checked_mul_u256(amount_in_with_fee, U256::new(reserve_out))?;
    let denominator = checked_add_u256(
        checked_mul_u256(U256::new(reserve_in), U256::new(fee.denominator))?,
        amount_in_with_fee,
    )?;

    u256_to_u128(numerator / denominator)
}

/// Minimum input for an exact output; rounds up by one so the pool always
/// receives at least the fee-bearing amount
pub fn get_amount_in(
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee: FeeRate,
) -> CoreResult<u128> {
    if amount_out == 0 {
        return Err(CoreError::InsufficientOutputAmount);
    }
    if reserve_in == 0 || reserve_out == 0 || amount_out >= reserve_out {
        return Err(CoreError::InsufficientLiquidity);
    }

    let numerator = checked_mul_u256(
        checked_mul_u256(U256::new(reserve_in), U256::new(amount_out))?,
        U256::new(fee.denominator),
    )?;
    let denominator = checked_mul_u256(U256::new(reserve_out - amount_out), U256::new(fee.retained()))?;

    let amount_in = u256_to_u128(numerator / denominator)?;
    safe_add_u128(amount_in, 1)
}

// ============================================================================
// Paths
// ============================================================================

fn ensure_path(path: &[Address]) -> CoreResult<()> {
    if path.len() < 2 {
        return Err(CoreError::InvalidPath("path needs at least two assets"));
    }
    Ok(())
}

/// Amounts along `path` for an exact input.
///
/// `reserves(input, output)` returns the pool reserves ordered as the hop is
/// traded, i.e. `(reserve_in, reserve_out)`.
pub fn get_amounts_out<F>(
    amount_in: u128,
    path: &[Address],
    fee: FeeRate,
    mut reserves: F,
) -> CoreResult<Vec<u128>>
where
    F: FnMut(Address, Address) -> CoreResult<(u128, u128)>,
{
    ensure_path(path)?;

    let mut amounts = Vec::with_capacity(path.len());
    amounts.push(amount_in);
    for (i, hop) in path.windows(2).enumerate() {
        let (reserve_in, reserve_out) = reserves(hop[0], hop[1])?;
        amounts.push(get_amount_out(amounts[i], reserve_in, reserve_out, fee)?);
    }
    Ok(amounts)
}

/// Amounts along `path` for an exact output, walked back from the last hop
pub fn get_amounts_in<F>(
    amount_out: u128,
    path: &[Address],
    fee: FeeRate,
    mut reserves: F,
) -> CoreResult<Vec<u128>>
where
    F: FnMut(Address, Address) -> CoreResult<(u128, u128)>,
{
    ensure_path(path)?;

    let mut amounts = vec![0u128; path.len()];
    let last = path.len() - 1;
    amounts[last] = amount_out;
    for i in (1..path.len()).rev() {
        let (reserve_in, reserve_out) = reserves(path[i - 1], path[i])?;
        amounts[i - 1] = get_amount_in(amounts[i], reserve_in, reserve_out, fee)?;
    }
    Ok(amounts)
}
