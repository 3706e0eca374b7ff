//! Adds liquidity to a pair, creating the pool on first deposit. Amounts are
//! trimmed to the pool's current ratio so the depositor never donates the
//! excess side, and each side is checked against its minimum.

use pairswap_core::Address;
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};
use crate::router::Router;
use crate::runtime::Runtime;

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityParams {
    pub asset_a: Address,
    pub asset_b: Address,
    pub amount_a_desired: u128,
    pub amount_b_desired: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
    pub to: Address,
    pub deadline: u64,
}

/// The native side is the attached value, `amount_native_desired`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityNativeParams {
    pub token: Address,
    pub amount_token_desired: u128,
    pub amount_native_desired: u128,
    pub amount_token_min: u128,
    pub amount_native_min: u128,
    pub to: Address,
    pub deadline: u64,
}

// ============================================================================
// Handler Functions
// ============================================================================

impl Router {
    /// Returns `(amount_a, amount_b, liquidity)`
    pub fn add_liquidity(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: AddLiquidityParams,
    ) -> ExchangeResult<(u128, u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let (amount_a, amount_b) = Self::liquidity_amounts(
                rt,
                params.asset_a,
                params.asset_b,
                params.amount_a_desired,
                params.amount_b_desired,
                params.amount_a_min,
                params.amount_b_min,
            )?;

            let pool = Self::pool_for(rt, params.asset_a, params.asset_b)?;
            let ledger = rt.ledger_mut();
            ledger.transfer_from(&params.asset_a, self.address(), caller, pool, amount_a)?;
            ledger.transfer_from(&params.asset_b, self.address(), caller, pool, amount_b)?;
            let liquidity = rt.pool_mint(pool, self.address(), params.to)?;

            debug!(%pool, amount_a, amount_b, liquidity, "added liquidity");
            Ok((amount_a, amount_b, liquidity))
        })
    }

    /// Returns `(amount_token, amount_native, liquidity)`. Native coin not
    /// needed at the pool's ratio goes back to the caller.
    pub fn add_liquidity_native(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: AddLiquidityNativeParams,
    ) -> ExchangeResult<(u128, u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.receive_native(rt, caller, params.amount_native_desired)?;

            let wrapped = self.wrapped_native();
            let (amount_token, amount_native) = Self::liquidity_amounts(
                rt,
                params.token,
                wrapped,
                params.amount_token_desired,
                params.amount_native_desired,
                params.amount_token_min,
                params.amount_native_min,
            )?;

            let pool = Self::pool_for(rt, params.token, wrapped)?;
            rt.ledger_mut()
                .transfer_from(&params.token, self.address(), caller, pool, amount_token)?;
            self.wrap_into(rt, pool, amount_native)?;
            let liquidity = rt.pool_mint(pool, self.address(), params.to)?;
            self.refund_native(rt, caller)?;

            debug!(%pool, amount_token, amount_native, liquidity, "added native liquidity");
            Ok((amount_token, amount_native, liquidity))
        })
    }

    /// Deposit amounts at the pool's current ratio, creating the pool if needed
    #[allow(clippy::too_many_arguments)]
    fn liquidity_amounts(
        rt: &mut Runtime,
        asset_a: Address,
        asset_b: Address,
        amount_a_desired: u128,
        amount_b_desired: u128,
        amount_a_min: u128,
        amount_b_min: u128,
    ) -> ExchangeResult<(u128, u128)> {
        rt.get_or_create_pool_in_place(asset_a, asset_b)?;
        let (reserve_a, reserve_b) = rt.registry().reserves(asset_a, asset_b)?;
        if reserve_a == 0 && reserve_b == 0 {
            return Ok((amount_a_desired, amount_b_desired));
        }

        let amount_b_optimal = Self::quote(amount_a_desired, reserve_a, reserve_b)?;
        if amount_b_optimal <= amount_b_desired {
            if amount_b_optimal < amount_b_min {
                return Err(ExchangeError::InsufficientBAmount);
            }
            return Ok((amount_a_desired, amount_b_optimal));
        }

        let amount_a_optimal = Self::quote(amount_b_desired, reserve_b, reserve_a)?;
        // Follows from amount_b_optimal > amount_b_desired
        debug_assert!(amount_a_optimal <= amount_a_desired);
        if amount_a_optimal < amount_a_min {
            return Err(ExchangeError::InsufficientAAmount);
        }
        Ok((amount_a_optimal, amount_b_desired))
    }
}
