//! Removes liquidity from a pair. Shares are pulled from the caller into the
//! pool and burned there; the native variants route the wrapped side through
//! the router so it can be unwrapped before payout. Permit variants replace
//! the share approval with an owner-signed message.

use pairswap_assets::{PermitMessage, PermitSignature};
use pairswap_core::math::sort_assets;
use pairswap_core::Address;
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};
use crate::router::Router;
use crate::runtime::Runtime;

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityParams {
    pub asset_a: Address,
    pub asset_b: Address,
    pub liquidity: u128,
    pub amount_a_min: u128,
    pub amount_b_min: u128,
    pub to: Address,
    pub deadline: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityNativeParams {
    pub token: Address,
    pub liquidity: u128,
    pub amount_token_min: u128,
    pub amount_native_min: u128,
    pub to: Address,
    pub deadline: u64,
}

/// Signed share approval for the router. Covers `u128::MAX` when
/// `approve_max` is set, otherwise exactly the liquidity being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitParams {
    pub approve_max: bool,
    pub signature: PermitSignature,
}

// ============================================================================
// Handler Functions
// ============================================================================

impl Router {
    /// Returns `(amount_a, amount_b)`
    pub fn remove_liquidity(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityParams,
    ) -> ExchangeResult<(u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.burn_liquidity(rt, caller, &params)
        })
    }

    /// Returns `(amount_token, amount_native)`
    pub fn remove_liquidity_native(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityNativeParams,
    ) -> ExchangeResult<(u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.burn_liquidity_native(rt, caller, &params)
        })
    }

    pub fn remove_liquidity_with_permit(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityParams,
        permit: PermitParams,
    ) -> ExchangeResult<(u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let pool = Self::pool_for(rt, params.asset_a, params.asset_b)?;
            self.consume_permit(rt, caller, pool, params.liquidity, params.deadline, &permit)?;
            self.burn_liquidity(rt, caller, &params)
        })
    }

    pub fn remove_liquidity_native_with_permit(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityNativeParams,
        permit: PermitParams,
    ) -> ExchangeResult<(u128, u128)> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let pool = Self::pool_for(rt, params.token, self.wrapped_native())?;
            self.consume_permit(rt, caller, pool, params.liquidity, params.deadline, &permit)?;
            self.burn_liquidity_native(rt, caller, &params)
        })
    }

    /// For tokens that take a cut on transfer: forwards whatever token
    /// balance the router actually received. Returns the native amount.
    pub fn remove_liquidity_native_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityNativeParams,
    ) -> ExchangeResult<u128> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.burn_liquidity_native_supporting_fee_on_transfer(rt, caller, &params)
        })
    }

    pub fn remove_liquidity_native_with_permit_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: RemoveLiquidityNativeParams,
        permit: PermitParams,
    ) -> ExchangeResult<u128> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let pool = Self::pool_for(rt, params.token, self.wrapped_native())?;
            self.consume_permit(rt, caller, pool, params.liquidity, params.deadline, &permit)?;
            self.burn_liquidity_native_supporting_fee_on_transfer(rt, caller, &params)
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn burn_liquidity(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &RemoveLiquidityParams,
    ) -> ExchangeResult<(u128, u128)> {
        let pool = Self::pool_for(rt, params.asset_a, params.asset_b)?;
        rt.ledger_mut()
            .transfer_from(&pool, self.address(), caller, pool, params.liquidity)?;
        let (amount0, amount1) = rt.pool_burn(pool, self.address(), params.to)?;

        let (asset0, _) = sort_assets(params.asset_a, params.asset_b)?;
        let (amount_a, amount_b) = if params.asset_a == asset0 {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        if amount_a < params.amount_a_min {
            return Err(ExchangeError::InsufficientAAmount);
        }
        if amount_b < params.amount_b_min {
            return Err(ExchangeError::InsufficientBAmount);
        }

        debug!(%pool, amount_a, amount_b, liquidity = params.liquidity, "removed liquidity");
        Ok((amount_a, amount_b))
    }

    /// Burn to the router, keeping both sides in custody for payout
    fn burn_liquidity_to_router(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &RemoveLiquidityNativeParams,
    ) -> ExchangeResult<(u128, u128)> {
        let burn = RemoveLiquidityParams {
            asset_a: params.token,
            asset_b: self.wrapped_native(),
            liquidity: params.liquidity,
            amount_a_min: params.amount_token_min,
            amount_b_min: params.amount_native_min,
            to: self.address(),
            deadline: params.deadline,
        };
        self.burn_liquidity(rt, caller, &burn)
    }

    fn burn_liquidity_native(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &RemoveLiquidityNativeParams,
    ) -> ExchangeResult<(u128, u128)> {
        let (amount_token, amount_native) = self.burn_liquidity_to_router(rt, caller, params)?;
        rt.ledger_mut()
            .transfer(&params.token, self.address(), params.to, amount_token)?;
        self.unwrap_to(rt, params.to, amount_native)?;
        Ok((amount_token, amount_native))
    }

    fn burn_liquidity_native_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &RemoveLiquidityNativeParams,
    ) -> ExchangeResult<u128> {
        let (_, amount_native) = self.burn_liquidity_to_router(rt, caller, params)?;
        let held = rt.ledger().balance_of(&params.token, &self.address())?;
        rt.ledger_mut()
            .transfer(&params.token, self.address(), params.to, held)?;
        self.unwrap_to(rt, params.to, amount_native)?;
        Ok(amount_native)
    }

    /// Approve the router on the pool's share token with the caller's signature
    fn consume_permit(
        &self,
        rt: &mut Runtime,
        caller: Address,
        pool: Address,
        liquidity: u128,
        deadline: u64,
        permit: &PermitParams,
    ) -> ExchangeResult<()> {
        let value = if permit.approve_max { u128::MAX } else { liquidity };
        let message = PermitMessage {
            owner: caller,
            spender: self.address(),
            value,
            nonce: rt.ledger().nonce(&pool, &caller)?,
            deadline,
        };
        let now = rt.now();
        Ok(rt.ledger_mut().permit(&pool, &message, &permit.signature, now)?)
    }
}
