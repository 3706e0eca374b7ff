//! Exact-input swaps for assets that take a cut on transfer.
//!
//! Nothing is priced up front: each hop is sized from what its pool really
//! received, and the slippage bound applies to what the recipient really got.

use pairswap_core::Address;
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};
use crate::instructions::swap::SwapExactIn;
use crate::router::Router;
use crate::runtime::Runtime;

impl Router {
    /// Returns the amount the recipient's balance grew by
    pub fn swap_exact_tokens_for_tokens_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<u128> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            ensure_path(&params.path)?;
            self.pull_input(rt, caller, &params.path, params.amount_in)?;
            self.swap_to_recipient(rt, params)
        })
    }

    pub fn swap_exact_native_for_tokens_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<u128> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_starts_native(&params.path)?;
            ensure_path(&params.path)?;

            self.receive_native(rt, caller, params.amount_in)?;
            let pool = Self::pool_for(rt, params.path[0], params.path[1])?;
            self.wrap_into(rt, pool, params.amount_in)?;
            self.swap_to_recipient(rt, params)
        })
    }

    /// Returns the native amount paid out
    pub fn swap_exact_tokens_for_native_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<u128> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_ends_native(&params.path)?;
            ensure_path(&params.path)?;

            self.pull_input(rt, caller, &params.path, params.amount_in)?;
            self.swap_along_supporting_fee_on_transfer(rt, &params.path, self.address())?;

            let amount_out = rt
                .ledger()
                .balance_of(&self.wrapped_native(), &self.address())?;
            if amount_out < params.amount_out_min {
                return Err(ExchangeError::InsufficientOutputAmount);
            }
            self.unwrap_to(rt, params.to, amount_out)?;
            Ok(amount_out)
        })
    }

    /// Run the path and bound the recipient's realized gain
    fn swap_to_recipient(&self, rt: &mut Runtime, params: &SwapExactIn) -> ExchangeResult<u128> {
        let asset_out = params.path[params.path.len() - 1];
        let before = rt.ledger().balance_of(&asset_out, &params.to)?;
        self.swap_along_supporting_fee_on_transfer(rt, &params.path, params.to)?;
        let after = rt.ledger().balance_of(&asset_out, &params.to)?;

        let received = after.saturating_sub(before);
        if received < params.amount_out_min {
            return Err(ExchangeError::InsufficientOutputAmount);
        }
        debug!(amount_in = params.amount_in, received, "fee-on-transfer swap");
        Ok(received)
    }
}

fn ensure_path(path: &[Address]) -> ExchangeResult<()> {
    if path.len() < 2 {
        return Err(ExchangeError::InvalidPath("path needs at least two assets"));
    }
    Ok(())
}
