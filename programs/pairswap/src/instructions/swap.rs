//! Path swaps with exact input or exact output.
//!
//! Amounts for the whole path are priced before anything moves, checked
//! against the caller's bound, and then executed hop by hop with each pool
//! paying the next one directly.

use pairswap_core::Address;
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};
use crate::router::Router;
use crate::runtime::Runtime;

// ============================================================================
// Parameters
// ============================================================================

/// Sell exactly `amount_in` of `path[0]` for at least `amount_out_min` of the
/// last asset. For native-in swaps `amount_in` is the attached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    pub amount_in: u128,
    pub amount_out_min: u128,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: u64,
}

/// Buy exactly `amount_out` of the last asset for at most `amount_in_max` of
/// `path[0]`. For native-in swaps `amount_in_max` is the attached value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOut {
    pub amount_out: u128,
    pub amount_in_max: u128,
    pub path: Vec<Address>,
    pub to: Address,
    pub deadline: u64,
}

// ============================================================================
// Handler Functions
// ============================================================================

impl Router {
    pub fn swap_exact_tokens_for_tokens(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let amounts = self.amounts_for_exact_in(rt, params)?;
            self.pull_input(rt, caller, &params.path, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    pub fn swap_tokens_for_exact_tokens(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactOut,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            let amounts = self.amounts_for_exact_out(rt, params)?;
            self.pull_input(rt, caller, &params.path, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    pub fn swap_exact_native_for_tokens(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_starts_native(&params.path)?;
            let amounts = self.amounts_for_exact_in(rt, params)?;

            self.receive_native(rt, caller, params.amount_in)?;
            let pool = Self::pool_for(rt, params.path[0], params.path[1])?;
            self.wrap_into(rt, pool, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    pub fn swap_tokens_for_exact_native(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactOut,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_ends_native(&params.path)?;
            let amounts = self.amounts_for_exact_out(rt, params)?;

            self.pull_input(rt, caller, &params.path, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, self.address())?;
            self.unwrap_to(rt, params.to, amounts[amounts.len() - 1])?;
            Ok(amounts)
        })
    }

    pub fn swap_exact_tokens_for_native(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactIn,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_ends_native(&params.path)?;
            let amounts = self.amounts_for_exact_in(rt, params)?;

            self.pull_input(rt, caller, &params.path, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, self.address())?;
            self.unwrap_to(rt, params.to, amounts[amounts.len() - 1])?;
            Ok(amounts)
        })
    }

    /// Unspent attached value is refunded to the caller
    pub fn swap_native_for_exact_tokens(
        &self,
        rt: &mut Runtime,
        caller: Address,
        params: &SwapExactOut,
    ) -> ExchangeResult<Vec<u128>> {
        rt.atomically(|rt| {
            self.ensure_callable(rt, params.deadline)?;
            self.ensure_starts_native(&params.path)?;
            let amounts = self.amounts_for_exact_out(rt, params)?;

            self.receive_native(rt, caller, params.amount_in_max)?;
            let pool = Self::pool_for(rt, params.path[0], params.path[1])?;
            self.wrap_into(rt, pool, amounts[0])?;
            self.swap_along(rt, &amounts, &params.path, params.to)?;
            self.refund_native(rt, caller)?;
            Ok(amounts)
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn amounts_for_exact_in(&self, rt: &Runtime, params: &SwapExactIn) -> ExchangeResult<Vec<u128>> {
        let amounts = self.get_amounts_out(rt, params.amount_in, &params.path)?;
        let amount_out = amounts[amounts.len() - 1];
        if amount_out < params.amount_out_min {
            return Err(ExchangeError::InsufficientOutputAmount);
        }
        debug!(amount_in = params.amount_in, amount_out, hops = params.path.len() - 1, "priced exact-in swap");
        Ok(amounts)
    }

    fn amounts_for_exact_out(&self, rt: &Runtime, params: &SwapExactOut) -> ExchangeResult<Vec<u128>> {
        let amounts = self.get_amounts_in(rt, params.amount_out, &params.path)?;
        if amounts[0] > params.amount_in_max {
            return Err(ExchangeError::ExcessiveInputAmount);
        }
        debug!(amount_in = amounts[0], amount_out = params.amount_out, hops = params.path.len() - 1, "priced exact-out swap");
        Ok(amounts)
    }

    /// Move the caller's input straight into the first pool
    pub(crate) fn pull_input(&self, rt: &mut Runtime, caller: Address, path: &[Address], amount: u128) -> ExchangeResult<()> {
        let pool = Self::pool_for(rt, path[0], path[1])?;
        Ok(rt
            .ledger_mut()
            .transfer_from(&path[0], self.address(), caller, pool, amount)?)
    }

    pub(crate) fn ensure_starts_native(&self, path: &[Address]) -> ExchangeResult<()> {
        if path.first() != Some(&self.wrapped_native()) {
            return Err(ExchangeError::InvalidPath("path must start with the wrapped native asset"));
        }
        Ok(())
    }

    pub(crate) fn ensure_ends_native(&self, path: &[Address]) -> ExchangeResult<()> {
        if path.last() != Some(&self.wrapped_native()) {
            return Err(ExchangeError::InvalidPath("path must end with the wrapped native asset"));
        }
        Ok(())
    }
}
