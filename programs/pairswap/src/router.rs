//! Router shared state and helpers.
//!
//! The router never holds value between calls. It pulls assets from callers
//! with `transfer_from`, routes them through pools and pays out to the
//! recipient. Entry points live in [`crate::instructions`].

use std::collections::BTreeMap;

use pairswap_core::math::{self, sort_assets, FeeRate};
use pairswap_core::{Address, CoreError, ROUTER_ID_DOMAIN};
use tracing::info;

use crate::error::{ExchangeError, ExchangeResult};
use crate::runtime::Runtime;
use crate::state::PoolRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Router {
    address: Address,
    registry: Address,
    wrapped_native: Address,
}

impl Router {
    /// Bind a router to a registry and a native wrapper; both are fixed for
    /// the router's lifetime
    pub fn new(seed: &[u8], registry: &PoolRegistry, wrapped_native: Address) -> Self {
        let address = Address::derive(ROUTER_ID_DOMAIN, &[seed, registry.address().as_bytes()]);
        info!(router = %address, registry = %registry.address(), %wrapped_native, "deployed router");
        Self {
            address,
            registry: registry.address(),
            wrapped_native,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    pub fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    // ========================================================================
    // Validation
    // ========================================================================

    pub(crate) fn ensure_deadline(rt: &Runtime, deadline: u64) -> ExchangeResult<()> {
        let now = rt.now();
        if now > deadline {
            return Err(ExchangeError::Expired { deadline, now });
        }
        Ok(())
    }

    pub(crate) fn ensure_registry(&self, rt: &Runtime) -> ExchangeResult<()> {
        if rt.registry().address() != self.registry {
            return Err(ExchangeError::UnknownRegistry(self.registry));
        }
        Ok(())
    }

    /// Common preamble of every entry point
    pub(crate) fn ensure_callable(&self, rt: &Runtime, deadline: u64) -> ExchangeResult<()> {
        Self::ensure_deadline(rt, deadline)?;
        self.ensure_registry(rt)
    }

    // ========================================================================
    // Library
    // ========================================================================

    pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> ExchangeResult<u128> {
        Ok(math::quote(amount_a, reserve_a, reserve_b)?)
    }

    pub fn get_amount_out(&self, rt: &Runtime, amount_in: u128, reserve_in: u128, reserve_out: u128) -> ExchangeResult<u128> {
        Ok(math::get_amount_out(amount_in, reserve_in, reserve_out, rt.registry().fee())?)
    }

    pub fn get_amount_in(&self, rt: &Runtime, amount_out: u128, reserve_in: u128, reserve_out: u128) -> ExchangeResult<u128> {
        Ok(math::get_amount_in(amount_out, reserve_in, reserve_out, rt.registry().fee())?)
    }

    /// Amounts along `path` for an exact input at current reserves
    pub fn get_amounts_out(&self, rt: &Runtime, amount_in: u128, path: &[Address]) -> ExchangeResult<Vec<u128>> {
        self.ensure_registry(rt)?;
        let (fee, hops) = path_reserves(rt.registry(), path)?;
        Ok(math::get_amounts_out(amount_in, path, fee, |input, output| {
            lookup_hop(&hops, input, output)
        })?)
    }

    /// Amounts along `path` for an exact output at current reserves
    pub fn get_amounts_in(&self, rt: &Runtime, amount_out: u128, path: &[Address]) -> ExchangeResult<Vec<u128>> {
        self.ensure_registry(rt)?;
        let (fee, hops) = path_reserves(rt.registry(), path)?;
        Ok(math::get_amounts_in(amount_out, path, fee, |input, output| {
            lookup_hop(&hops, input, output)
        })?)
    }

    // ========================================================================
    // Routing
    // ========================================================================

    pub(crate) fn pool_for(rt: &Runtime, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        rt.registry()
            .get_pool(asset_a, asset_b)
            .ok_or(ExchangeError::UnknownPool(asset_a, asset_b))
    }

    /// Where the output of hop `i` goes: the next pool, or `to` after the last hop
    fn hop_recipient(rt: &Runtime, path: &[Address], i: usize, to: Address) -> ExchangeResult<Address> {
        if i + 2 < path.len() {
            Self::pool_for(rt, path[i + 1], path[i + 2])
        } else {
            Ok(to)
        }
    }

    fn hop_outputs(input: Address, output: Address, amount_out: u128) -> ExchangeResult<(u128, u128)> {
        let (asset0, _) = sort_assets(input, output)?;
        Ok(if input == asset0 { (0, amount_out) } else { (amount_out, 0) })
    }

    /// Execute precomputed `amounts` along `path`. The first pool must
    /// already hold `amounts[0]`.
    pub(crate) fn swap_along(&self, rt: &mut Runtime, amounts: &[u128], path: &[Address], to: Address) -> ExchangeResult<()> {
        for i in 0..path.len().saturating_sub(1) {
            let (input, output) = (path[i], path[i + 1]);
            let (amount0_out, amount1_out) = Self::hop_outputs(input, output, amounts[i + 1])?;
            let pool = Self::pool_for(rt, input, output)?;
            let recipient = Self::hop_recipient(rt, path, i, to)?;
            rt.execute_swap(pool, self.address, amount0_out, amount1_out, recipient, None)?;
        }
        Ok(())
    }

    /// Like [`Router::swap_along`], but each hop's input is whatever the pool
    /// actually received
    pub(crate) fn swap_along_supporting_fee_on_transfer(
        &self,
        rt: &mut Runtime,
        path: &[Address],
        to: Address,
    ) -> ExchangeResult<()> {
        for i in 0..path.len().saturating_sub(1) {
            let (input, output) = (path[i], path[i + 1]);
            let pool = Self::pool_for(rt, input, output)?;
            let (reserve_in, reserve_out) = rt.registry().pool(&pool)?.reserves_for(&input)?;
            let balance_in = rt.ledger().balance_of(&input, &pool)?;
            let amount_in = balance_in
                .checked_sub(reserve_in)
                .ok_or(ExchangeError::InsufficientInputAmount)?;
            let amount_out = self.get_amount_out(rt, amount_in, reserve_in, reserve_out)?;

            let (amount0_out, amount1_out) = Self::hop_outputs(input, output, amount_out)?;
            let recipient = Self::hop_recipient(rt, path, i, to)?;
            rt.execute_swap(pool, self.address, amount0_out, amount1_out, recipient, None)?;
        }
        Ok(())
    }

    // ========================================================================
    // Native Coin
    // ========================================================================

    /// Take `value` attached native coin from `caller` into router custody
    pub(crate) fn receive_native(&self, rt: &mut Runtime, caller: Address, value: u128) -> ExchangeResult<()> {
        Ok(rt.ledger_mut().transfer_native(caller, self.address, value)?)
    }

    /// Wrap `amount` of the router's native coin and send it to `pool`
    pub(crate) fn wrap_into(&self, rt: &mut Runtime, pool: Address, amount: u128) -> ExchangeResult<()> {
        let wrapper = self.wrapped_native;
        let ledger = rt.ledger_mut();
        ledger.deposit(&wrapper, self.address, amount)?;
        ledger.transfer(&wrapper, self.address, pool, amount)?;
        Ok(())
    }

    /// Unwrap `amount` of the router's wrapped balance and pay it to `to`
    pub(crate) fn unwrap_to(&self, rt: &mut Runtime, to: Address, amount: u128) -> ExchangeResult<()> {
        let wrapper = self.wrapped_native;
        let ledger = rt.ledger_mut();
        ledger.withdraw(&wrapper, self.address, amount)?;
        ledger.transfer_native(self.address, to, amount)?;
        Ok(())
    }

    /// Return whatever native coin the router still holds to `to`
    pub(crate) fn refund_native(&self, rt: &mut Runtime, to: Address) -> ExchangeResult<()> {
        let leftover = rt.ledger().native_balance_of(&self.address);
        if leftover > 0 {
            rt.ledger_mut().transfer_native(self.address, to, leftover)?;
        }
        Ok(())
    }
}

type HopReserves = BTreeMap<(Address, Address), (u128, u128)>;

/// Resolve every hop's reserves up front so lookups cannot fail halfway
fn path_reserves(registry: &PoolRegistry, path: &[Address]) -> ExchangeResult<(FeeRate, HopReserves)> {
    let mut hops = BTreeMap::new();
    for hop in path.windows(2) {
        hops.insert((hop[0], hop[1]), registry.reserves(hop[0], hop[1])?);
    }
    Ok((registry.fee(), hops))
}

fn lookup_hop(hops: &HopReserves, input: Address, output: Address) -> Result<(u128, u128), CoreError> {
    hops.get(&(input, output))
        .copied()
        .ok_or(CoreError::InvalidPath("hop without a pool"))
}
