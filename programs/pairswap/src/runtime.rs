//! Transaction host.
//!
//! A [`Runtime`] owns everything the exchange touches: the asset ledger, the
//! pool registry and the clock. Public operations run through
//! [`Runtime::atomically`], which works on a scratch copy and commits it only
//! when the whole operation succeeds.

use pairswap_assets::Ledger;
use pairswap_core::Address;
use tracing::{debug, warn};

use crate::error::ExchangeResult;
use crate::state::{PoolRegistry, SwapInputs};

/// Context handed to a flash-swap borrower
#[derive(Debug, Clone, Copy)]
pub struct FlashSwapContext<'a> {
    pub pool: Address,
    pub sender: Address,
    pub amount0_out: u128,
    pub amount1_out: u128,
    pub data: &'a [u8],
}

/// Code that runs between a pool sending its outputs and checking it was
/// paid. The pool stays locked for the whole call.
pub trait FlashSwapCallee {
    fn on_flash_swap(&mut self, host: &mut FlashSwapHost<'_>, ctx: &FlashSwapContext<'_>) -> ExchangeResult<()>;
}

/// The runtime as seen from inside a flash-swap callback.
///
/// Every call acts as the borrower, the account that received the outputs.
/// The clock and direct ledger writes are out of reach.
pub struct FlashSwapHost<'a> {
    runtime: &'a mut Runtime,
    borrower: Address,
}

impl FlashSwapHost<'_> {
    pub fn borrower(&self) -> Address {
        self.borrower
    }

    pub fn now(&self) -> u64 {
        self.runtime.now
    }

    pub fn ledger(&self) -> &Ledger {
        &self.runtime.ledger
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.runtime.registry
    }

    /// Send the borrower's own `asset`
    pub fn transfer(&mut self, asset: Address, to: Address, amount: u128) -> ExchangeResult<()> {
        self.runtime.transfer(asset, self.borrower, to, amount)
    }

    /// Spend an allowance `from` granted the borrower
    pub fn transfer_from(&mut self, asset: Address, from: Address, to: Address, amount: u128) -> ExchangeResult<()> {
        let spender = self.borrower;
        self.runtime
            .atomically(|rt| Ok(rt.ledger.transfer_from(&asset, spender, from, to, amount)?))
    }

    pub fn approve(&mut self, asset: Address, spender: Address, amount: u128) -> ExchangeResult<()> {
        self.runtime.approve(asset, self.borrower, spender, amount)
    }

    pub fn mint(&mut self, pool: Address, to: Address) -> ExchangeResult<u128> {
        self.runtime.mint(pool, self.borrower, to)
    }

    pub fn burn(&mut self, pool: Address, to: Address) -> ExchangeResult<(u128, u128)> {
        self.runtime.burn(pool, self.borrower, to)
    }

    pub fn swap(
        &mut self,
        pool: Address,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
        flash: Option<FlashSwap<'_>>,
    ) -> ExchangeResult<SwapInputs> {
        self.runtime.swap(pool, self.borrower, amount0_out, amount1_out, to, flash)
    }

    pub fn sync(&mut self, pool: Address) -> ExchangeResult<()> {
        self.runtime.sync(pool)
    }

    pub fn skim(&mut self, pool: Address, to: Address) -> ExchangeResult<(u128, u128)> {
        self.runtime.skim(pool, to)
    }
}

/// Callback capability attached to a swap
pub struct FlashSwap<'a> {
    pub callee: &'a mut dyn FlashSwapCallee,
    pub data: &'a [u8],
}

impl<'a> FlashSwap<'a> {
    pub fn new(callee: &'a mut dyn FlashSwapCallee, data: &'a [u8]) -> Self {
        Self { callee, data }
    }
}

#[derive(Debug, Clone)]
pub struct Runtime {
    ledger: Ledger,
    registry: PoolRegistry,
    now: u64,
}

impl Runtime {
    pub fn new(ledger: Ledger, registry: PoolRegistry, now: u64) -> Self {
        Self { ledger, registry, now }
    }

    // ========================================================================
    // Host
    // ========================================================================

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn set_time(&mut self, now: u64) {
        self.now = now;
    }

    pub fn advance_time(&mut self, seconds: u64) {
        self.now = self.now.saturating_add(seconds);
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Direct ledger access for funding accounts and creating assets
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Run `f` as one transaction: every change it makes, events included,
    /// is kept on `Ok` and discarded on `Err`
    pub fn atomically<T>(&mut self, f: impl FnOnce(&mut Runtime) -> ExchangeResult<T>) -> ExchangeResult<T> {
        let mut scratch = self.clone();
        match f(&mut scratch) {
            Ok(value) => {
                *self = scratch;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "transaction reverted");
                Err(err)
            }
        }
    }

    // ========================================================================
    // Registry
    // ========================================================================

    pub fn create_pool(&mut self, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        self.atomically(|rt| rt.registry.create_pool(&mut rt.ledger, asset_a, asset_b))
    }

    pub fn get_or_create_pool(&mut self, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        self.atomically(|rt| rt.get_or_create_pool_in_place(asset_a, asset_b))
    }

    pub(crate) fn get_or_create_pool_in_place(&mut self, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        self.registry.get_or_create(&mut self.ledger, asset_a, asset_b)
    }

    // ========================================================================
    // Pool Operations
    // ========================================================================

    /// Mint shares for assets already sent to `pool`
    pub fn mint(&mut self, pool: Address, sender: Address, to: Address) -> ExchangeResult<u128> {
        self.atomically(|rt| rt.pool_mint(pool, sender, to))
    }

    /// Redeem shares already sent to `pool`
    pub fn burn(&mut self, pool: Address, sender: Address, to: Address) -> ExchangeResult<(u128, u128)> {
        self.atomically(|rt| rt.pool_burn(pool, sender, to))
    }

    /// Low-level swap. Inputs must reach the pool before it settles, either
    /// up front or from the flash-swap callback.
    pub fn swap(
        &mut self,
        pool: Address,
        sender: Address,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
        flash: Option<FlashSwap<'_>>,
    ) -> ExchangeResult<SwapInputs> {
        self.atomically(|rt| rt.execute_swap(pool, sender, amount0_out, amount1_out, to, flash))
    }

    pub fn sync(&mut self, pool: Address) -> ExchangeResult<()> {
        self.atomically(|rt| {
            let now = rt.now;
            rt.registry.pool_mut(&pool)?.sync(&mut rt.ledger, now)
        })
    }

    pub fn skim(&mut self, pool: Address, to: Address) -> ExchangeResult<(u128, u128)> {
        self.atomically(|rt| rt.registry.pool_mut(&pool)?.skim(&mut rt.ledger, to))
    }

    pub(crate) fn pool_mint(&mut self, pool: Address, sender: Address, to: Address) -> ExchangeResult<u128> {
        let now = self.now;
        self.registry.pool_mut(&pool)?.mint(&mut self.ledger, sender, to, now)
    }

    pub(crate) fn pool_burn(&mut self, pool: Address, sender: Address, to: Address) -> ExchangeResult<(u128, u128)> {
        let now = self.now;
        self.registry.pool_mut(&pool)?.burn(&mut self.ledger, sender, to, now)
    }

    /// Both swap phases with the callback in between. Must run inside
    /// [`Runtime::atomically`]: a failing callback leaves the pool locked.
    pub(crate) fn execute_swap(
        &mut self,
        pool: Address,
        sender: Address,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
        flash: Option<FlashSwap<'_>>,
    ) -> ExchangeResult<SwapInputs> {
        let ticket = self
            .registry
            .pool_mut(&pool)?
            .begin_swap(&mut self.ledger, sender, amount0_out, amount1_out, to)?;

        if let Some(flash) = flash {
            debug!(%pool, %to, amount0_out, amount1_out, "flash swap callback");
            let ctx = FlashSwapContext {
                pool,
                sender,
                amount0_out,
                amount1_out,
                data: flash.data,
            };
            let mut host = FlashSwapHost { runtime: &mut *self, borrower: to };
            flash.callee.on_flash_swap(&mut host, &ctx)?;
        }

        let now = self.now;
        self.registry.pool_mut(&pool)?.settle_swap(&mut self.ledger, ticket, now)
    }

    // ========================================================================
    // Asset Operations
    // ========================================================================

    pub fn transfer(&mut self, asset: Address, from: Address, to: Address, amount: u128) -> ExchangeResult<()> {
        self.atomically(|rt| Ok(rt.ledger.transfer(&asset, from, to, amount)?))
    }

    pub fn approve(&mut self, asset: Address, owner: Address, spender: Address, amount: u128) -> ExchangeResult<()> {
        self.atomically(|rt| Ok(rt.ledger.approve(&asset, owner, spender, amount)?))
    }
}
