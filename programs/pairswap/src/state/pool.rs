//! Constant-product pool.
//!
//! A pool holds reserves of exactly two assets and issues shares for them.
//! Callers move assets in first and then call `mint`/`swap`; the pool infers
//! what it received from `balance - reserve`. Share balances live on the
//! ledger as a token whose address is the pool address and whose only minter
//! is the pool itself.

use ethnum::U256;
use pairswap_assets::Ledger;
use pairswap_core::math::{
    checked_mul_u256, checked_sub_u256, ensure_reserve_bounds, mul_div, safe_sub_u128, sqrt_product, FeeRate,
    Rounding,
};
use pairswap_core::oracle::{block_timestamp, PriceAccumulator};
use pairswap_core::{Address, Event, EventKind, MINIMUM_LIQUIDITY};
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};
use crate::state::security::{ReentrancyGuard, ReentrancyStatus};

#[derive(Debug, Clone)]
pub struct Pool {
    address: Address,
    registry: Address,
    asset0: Address,
    asset1: Address,
    reserve0: u128,
    reserve1: u128,
    oracle: PriceAccumulator,
    fee: FeeRate,
    lock: ReentrancyStatus,
}

/// Proof that a swap's optimistic transfers happened. Reserves recorded here
/// are the ones the invariant is checked against once the callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a swap is not finished until its ticket is settled"]
pub struct SwapTicket {
    pub pool: Address,
    pub sender: Address,
    pub to: Address,
    pub reserve0: u128,
    pub reserve1: u128,
    pub amount0_out: u128,
    pub amount1_out: u128,
}

/// Assets that entered a pool during a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapInputs {
    pub amount0_in: u128,
    pub amount1_in: u128,
}

impl Pool {
    pub(crate) fn new(address: Address, registry: Address, asset0: Address, asset1: Address, fee: FeeRate) -> Self {
        Self {
            address,
            registry,
            asset0,
            asset1,
            reserve0: 0,
            reserve1: 0,
            oracle: PriceAccumulator::default(),
            fee,
            lock: ReentrancyStatus::Unlocked,
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    pub fn asset0(&self) -> Address {
        self.asset0
    }

    pub fn asset1(&self) -> Address {
        self.asset1
    }

    pub fn fee(&self) -> FeeRate {
        self.fee
    }

    /// `(reserve0, reserve1, block_timestamp_last)`
    pub fn reserves(&self) -> (u128, u128, u32) {
        (self.reserve0, self.reserve1, self.oracle.block_timestamp_last)
    }

    /// Reserves ordered as `(reserve of asset, reserve of the other asset)`
    pub fn reserves_for(&self, asset: &Address) -> ExchangeResult<(u128, u128)> {
        if *asset == self.asset0 {
            Ok((self.reserve0, self.reserve1))
        } else if *asset == self.asset1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(ExchangeError::InvalidPath("asset is not traded by this pool"))
        }
    }

    pub fn price0_cumulative_last(&self) -> U256 {
        self.oracle.price0_cumulative
    }

    pub fn price1_cumulative_last(&self) -> U256 {
        self.oracle.price1_cumulative
    }

    pub fn is_locked(&self) -> bool {
        ReentrancyGuard::is_locked(&self.lock)
    }

    pub fn total_shares(&self, ledger: &Ledger) -> ExchangeResult<u128> {
        Ok(ledger.total_supply(&self.address)?)
    }

    fn balances(&self, ledger: &Ledger) -> ExchangeResult<(u128, u128)> {
        Ok((
            ledger.balance_of(&self.asset0, &self.address)?,
            ledger.balance_of(&self.asset1, &self.address)?,
        ))
    }

    fn emit(&self, ledger: &mut Ledger, kind: EventKind) {
        ledger.emit(Event::new(self.address, kind));
    }

    /// Run `f` with the pool locked, releasing on every exit path
    fn locked<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ExchangeResult<T>,
    ) -> ExchangeResult<T> {
        ReentrancyGuard::acquire(&mut self.lock)?;
        let result = f(self);
        ReentrancyGuard::release(&mut self.lock);
        result
    }

    /// Record new reserves, folding the previous ones into the accumulators
    fn update(&mut self, ledger: &mut Ledger, balance0: u128, balance1: u128, now: u64) -> ExchangeResult<()> {
        let balance0 = ensure_reserve_bounds(balance0).map_err(|_| ExchangeError::Overflow)?;
        let balance1 = ensure_reserve_bounds(balance1).map_err(|_| ExchangeError::Overflow)?;

        self.oracle.update(self.reserve0, self.reserve1, block_timestamp(now))?;
        self.reserve0 = balance0;
        self.reserve1 = balance1;

        self.emit(ledger, EventKind::Sync { reserve0: balance0, reserve1: balance1 });
        Ok(())
    }

    // ========================================================================
    // Liquidity
    // ========================================================================

    /// Issue shares for whatever was deposited since the last update
    pub(crate) fn mint(&mut self, ledger: &mut Ledger, sender: Address, to: Address, now: u64) -> ExchangeResult<u128> {
        self.locked(|pool| {
            let (balance0, balance1) = pool.balances(ledger)?;
            let amount0 = safe_sub_u128(balance0, pool.reserve0)?;
            let amount1 = safe_sub_u128(balance1, pool.reserve1)?;

            let total = pool.total_shares(ledger)?;
            let liquidity = if total == 0 {
                sqrt_product(amount0, amount1)?.saturating_sub(MINIMUM_LIQUIDITY)
            } else {
                let by0 = mul_div(amount0, total, pool.reserve0, Rounding::Down)?;
                let by1 = mul_div(amount1, total, pool.reserve1, Rounding::Down)?;
                by0.min(by1)
            };
            if liquidity == 0 {
                return Err(ExchangeError::InsufficientLiquidityMinted);
            }

            if total == 0 {
                // Permanently lock the first MINIMUM_LIQUIDITY shares
                ledger.mint(&pool.address, pool.address, Address::ZERO, MINIMUM_LIQUIDITY)?;
            }
            ledger.mint(&pool.address, pool.address, to, liquidity)?;

            pool.update(ledger, balance0, balance1, now)?;
            pool.emit(ledger, EventKind::Mint { sender, amount0, amount1 });
            debug!(pool = %pool.address, %to, amount0, amount1, liquidity, "minted shares");
            Ok(liquidity)
        })
    }

    /// Redeem the shares sent to the pool for a proportional cut of reserves
    pub(crate) fn burn(
        &mut self,
        ledger: &mut Ledger,
        sender: Address,
        to: Address,
        now: u64,
    ) -> ExchangeResult<(u128, u128)> {
        self.locked(|pool| {
            let shares = ledger.balance_of(&pool.address, &pool.address)?;
            let total = pool.total_shares(ledger)?;
            if total == 0 {
                return Err(ExchangeError::InsufficientLiquidityBurned);
            }

            let amount0 = mul_div(shares, pool.reserve0, total, Rounding::Down)?;
            let amount1 = mul_div(shares, pool.reserve1, total, Rounding::Down)?;
            if amount0 == 0 || amount1 == 0 {
                return Err(ExchangeError::InsufficientLiquidityBurned);
            }

            ledger.burn(&pool.address, pool.address, pool.address, shares)?;
            ledger.transfer(&pool.asset0, pool.address, to, amount0)?;
            ledger.transfer(&pool.asset1, pool.address, to, amount1)?;

            let (balance0, balance1) = pool.balances(ledger)?;
            pool.update(ledger, balance0, balance1, now)?;
            pool.emit(ledger, EventKind::Burn { sender, amount0, amount1, to });
            debug!(pool = %pool.address, %to, amount0, amount1, shares, "burned shares");
            Ok((amount0, amount1))
        })
    }

    // ========================================================================
    // Swaps
    // ========================================================================

    /// Validate a swap, lock the pool and send the requested outputs.
    ///
    /// The lock stays held until [`Pool::settle_swap`] so a flash-swap
    /// callback cannot re-enter this pool.
    pub(crate) fn begin_swap(
        &mut self,
        ledger: &mut Ledger,
        sender: Address,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
    ) -> ExchangeResult<SwapTicket> {
        ReentrancyGuard::acquire(&mut self.lock)?;
        let opened = self.open_swap(ledger, sender, amount0_out, amount1_out, to);
        if opened.is_err() {
            ReentrancyGuard::release(&mut self.lock);
        }
        opened
    }

    fn open_swap(
        &self,
        ledger: &mut Ledger,
        sender: Address,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
    ) -> ExchangeResult<SwapTicket> {
        if amount0_out == 0 && amount1_out == 0 {
            return Err(ExchangeError::InsufficientOutputAmount);
        }
        if amount0_out >= self.reserve0 || amount1_out >= self.reserve1 {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        if to == self.asset0 || to == self.asset1 {
            return Err(ExchangeError::InvalidTo);
        }

        // Optimistic transfers
        if amount0_out > 0 {
            ledger.transfer(&self.asset0, self.address, to, amount0_out)?;
        }
        if amount1_out > 0 {
            ledger.transfer(&self.asset1, self.address, to, amount1_out)?;
        }

        Ok(SwapTicket {
            pool: self.address,
            sender,
            to,
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            amount0_out,
            amount1_out,
        })
    }

    /// Check the fee-adjusted invariant against the ticket's reserves, record
    /// the new reserves and release the lock
    pub(crate) fn settle_swap(&mut self, ledger: &mut Ledger, ticket: SwapTicket, now: u64) -> ExchangeResult<SwapInputs> {
        if ticket.pool != self.address || !self.is_locked() {
            return Err(ExchangeError::InvalidSwapTicket(self.address));
        }
        let settled = self.close_swap(ledger, &ticket, now);
        ReentrancyGuard::release(&mut self.lock);
        settled
    }

    fn close_swap(&mut self, ledger: &mut Ledger, ticket: &SwapTicket, now: u64) -> ExchangeResult<SwapInputs> {
        let (balance0, balance1) = self.balances(ledger)?;

        let floor0 = safe_sub_u128(ticket.reserve0, ticket.amount0_out)?;
        let floor1 = safe_sub_u128(ticket.reserve1, ticket.amount1_out)?;
        let amount0_in = balance0.saturating_sub(floor0);
        let amount1_in = balance1.saturating_sub(floor1);
        if amount0_in == 0 && amount1_in == 0 {
            return Err(ExchangeError::InsufficientInputAmount);
        }

        // (b0*D - in0*N) * (b1*D - in1*N) >= r0 * r1 * D^2
        let d = U256::new(self.fee.denominator);
        let n = U256::new(self.fee.numerator);
        let adjusted0 = fee_adjusted(balance0, amount0_in, d, n)?;
        let adjusted1 = fee_adjusted(balance1, amount1_in, d, n)?;
        let lhs = checked_mul_u256(adjusted0, adjusted1)?;
        let k = checked_mul_u256(U256::new(ticket.reserve0), U256::new(ticket.reserve1))?;
        let rhs = checked_mul_u256(k, checked_mul_u256(d, d)?)?;
        if lhs < rhs {
            return Err(ExchangeError::K);
        }

        self.update(ledger, balance0, balance1, now)?;
        self.emit(
            ledger,
            EventKind::Swap {
                sender: ticket.sender,
                amount0_in,
                amount1_in,
                amount0_out: ticket.amount0_out,
                amount1_out: ticket.amount1_out,
                to: ticket.to,
            },
        );
        debug!(
            pool = %self.address,
            amount0_in,
            amount1_in,
            amount0_out = ticket.amount0_out,
            amount1_out = ticket.amount1_out,
            "swapped"
        );
        Ok(SwapInputs { amount0_in, amount1_in })
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Force reserves to match balances
    pub(crate) fn sync(&mut self, ledger: &mut Ledger, now: u64) -> ExchangeResult<()> {
        self.locked(|pool| {
            let (balance0, balance1) = pool.balances(ledger)?;
            pool.update(ledger, balance0, balance1, now)
        })
    }

    /// Force balances to match reserves by sending the excess to `to`
    pub(crate) fn skim(&mut self, ledger: &mut Ledger, to: Address) -> ExchangeResult<(u128, u128)> {
        self.locked(|pool| {
            let (balance0, balance1) = pool.balances(ledger)?;
            let excess0 = safe_sub_u128(balance0, pool.reserve0)?;
            let excess1 = safe_sub_u128(balance1, pool.reserve1)?;
            if excess0 > 0 {
                ledger.transfer(&pool.asset0, pool.address, to, excess0)?;
            }
            if excess1 > 0 {
                ledger.transfer(&pool.asset1, pool.address, to, excess1)?;
            }
            Ok((excess0, excess1))
        })
    }
}

fn fee_adjusted(balance: u128, amount_in: u128, d: U256, n: U256) -> ExchangeResult<U256> {
    let gross = checked_mul_u256(U256::new(balance), d)?;
    let fee = checked_mul_u256(U256::new(amount_in), n)?;
    Ok(checked_sub_u256(gross, fee)?)
}
