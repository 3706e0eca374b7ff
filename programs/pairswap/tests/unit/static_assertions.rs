//! Compile-time checks on exchange types and constants

use pairswap::state::{ReentrancyStatus, SwapTicket};
use pairswap::{ExchangeError, FlashSwapHost, PoolRegistry, Router, Runtime};
use pairswap_core::{Address, MAX_FEE_DENOMINATOR, MAX_RESERVE, MINIMUM_LIQUIDITY, Q112};
use static_assertions::{assert_eq_size, assert_impl_all, assert_not_impl_any, const_assert, const_assert_eq};

assert_eq_size!(Address, [u8; 32]);
assert_eq_size!(ReentrancyStatus, u8);

assert_impl_all!(Runtime: Clone, Send, Sync);
assert_impl_all!(PoolRegistry: Clone, Send, Sync);
assert_impl_all!(Router: Copy, Send, Sync);
assert_impl_all!(ExchangeError: std::error::Error, Clone, Send, Sync);
assert_impl_all!(SwapTicket: Copy);
assert_not_impl_any!(SwapTicket: Default);
assert_not_impl_any!(FlashSwapHost<'static>: Clone, Default);

const_assert_eq!(MINIMUM_LIQUIDITY, 1_000);
const_assert_eq!(MAX_RESERVE, Q112 - 1);
const_assert!(MINIMUM_LIQUIDITY * MINIMUM_LIQUIDITY <= MAX_RESERVE);
const_assert!(MAX_FEE_DENOMINATOR * MAX_FEE_DENOMINATOR <= u64::MAX as u128 + 1);

#[test]
fn test_reentrancy_status_discriminants() {
    assert_eq!(ReentrancyStatus::Unlocked as u8, 0);
    assert_eq!(ReentrancyStatus::Locked as u8, 1);
    assert_eq!(ReentrancyStatus::default(), ReentrancyStatus::Unlocked);
}
