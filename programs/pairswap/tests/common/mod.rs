//! Shared test infrastructure

pub mod assertions;
pub mod fixtures;
pub mod tracing;

pub use assertions::*;
pub use fixtures::*;

pub use pairswap::{
    AddLiquidityParams, ExchangeConfig, ExchangeError, FlashSwap, FlashSwapCallee, FlashSwapContext, FlashSwapHost,
    PermitParams, RemoveLiquidityNativeParams, RemoveLiquidityParams,
};
pub use pairswap_assets::{AssetError, PermitMessage};
pub use pairswap_core::{Address, EventKind, MINIMUM_LIQUIDITY};
