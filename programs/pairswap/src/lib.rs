//! # PairSwap
//!
//! Constant-product exchange: two-asset pools that issue shares, a registry
//! creating at most one pool per pair, and a router with slippage and
//! deadline protection for liquidity changes and multi-hop swaps.
//!
//! Everything runs against an explicit [`Runtime`] holding the asset ledger,
//! the registry and the clock. Router entry points and the low-level pool
//! operations on `Runtime` are each one transaction: they either apply in
//! full or leave the runtime untouched.
//!
//! ```ignore
//! let (mut rt, router) = ExchangeConfig::default().deploy()?;
//! let amounts = router.swap_exact_tokens_for_tokens(&mut rt, caller, &params)?;
//! ```

pub mod config;
pub mod error;
pub mod instructions;
pub mod router;
pub mod runtime;
pub mod state;

pub use config::ExchangeConfig;
pub use error::{ExchangeError, ExchangeResult};
pub use instructions::{
    AddLiquidityNativeParams, AddLiquidityParams, PermitParams, RemoveLiquidityNativeParams,
    RemoveLiquidityParams, SwapExactIn, SwapExactOut,
};
pub use router::Router;
pub use runtime::{FlashSwap, FlashSwapCallee, FlashSwapContext, FlashSwapHost, Runtime};
pub use state::{Pool, PoolRegistry, SwapInputs, SwapTicket};
