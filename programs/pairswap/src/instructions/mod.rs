//! Router entry points. Each file adds one family of operations to
//! [`crate::router::Router`] along with its parameter structs.

pub mod liquidity_add;
pub mod liquidity_remove;
pub mod swap;
pub mod swap_fee_on_transfer;

pub use liquidity_add::{AddLiquidityNativeParams, AddLiquidityParams};
pub use liquidity_remove::{PermitParams, RemoveLiquidityNativeParams, RemoveLiquidityParams};
pub use swap::{SwapExactIn, SwapExactOut};
