//! Exchange state

pub mod pool;
pub mod registry;
pub mod security;

pub use pool::{Pool, SwapInputs, SwapTicket};
pub use registry::PoolRegistry;
pub use security::{ReentrancyGuard, ReentrancyStatus};
