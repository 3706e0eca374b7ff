//! Events emitted by assets, pools and the registry.
//!
//! Events are consumed by external indexers only; nothing in the exchange
//! reads them back.

use crate::types::address::Address;

/// An event together with the contract that emitted it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub emitter: Address,
    pub kind: EventKind,
}

impl Event {
    pub fn new(emitter: Address, kind: EventKind) -> Self {
        Self { emitter, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    // ========================================================================
    // Asset Events
    // ========================================================================

    /// Balance movement; mints come from and burns go to the zero address
    Transfer { from: Address, to: Address, value: u128 },

    Approval { owner: Address, spender: Address, value: u128 },

    /// Native coin wrapped 1:1
    Deposit { account: Address, amount: u128 },

    /// Wrapped asset returned as native coin
    Withdrawal { account: Address, amount: u128 },

    // ========================================================================
    // Registry Events
    // ========================================================================

    PoolCreated { asset0: Address, asset1: Address, pool: Address, index: u64 },

    // ========================================================================
    // Pool Events
    // ========================================================================

    Mint { sender: Address, amount0: u128, amount1: u128 },

    Burn { sender: Address, amount0: u128, amount1: u128, to: Address },

    Swap {
        sender: Address,
        amount0_in: u128,
        amount1_in: u128,
        amount0_out: u128,
        amount1_out: u128,
        to: Address,
    },

    Sync { reserve0: u128, reserve1: u128 },
}

impl EventKind {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::Deposit { .. } => "Deposit",
            Self::Withdrawal { .. } => "Withdrawal",
            Self::PoolCreated { .. } => "PoolCreated",
            Self::Mint { .. } => "Mint",
            Self::Burn { .. } => "Burn",
            Self::Swap { .. } => "Swap",
            Self::Sync { .. } => "Sync",
        }
    }
}
