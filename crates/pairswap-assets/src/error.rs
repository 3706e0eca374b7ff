//! Error definitions

use pairswap_core::{Address, CoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    // ========================================================================
    // Balance Errors
    // ========================================================================

    #[error("Insufficient balance: {owner} holds {available}, needs {required}")]
    InsufficientBalance {
        owner: Address,
        available: u128,
        required: u128,
    },

    #[error("Insufficient allowance: {spender} may spend {available} of {owner}, needs {required}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        available: u128,
        required: u128,
    },

    #[error("Insufficient native balance: {account} holds {available}, needs {required}")]
    InsufficientNativeBalance {
        account: Address,
        available: u128,
        required: u128,
    },

    #[error("Supply overflow")]
    SupplyOverflow,

    #[error("Zero address cannot act as {0}")]
    ZeroAccount(&'static str),

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Unknown asset: {0}")]
    UnknownAsset(Address),

    #[error("Asset already registered: {0}")]
    AssetExists(Address),

    #[error("Asset {0} is not a native wrapper")]
    NotNativeWrapper(Address),

    #[error("{caller} is not the minter of {asset}")]
    Unauthorized { asset: Address, caller: Address },

    #[error("Invalid transfer fee: {0} bps")]
    InvalidTransferFee(u16),

    // ========================================================================
    // Permit Errors
    // ========================================================================

    #[error("Permit expired")]
    PermitExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AssetResult<T> = Result<T, AssetError>;
