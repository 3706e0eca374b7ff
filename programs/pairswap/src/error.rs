//! Error definitions

use pairswap_assets::AssetError;
use pairswap_core::{Address, CoreError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    // Input validation errors
    #[error("Identical assets")]
    IdenticalAssets,

    #[error("Zero asset")]
    ZeroAsset,

    #[error("Invalid path: {0}")]
    InvalidPath(&'static str),

    #[error("Expired: deadline {deadline} passed at {now}")]
    Expired { deadline: u64, now: u64 },

    // Economic errors
    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[error("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Excessive input amount")]
    ExcessiveInputAmount,

    #[error("Insufficient A amount")]
    InsufficientAAmount,

    #[error("Insufficient B amount")]
    InsufficientBAmount,

    #[error("Insufficient amount")]
    InsufficientAmount,

    #[error("K")]
    K,

    // Liquidity errors
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    // Pool safety errors
    #[error("Invalid to")]
    InvalidTo,

    #[error("Locked")]
    Locked,

    #[error("Overflow")]
    Overflow,

    #[error("Swap ticket does not belong to pool {0}")]
    InvalidSwapTicket(Address),

    // Registry errors
    #[error("Pool exists: {0}")]
    PoolExists(Address),

    #[error("No pool for {0} / {1}")]
    UnknownPool(Address, Address),

    #[error("Unknown pool: {0}")]
    UnknownPoolAddress(Address),

    #[error("Router is bound to registry {0}, runtime hosts another")]
    UnknownRegistry(Address),

    // Configuration errors
    #[error("Invalid configuration: {field} = {value}, expected {expected}")]
    InvalidConfig {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    // Collaborator errors
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("Math error: {0}")]
    Math(CoreError),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    pub fn invalid_config(field: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

impl From<CoreError> for ExchangeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientInputAmount => Self::InsufficientInputAmount,
            CoreError::InsufficientOutputAmount => Self::InsufficientOutputAmount,
            CoreError::InsufficientAmount => Self::InsufficientAmount,
            CoreError::InsufficientLiquidity => Self::InsufficientLiquidity,
            CoreError::InvalidPath(reason) => Self::InvalidPath(reason),
            CoreError::IdenticalAssets => Self::IdenticalAssets,
            CoreError::ZeroAsset => Self::ZeroAsset,
            CoreError::MathOverflow | CoreError::ConversionError => Self::Overflow,
            other => Self::Math(other),
        }
    }
}
