//! # Core Error Types
//!
//! Error types shared by the math, oracle and identity helpers.

use thiserror::Error;

/// Core errors that can occur in any pure computation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Swap Formula Errors
    // ========================================================================

    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Insufficient amount")]
    InsufficientAmount,

    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Invalid fee: {numerator}/{denominator}")]
    InvalidFee { numerator: u128, denominator: u128 },

    // ========================================================================
    // Path and Identity Errors
    // ========================================================================

    #[error("Invalid path: {0}")]
    InvalidPath(&'static str),

    #[error("Identical assets")]
    IdenticalAssets,

    #[error("Zero asset")]
    ZeroAsset,

    #[error("Invalid address encoding: {0}")]
    InvalidAddress(String),
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
