//! # PairSwap Assets
//!
//! The collaborators the exchange moves value through. Pools and routers only
//! see the [`FungibleAsset`], [`PermitAsset`] and [`NativeWrapper`] traits and
//! the [`Ledger`] that hosts every asset; the in-memory implementations here
//! stand in for whatever token contracts the host provides.

pub mod asset;
pub mod error;
pub mod ledger;
pub mod permit;
pub mod token;
pub mod wrapped;

pub use asset::{Asset, FungibleAsset, NativeWrapper, PermitAsset};
pub use error::{AssetError, AssetResult};
pub use ledger::Ledger;
pub use permit::{account_address, PermitMessage, PermitSignature};
pub use token::Token;
pub use wrapped::WrappedNative;
