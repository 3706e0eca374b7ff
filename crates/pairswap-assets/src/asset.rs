//! Asset interfaces and the closed set of asset kinds the ledger hosts.

use pairswap_core::{Address, Event};

use crate::error::AssetResult;
use crate::permit::{PermitMessage, PermitSignature};
use crate::token::Token;
use crate::wrapped::WrappedNative;

/// Balance ledger of a single fungible asset.
///
/// Every mutator takes the acting account explicitly. An allowance of
/// `u128::MAX` is treated as unlimited and never decremented.
pub trait FungibleAsset {
    fn address(&self) -> Address;

    fn total_supply(&self) -> u128;

    fn balance_of(&self, owner: &Address) -> u128;

    fn allowance(&self, owner: &Address, spender: &Address) -> u128;

    fn approve(&mut self, owner: Address, spender: Address, amount: u128) -> AssetResult<()>;

    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()>;

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> AssetResult<()>;

    /// Events emitted since the last drain
    fn drain_events(&mut self) -> Vec<Event>;
}

/// Signed off-chain approvals
pub trait PermitAsset: FungibleAsset {
    fn nonce(&self, owner: &Address) -> u64;

    fn domain_separator(&self) -> [u8; 32];

    /// Consume a signed approval; `message.nonce` must equal the owner's
    /// current nonce, which is then incremented
    fn permit(
        &mut self,
        message: &PermitMessage,
        signature: &PermitSignature,
        now: u64,
    ) -> AssetResult<()>;
}

/// 1:1 wrapper around the host's native coin. Native custody itself is moved
/// by the ledger around these calls.
pub trait NativeWrapper: FungibleAsset {
    /// Credit `account` with `value` wrapped units
    fn deposit(&mut self, account: Address, value: u128) -> AssetResult<()>;

    /// Burn `amount` wrapped units from `account`
    fn withdraw(&mut self, account: Address, amount: u128) -> AssetResult<()>;
}

/// Every asset kind a ledger can host
#[derive(Debug, Clone)]
pub enum Asset {
    Token(Token),
    WrappedNative(WrappedNative),
}

impl Asset {
    pub fn as_token(&self) -> &Token {
        match self {
            Asset::Token(token) => token,
            Asset::WrappedNative(wrapped) => wrapped.token(),
        }
    }

    fn as_token_mut(&mut self) -> &mut Token {
        match self {
            Asset::Token(token) => token,
            Asset::WrappedNative(wrapped) => wrapped.token_mut(),
        }
    }

    pub fn as_wrapper_mut(&mut self) -> Option<&mut WrappedNative> {
        match self {
            Asset::WrappedNative(wrapped) => Some(wrapped),
            Asset::Token(_) => None,
        }
    }

    pub fn mint(&mut self, caller: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.as_token_mut().mint(caller, to, amount)
    }

    pub fn burn(&mut self, caller: Address, from: Address, amount: u128) -> AssetResult<()> {
        self.as_token_mut().burn(caller, from, amount)
    }
}

impl FungibleAsset for Asset {
    fn address(&self) -> Address {
        self.as_token().address()
    }

    fn total_supply(&self) -> u128 {
        self.as_token().total_supply()
    }

    fn balance_of(&self, owner: &Address) -> u128 {
        self.as_token().balance_of(owner)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.as_token().allowance(owner, spender)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: u128) -> AssetResult<()> {
        self.as_token_mut().approve(owner, spender, amount)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.as_token_mut().transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> AssetResult<()> {
        self.as_token_mut().transfer_from(spender, from, to, amount)
    }

    fn drain_events(&mut self) -> Vec<Event> {
        self.as_token_mut().drain_events()
    }
}

impl PermitAsset for Asset {
    fn nonce(&self, owner: &Address) -> u64 {
        self.as_token().nonce(owner)
    }

    fn domain_separator(&self) -> [u8; 32] {
        self.as_token().domain_separator()
    }

    fn permit(
        &mut self,
        message: &PermitMessage,
        signature: &PermitSignature,
        now: u64,
    ) -> AssetResult<()> {
        self.as_token_mut().permit(message, signature, now)
    }
}
