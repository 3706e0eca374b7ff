//! Wrapped native coin.

use pairswap_core::{Address, EventKind};

use crate::asset::{FungibleAsset, NativeWrapper};
use crate::error::AssetResult;
use crate::token::Token;

/// A token minted 1:1 against native coin held in the wrapper's custody.
/// The wrapper is its own minter.
#[derive(Debug, Clone)]
pub struct WrappedNative {
    token: Token,
}

impl WrappedNative {
    pub fn new(address: Address, name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self { token: Token::new(address, name, symbol, decimals, address) }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub(crate) fn token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

impl NativeWrapper for WrappedNative {
    fn deposit(&mut self, account: Address, value: u128) -> AssetResult<()> {
        let wrapper = self.token.minter();
        self.token.mint(wrapper, account, value)?;
        self.token.emit(EventKind::Deposit { account, amount: value });
        Ok(())
    }

    fn withdraw(&mut self, account: Address, amount: u128) -> AssetResult<()> {
        let wrapper = self.token.minter();
        self.token.burn(wrapper, account, amount)?;
        self.token.emit(EventKind::Withdrawal { account, amount });
        Ok(())
    }
}

impl FungibleAsset for WrappedNative {
    fn address(&self) -> Address {
        self.token.address()
    }

    fn total_supply(&self) -> u128 {
        self.token.total_supply()
    }

    fn balance_of(&self, owner: &Address) -> u128 {
        self.token.balance_of(owner)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.token.allowance(owner, spender)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: u128) -> AssetResult<()> {
        self.token.approve(owner, spender, amount)
    }

    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.token.transfer(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> AssetResult<()> {
        self.token.transfer_from(spender, from, to, amount)
    }

    fn drain_events(&mut self) -> Vec<pairswap_core::Event> {
        self.token.drain_events()
    }
}
