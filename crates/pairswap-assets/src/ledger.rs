//! Host-side ledger holding every asset, native coin balances and the
//! event log.

use std::collections::BTreeMap;

use pairswap_core::{Address, Event, ASSET_ID_DOMAIN};
use tracing::{debug, trace};

use crate::asset::{Asset, FungibleAsset, NativeWrapper, PermitAsset};
use crate::error::{AssetError, AssetResult};
use crate::permit::{PermitMessage, PermitSignature};
use crate::token::Token;
use crate::wrapped::WrappedNative;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    assets: BTreeMap<Address, Asset>,
    native: BTreeMap<Address, u128>,
    events: Vec<Event>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Asset Registry
    // ========================================================================

    pub fn register(&mut self, asset: Asset) -> AssetResult<Address> {
        let address = asset.address();
        if self.assets.contains_key(&address) {
            return Err(AssetError::AssetExists(address));
        }
        debug!(asset = %address, symbol = asset.as_token().symbol(), "registered asset");
        self.assets.insert(address, asset);
        Ok(address)
    }

    /// Create a token minted entirely to `issuer`, who stays its minter
    pub fn create_token(
        &mut self,
        issuer: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: u128,
    ) -> AssetResult<Address> {
        let address = self.next_asset_address(issuer, symbol);
        let token = Token::new(address, name, symbol, decimals, issuer);
        self.register(Asset::Token(token))?;
        self.mint(&address, issuer, issuer, initial_supply)?;
        Ok(address)
    }

    /// Like [`Ledger::create_token`], but burning `transfer_fee_bps` of every transfer
    pub fn create_fee_on_transfer_token(
        &mut self,
        issuer: Address,
        name: &str,
        symbol: &str,
        initial_supply: u128,
        transfer_fee_bps: u16,
    ) -> AssetResult<Address> {
        let address = self.next_asset_address(issuer, symbol);
        let token = Token::new(address, name, symbol, 18, issuer).with_transfer_fee(transfer_fee_bps)?;
        self.register(Asset::Token(token))?;
        self.mint(&address, issuer, issuer, initial_supply)?;
        Ok(address)
    }

    pub fn create_wrapped_native(&mut self, name: &str, symbol: &str, decimals: u8) -> AssetResult<Address> {
        let address = Address::derive(ASSET_ID_DOMAIN, &[b"native", name.as_bytes(), symbol.as_bytes()]);
        self.register(Asset::WrappedNative(WrappedNative::new(address, name, symbol, decimals)))
    }

    fn next_asset_address(&self, issuer: Address, symbol: &str) -> Address {
        let index = self.assets.len() as u64;
        Address::derive(
            ASSET_ID_DOMAIN,
            &[issuer.as_bytes(), symbol.as_bytes(), &index.to_be_bytes()],
        )
    }

    pub fn contains(&self, asset: &Address) -> bool {
        self.assets.contains_key(asset)
    }

    pub fn asset(&self, asset: &Address) -> AssetResult<&Asset> {
        self.assets.get(asset).ok_or(AssetError::UnknownAsset(*asset))
    }

    pub fn is_native_wrapper(&self, asset: &Address) -> bool {
        matches!(self.assets.get(asset), Some(Asset::WrappedNative(_)))
    }

    /// Run a mutation against one asset and move its events into the log
    fn with_asset<T>(
        &mut self,
        asset: &Address,
        f: impl FnOnce(&mut Asset) -> AssetResult<T>,
    ) -> AssetResult<T> {
        let entry = self
            .assets
            .get_mut(asset)
            .ok_or(AssetError::UnknownAsset(*asset))?;
        let result = f(&mut *entry);
        self.events.extend(entry.drain_events());
        result
    }

    // ========================================================================
    // Fungible Asset Operations
    // ========================================================================

    pub fn balance_of(&self, asset: &Address, owner: &Address) -> AssetResult<u128> {
        Ok(self.asset(asset)?.balance_of(owner))
    }

    pub fn total_supply(&self, asset: &Address) -> AssetResult<u128> {
        Ok(self.asset(asset)?.total_supply())
    }

    pub fn allowance(&self, asset: &Address, owner: &Address, spender: &Address) -> AssetResult<u128> {
        Ok(self.asset(asset)?.allowance(owner, spender))
    }

    pub fn nonce(&self, asset: &Address, owner: &Address) -> AssetResult<u64> {
        Ok(self.asset(asset)?.nonce(owner))
    }

    pub fn domain_separator(&self, asset: &Address) -> AssetResult<[u8; 32]> {
        Ok(self.asset(asset)?.domain_separator())
    }

    pub fn approve(&mut self, asset: &Address, owner: Address, spender: Address, amount: u128) -> AssetResult<()> {
        self.with_asset(asset, |a| a.approve(owner, spender, amount))
    }

    pub fn transfer(&mut self, asset: &Address, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        trace!(asset = %asset, %from, %to, amount, "transfer");
        self.with_asset(asset, |a| a.transfer(from, to, amount))
    }

    pub fn transfer_from(
        &mut self,
        asset: &Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> AssetResult<()> {
        trace!(asset = %asset, %spender, %from, %to, amount, "transfer_from");
        self.with_asset(asset, |a| a.transfer_from(spender, from, to, amount))
    }

    pub fn permit(
        &mut self,
        asset: &Address,
        message: &PermitMessage,
        signature: &PermitSignature,
        now: u64,
    ) -> AssetResult<()> {
        self.with_asset(asset, |a| a.permit(message, signature, now))
    }

    pub fn mint(&mut self, asset: &Address, minter: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.with_asset(asset, |a| a.mint(minter, to, amount))
    }

    pub fn burn(&mut self, asset: &Address, minter: Address, from: Address, amount: u128) -> AssetResult<()> {
        self.with_asset(asset, |a| a.burn(minter, from, amount))
    }

    // ========================================================================
    // Native Coin
    // ========================================================================

    pub fn native_balance_of(&self, account: &Address) -> u128 {
        self.native.get(account).copied().unwrap_or(0)
    }

    /// Create native coin out of thin air; genesis funding only
    pub fn credit_native(&mut self, account: Address, amount: u128) -> AssetResult<()> {
        let balance = self.native.entry(account).or_default();
        *balance = balance.checked_add(amount).ok_or(AssetError::SupplyOverflow)?;
        Ok(())
    }

    pub fn transfer_native(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        if from.is_zero() {
            return Err(AssetError::ZeroAccount("sender"));
        }
        let available = self.native_balance_of(&from);
        if available < amount {
            return Err(AssetError::InsufficientNativeBalance {
                account: from,
                available,
                required: amount,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .native_balance_of(&to)
            .checked_add(amount)
            .ok_or(AssetError::SupplyOverflow)?;
        self.native.insert(from, available - amount);
        self.native.insert(to, credited);
        Ok(())
    }

    /// Move `value` native coin from `account` into the wrapper and credit
    /// the same amount of wrapped asset
    pub fn deposit(&mut self, wrapper: &Address, account: Address, value: u128) -> AssetResult<()> {
        self.transfer_native(account, *wrapper, value)?;
        self.with_asset(wrapper, |a| {
            a.as_wrapper_mut()
                .ok_or(AssetError::NotNativeWrapper(*wrapper))?
                .deposit(account, value)
        })?;
        debug!(%wrapper, %account, value, "wrapped native");
        Ok(())
    }

    /// Burn `amount` wrapped asset from `account` and release the native coin
    pub fn withdraw(&mut self, wrapper: &Address, account: Address, amount: u128) -> AssetResult<()> {
        self.with_asset(wrapper, |a| {
            a.as_wrapper_mut()
                .ok_or(AssetError::NotNativeWrapper(*wrapper))?
                .withdraw(account, amount)
        })?;
        self.transfer_native(*wrapper, account, amount)?;
        debug!(%wrapper, %account, amount, "unwrapped native");
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
