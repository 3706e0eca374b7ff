//! In-memory fungible token with permit support.
//!
//! A token can optionally burn a fixed share of every transfer, which is how
//! fee-on-transfer assets behave from a pool's point of view.

use std::collections::BTreeMap;

use pairswap_core::{Address, Event, EventKind};

use crate::asset::{FungibleAsset, PermitAsset};
use crate::error::{AssetError, AssetResult};
use crate::permit::{domain_separator, PermitMessage, PermitSignature};

/// Basis points denominator for transfer fees (10,000 = 100%)
pub const TRANSFER_FEE_DENOMINATOR: u128 = 10_000;

#[derive(Debug, Clone)]
pub struct Token {
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    /// Only this account may mint or burn
    minter: Address,
    total_supply: u128,
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<(Address, Address), u128>,
    nonces: BTreeMap<Address, u64>,
    /// Share of each transfer burned, in basis points
    transfer_fee_bps: u16,
    events: Vec<Event>,
}

impl Token {
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        minter: Address,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            minter,
            total_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            nonces: BTreeMap::new(),
            transfer_fee_bps: 0,
            events: Vec::new(),
        }
    }

    /// Burn `bps` of every transfer
    pub fn with_transfer_fee(mut self, bps: u16) -> AssetResult<Self> {
        if bps as u128 >= TRANSFER_FEE_DENOMINATOR {
            return Err(AssetError::InvalidTransferFee(bps));
        }
        self.transfer_fee_bps = bps;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn minter(&self) -> Address {
        self.minter
    }

    pub fn transfer_fee_bps(&self) -> u16 {
        self.transfer_fee_bps
    }

    pub fn mint(&mut self, caller: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.ensure_minter(caller)?;
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(AssetError::SupplyOverflow)?;
        self.credit(to, amount)?;
        self.emit(EventKind::Transfer { from: Address::ZERO, to, value: amount });
        Ok(())
    }

    pub fn burn(&mut self, caller: Address, from: Address, amount: u128) -> AssetResult<()> {
        self.ensure_minter(caller)?;
        self.debit(from, amount)?;
        self.total_supply -= amount;
        self.emit(EventKind::Transfer { from, to: Address::ZERO, value: amount });
        Ok(())
    }

    fn ensure_minter(&self, caller: Address) -> AssetResult<()> {
        if caller != self.minter {
            return Err(AssetError::Unauthorized { asset: self.address, caller });
        }
        Ok(())
    }

    pub(crate) fn emit(&mut self, kind: EventKind) {
        self.events.push(Event::new(self.address, kind));
    }

    fn debit(&mut self, owner: Address, amount: u128) -> AssetResult<()> {
        let available = self.balance_of(&owner);
        if available < amount {
            return Err(AssetError::InsufficientBalance { owner, available, required: amount });
        }
        let remaining = available - amount;
        if remaining == 0 {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, remaining);
        }
        Ok(())
    }

    fn credit(&mut self, owner: Address, amount: u128) -> AssetResult<()> {
        let balance = self.balances.entry(owner).or_default();
        *balance = balance.checked_add(amount).ok_or(AssetError::SupplyOverflow)?;
        Ok(())
    }

    /// Share of `amount` burned on transfer. Split so the product cannot overflow.
    fn transfer_fee(&self, amount: u128) -> u128 {
        let bps = self.transfer_fee_bps as u128;
        amount / TRANSFER_FEE_DENOMINATOR * bps
            + amount % TRANSFER_FEE_DENOMINATOR * bps / TRANSFER_FEE_DENOMINATOR
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        ensure_nonzero(from, "sender")?;
        self.debit(from, amount)?;

        // Fee never exceeds amount, so balances and supply stay consistent
        let fee = self.transfer_fee(amount);
        let received = amount - fee;

        self.credit(to, received)?;
        self.emit(EventKind::Transfer { from, to, value: received });

        if fee > 0 {
            self.total_supply -= fee;
            self.emit(EventKind::Transfer { from, to: Address::ZERO, value: fee });
        }
        Ok(())
    }

    fn spend_allowance(&mut self, owner: Address, spender: Address, amount: u128) -> AssetResult<()> {
        let available = self.allowance(&owner, &spender);
        if available == u128::MAX {
            return Ok(());
        }
        if available < amount {
            return Err(AssetError::InsufficientAllowance {
                owner,
                spender,
                available,
                required: amount,
            });
        }
        self.allowances.insert((owner, spender), available - amount);
        Ok(())
    }
}

fn ensure_nonzero(account: Address, role: &'static str) -> AssetResult<()> {
    if account.is_zero() {
        return Err(AssetError::ZeroAccount(role));
    }
    Ok(())
}

impl FungibleAsset for Token {
    fn address(&self) -> Address {
        self.address
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }

    fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: u128) -> AssetResult<()> {
        ensure_nonzero(owner, "owner")?;
        ensure_nonzero(spender, "spender")?;
        self.allowances.insert((owner, spender), amount);
        self.emit(EventKind::Approval { owner, spender, value: amount });
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: u128) -> AssetResult<()> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> AssetResult<()> {
        ensure_nonzero(spender, "spender")?;
        ensure_nonzero(from, "sender")?;
        self.spend_allowance(from, spender, amount)?;
        self.move_balance(from, to, amount)
    }

    fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl PermitAsset for Token {
    fn nonce(&self, owner: &Address) -> u64 {
        self.nonces.get(owner).copied().unwrap_or(0)
    }

    fn domain_separator(&self) -> [u8; 32] {
        domain_separator(&self.address, &self.name)
    }

    fn permit(
        &mut self,
        message: &PermitMessage,
        signature: &PermitSignature,
        now: u64,
    ) -> AssetResult<()> {
        if now > message.deadline {
            return Err(AssetError::PermitExpired);
        }
        // A stale or future nonce changes the digest, so it fails verification
        let expected = PermitMessage { nonce: self.nonce(&message.owner), ..*message };
        expected.verify(&self.domain_separator(), signature)?;

        self.nonces.insert(message.owner, expected.nonce + 1);
        self.approve(message.owner, message.spender, message.value)
    }
}
