//! Pool registry.
//!
//! At most one pool exists per unordered asset pair. Pool addresses are
//! derived from the registry address and the sorted pair, so anyone can
//! compute where a pool lives without asking the registry.

use std::collections::BTreeMap;

use pairswap_assets::{Asset, Ledger, Token};
use pairswap_core::math::{sort_assets, FeeRate};
use pairswap_core::{Address, Event, EventKind, POOL_ID_DOMAIN, REGISTRY_ID_DOMAIN, SHARE_DECIMALS};
use tracing::info;

use crate::error::{ExchangeError, ExchangeResult};
use crate::state::pool::Pool;

#[derive(Debug, Clone)]
pub struct PoolRegistry {
    address: Address,
    fee: FeeRate,
    share_name: String,
    share_symbol: String,
    share_decimals: u8,
    /// Keyed by the sorted pair
    pools: BTreeMap<(Address, Address), Pool>,
    /// Creation order
    all_pools: Vec<Address>,
    by_address: BTreeMap<Address, (Address, Address)>,
}

impl PoolRegistry {
    pub fn new(
        seed: &[u8],
        fee: FeeRate,
        share_name: impl Into<String>,
        share_symbol: impl Into<String>,
    ) -> ExchangeResult<Self> {
        fee.validate()?;
        Ok(Self {
            address: Address::derive(REGISTRY_ID_DOMAIN, &[seed]),
            fee,
            share_name: share_name.into(),
            share_symbol: share_symbol.into(),
            share_decimals: SHARE_DECIMALS,
            pools: BTreeMap::new(),
            all_pools: Vec::new(),
            by_address: BTreeMap::new(),
        })
    }

    /// Decimals advertised by pool share tokens created from now on
    pub fn with_share_decimals(mut self, decimals: u8) -> Self {
        self.share_decimals = decimals;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Deterministic pool address for a pair, whether or not it exists yet
    pub fn pool_address_for(registry: &Address, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        let (asset0, asset1) = sort_assets(asset_a, asset_b)?;
        Ok(Address::derive(
            POOL_ID_DOMAIN,
            &[registry.as_bytes(), asset0.as_bytes(), asset1.as_bytes()],
        ))
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Pool for a pair in either order
    pub fn get_pool(&self, asset_a: Address, asset_b: Address) -> Option<Address> {
        let key = sort_assets(asset_a, asset_b).ok()?;
        self.pools.get(&key).map(Pool::address)
    }

    pub fn pool(&self, address: &Address) -> ExchangeResult<&Pool> {
        self.by_address
            .get(address)
            .and_then(|key| self.pools.get(key))
            .ok_or(ExchangeError::UnknownPoolAddress(*address))
    }

    pub fn pool_for(&self, asset_a: Address, asset_b: Address) -> ExchangeResult<&Pool> {
        let key = sort_assets(asset_a, asset_b)?;
        self.pools
            .get(&key)
            .ok_or(ExchangeError::UnknownPool(asset_a, asset_b))
    }

    pub(crate) fn pool_mut(&mut self, address: &Address) -> ExchangeResult<&mut Pool> {
        let key = self
            .by_address
            .get(address)
            .ok_or(ExchangeError::UnknownPoolAddress(*address))?;
        self.pools
            .get_mut(key)
            .ok_or(ExchangeError::UnknownPoolAddress(*address))
    }

    /// Every pool address in creation order
    pub fn all_pools(&self) -> &[Address] {
        &self.all_pools
    }

    pub fn all_pools_len(&self) -> usize {
        self.all_pools.len()
    }

    /// Reserves of the pair's pool ordered as `(reserve_in, reserve_out)`
    pub fn reserves(&self, asset_in: Address, asset_out: Address) -> ExchangeResult<(u128, u128)> {
        self.pool_for(asset_in, asset_out)?.reserves_for(&asset_in)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create the pool for a pair; fails if one already exists
    pub(crate) fn create_pool(&mut self, ledger: &mut Ledger, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        let key = sort_assets(asset_a, asset_b)?;
        if let Some(existing) = self.pools.get(&key) {
            return Err(ExchangeError::PoolExists(existing.address()));
        }

        let address = Self::pool_address_for(&self.address, key.0, key.1)?;
        let shares = Token::new(
            address,
            self.share_name.as_str(),
            self.share_symbol.as_str(),
            self.share_decimals,
            address,
        );
        ledger.register(Asset::Token(shares))?;

        self.pools.insert(key, Pool::new(address, self.address, key.0, key.1, self.fee));
        self.by_address.insert(address, key);
        self.all_pools.push(address);

        let index = self.all_pools.len() as u64;
        ledger.emit(Event::new(
            self.address,
            EventKind::PoolCreated { asset0: key.0, asset1: key.1, pool: address, index },
        ));
        info!(pool = %address, asset0 = %key.0, asset1 = %key.1, index, "created pool");
        Ok(address)
    }

    /// Pool for a pair, creating it on first use
    pub(crate) fn get_or_create(&mut self, ledger: &mut Ledger, asset_a: Address, asset_b: Address) -> ExchangeResult<Address> {
        match self.get_pool(asset_a, asset_b) {
            Some(address) => Ok(address),
            None => self.create_pool(ledger, asset_a, asset_b),
        }
    }
}
