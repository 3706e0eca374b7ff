//! Deployed exchange with funded accounts

use ed25519_dalek::SigningKey;
use pairswap::{
    AddLiquidityNativeParams, AddLiquidityParams, ExchangeConfig, Router, Runtime, SwapExactIn, SwapExactOut,
};
use pairswap_assets::account_address;
use pairswap_core::Address;

use super::tracing::init_test_tracing;

pub const E18: u128 = 1_000_000_000_000_000_000;

/// Starting clock for every fixture
pub const GENESIS: u64 = 1_000;

/// Token supply minted to the main wallet
pub const SUPPLY: u128 = 10_000 * E18;

/// Deterministic ed25519 account
pub struct Account {
    pub key: SigningKey,
    pub address: Address,
}

impl Account {
    pub fn from_seed(seed: u8) -> Self {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let address = account_address(&key.verifying_key());
        Self { key, address }
    }
}

pub struct TestExchange {
    pub rt: Runtime,
    pub router: Router,
    pub wallet: Account,
    pub other: Account,
    pub token_a: Address,
    pub token_b: Address,
    pub token_c: Address,
    pub wrapped: Address,
}

impl TestExchange {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(ExchangeConfig::default())
    }

    /// Deploy from `config`; the wallet holds every token and native coin and
    /// has approved the router for all of them
    pub fn with_config(config: ExchangeConfig) -> anyhow::Result<Self> {
        init_test_tracing();

        let (mut rt, router) = config.deploy()?;
        let wallet = Account::from_seed(1);
        let other = Account::from_seed(2);

        let ledger = rt.ledger_mut();
        let token_a = ledger.create_token(wallet.address, "Token A", "TKA", 18, SUPPLY)?;
        let token_b = ledger.create_token(wallet.address, "Token B", "TKB", 18, SUPPLY)?;
        let token_c = ledger.create_token(wallet.address, "Token C", "TKC", 18, SUPPLY)?;
        ledger.credit_native(wallet.address, SUPPLY)?;
        for token in [token_a, token_b, token_c] {
            ledger.approve(&token, wallet.address, router.address(), u128::MAX)?;
        }
        rt.set_time(GENESIS);

        Ok(Self {
            wrapped: router.wrapped_native(),
            rt,
            router,
            wallet,
            other,
            token_a,
            token_b,
            token_c,
        })
    }

    /// Fee-on-transfer token owned and router-approved by the wallet
    pub fn fee_on_transfer_token(&mut self, fee_bps: u16) -> anyhow::Result<Address> {
        let wallet = self.wallet.address;
        let router = self.router.address();
        let ledger = self.rt.ledger_mut();
        let token = ledger.create_fee_on_transfer_token(wallet, "Taxed", "TAX", SUPPLY, fee_bps)?;
        ledger.approve(&token, wallet, router, u128::MAX)?;
        Ok(token)
    }

    pub fn deadline(&self) -> u64 {
        self.rt.now() + 600
    }

    pub fn balance(&self, asset: Address, owner: Address) -> u128 {
        self.rt.ledger().balance_of(&asset, &owner).unwrap_or(0)
    }

    pub fn native(&self, owner: Address) -> u128 {
        self.rt.ledger().native_balance_of(&owner)
    }

    pub fn pool(&self, asset_a: Address, asset_b: Address) -> anyhow::Result<Address> {
        self.rt
            .registry()
            .get_pool(asset_a, asset_b)
            .ok_or_else(|| anyhow::anyhow!("no pool for pair"))
    }

    /// Reserves ordered as `(reserve of asset_a, reserve of asset_b)`
    pub fn reserves(&self, asset_a: Address, asset_b: Address) -> anyhow::Result<(u128, u128)> {
        Ok(self.rt.registry().reserves(asset_a, asset_b)?)
    }

    /// Wallet deposits exactly the given amounts into the pair
    pub fn add_liquidity(
        &mut self,
        asset_a: Address,
        asset_b: Address,
        amount_a: u128,
        amount_b: u128,
    ) -> anyhow::Result<(u128, u128, u128)> {
        let params = AddLiquidityParams {
            asset_a,
            asset_b,
            amount_a_desired: amount_a,
            amount_b_desired: amount_b,
            amount_a_min: 0,
            amount_b_min: 0,
            to: self.wallet.address,
            deadline: self.deadline(),
        };
        Ok(self.router.add_liquidity(&mut self.rt, self.wallet.address, params)?)
    }

    pub fn add_liquidity_native(
        &mut self,
        token: Address,
        amount_token: u128,
        amount_native: u128,
    ) -> anyhow::Result<(u128, u128, u128)> {
        let params = AddLiquidityNativeParams {
            token,
            amount_token_desired: amount_token,
            amount_native_desired: amount_native,
            amount_token_min: 0,
            amount_native_min: 0,
            to: self.wallet.address,
            deadline: self.deadline(),
        };
        Ok(self.router.add_liquidity_native(&mut self.rt, self.wallet.address, params)?)
    }

    pub fn exact_in(&self, amount_in: u128, amount_out_min: u128, path: &[Address]) -> SwapExactIn {
        SwapExactIn {
            amount_in,
            amount_out_min,
            path: path.to_vec(),
            to: self.wallet.address,
            deadline: self.deadline(),
        }
    }

    pub fn exact_out(&self, amount_out: u128, amount_in_max: u128, path: &[Address]) -> SwapExactOut {
        SwapExactOut {
            amount_out,
            amount_in_max,
            path: path.to_vec(),
            to: self.wallet.address,
            deadline: self.deadline(),
        }
    }
}
