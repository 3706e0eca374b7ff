use std::fs;
use std::path::Path;

use pairswap_assets::Ledger;
use pairswap_core::math::FeeRate;
use pairswap_core::MAX_FEE_DENOMINATOR;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ExchangeError, ExchangeResult};
use crate::router::Router;
use crate::runtime::Runtime;
use crate::state::PoolRegistry;

/// Exchange deployment configuration loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExchangeConfig {
    pub registry: RegistryConfig,

    /// Metadata for every pool share token
    pub share_token: TokenMetadata,

    /// Metadata for the wrapped native asset created at deployment
    pub wrapped_native: TokenMetadata,

    pub router: RouterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Seed the registry address is derived from
    pub seed: String,

    /// Swap fee as `fee_numerator / fee_denominator` of the input
    pub fee_numerator: u64,
    pub fee_denominator: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Seed the router address is derived from
    pub seed: String,
}

impl ExchangeConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> ExchangeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ExchangeError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ExchangeResult<Self> {
        let config: ExchangeConfig = toml::from_str(content)
            .map_err(|e| ExchangeError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> ExchangeResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ExchangeError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            ExchangeError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ExchangeResult<()> {
        if self.registry.seed.is_empty() {
            return Err(ExchangeError::invalid_config("registry.seed", "empty", "non-empty string"));
        }

        if self.registry.fee_denominator == 0 {
            return Err(ExchangeError::invalid_config("registry.fee_denominator", 0, "greater than 0"));
        }

        if self.registry.fee_denominator as u128 > MAX_FEE_DENOMINATOR {
            return Err(ExchangeError::invalid_config(
                "registry.fee_denominator",
                self.registry.fee_denominator,
                "at most 2^32",
            ));
        }

        if self.registry.fee_numerator >= self.registry.fee_denominator {
            return Err(ExchangeError::invalid_config(
                "registry.fee_numerator",
                self.registry.fee_numerator,
                "less than fee_denominator",
            ));
        }

        self.share_token.validate("share_token")?;
        self.wrapped_native.validate("wrapped_native")?;

        if self.router.seed.is_empty() {
            return Err(ExchangeError::invalid_config("router.seed", "empty", "non-empty string"));
        }

        Ok(())
    }

    pub fn fee_rate(&self) -> ExchangeResult<FeeRate> {
        Ok(FeeRate::new(
            self.registry.fee_numerator as u128,
            self.registry.fee_denominator as u128,
        )?)
    }

    /// Build an empty exchange: a ledger holding only the wrapped native
    /// asset, the registry, and a router bound to both
    pub fn deploy(&self) -> ExchangeResult<(Runtime, Router)> {
        self.validate()?;

        let mut ledger = Ledger::new();
        let wrapped = ledger.create_wrapped_native(
            &self.wrapped_native.name,
            &self.wrapped_native.symbol,
            self.wrapped_native.decimals,
        )?;

        let registry = PoolRegistry::new(
            self.registry.seed.as_bytes(),
            self.fee_rate()?,
            self.share_token.name.as_str(),
            self.share_token.symbol.as_str(),
        )?
        .with_share_decimals(self.share_token.decimals);
        info!(registry = %registry.address(), fee = ?registry.fee(), "deployed registry");

        let router = Router::new(self.router.seed.as_bytes(), &registry, wrapped);
        Ok((Runtime::new(ledger, registry, 0), router))
    }
}

impl TokenMetadata {
    fn validate(&self, section: &'static str) -> ExchangeResult<()> {
        if self.name.is_empty() {
            return Err(ExchangeError::invalid_config(section, "empty name", "non-empty string"));
        }

        if self.symbol.is_empty() {
            return Err(ExchangeError::invalid_config(section, "empty symbol", "non-empty string"));
        }

        Ok(())
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig {
                seed: "pairswap".to_string(),
                fee_numerator: 3,
                fee_denominator: 1_000,
            },
            share_token: TokenMetadata {
                name: "PairSwap Shares".to_string(),
                symbol: "PSS".to_string(),
                decimals: pairswap_core::SHARE_DECIMALS,
            },
            wrapped_native: TokenMetadata {
                name: "Wrapped Native".to_string(),
                symbol: "WNATIVE".to_string(),
                decimals: 18,
            },
            router: RouterConfig {
                seed: "pairswap-router".to_string(),
            },
        }
    }
}
