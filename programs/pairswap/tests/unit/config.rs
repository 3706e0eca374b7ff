//! Configuration loading and deployment

use crate::common::*;
use pairswap_core::math::FeeRate;

#[test]
fn test_save_then_load() -> anyhow::Result<()> {
    let mut config = ExchangeConfig::default();
    config.registry.fee_numerator = 2;
    config.wrapped_native.symbol = "WETH".to_string();

    let path = std::env::temp_dir().join(format!("pairswap-config-{}.toml", std::process::id()));
    config.save(&path)?;
    let loaded = ExchangeConfig::load(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(loaded, config);
    assert_eq!(loaded.fee_rate()?, FeeRate { numerator: 2, denominator: 1_000 });
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = ExchangeConfig::load("/nonexistent/pairswap.toml");
    assert!(matches!(result, Err(ExchangeError::Config(_))));
}

#[test]
fn test_from_toml_validates() {
    let text = r#"
        [registry]
        seed = "x"
        fee_numerator = 0
        fee_denominator = 0

        [share_token]
        name = "S"
        symbol = "S"
        decimals = 18

        [wrapped_native]
        name = "W"
        symbol = "W"
        decimals = 18

        [router]
        seed = "r"
    "#;
    assert!(matches!(
        ExchangeConfig::from_toml_str(text),
        Err(ExchangeError::InvalidConfig { field: "registry.fee_denominator", .. })
    ));
}

#[test]
fn test_empty_names_rejected() {
    let mut config = ExchangeConfig::default();
    config.share_token.symbol.clear();
    assert!(matches!(
        config.validate(),
        Err(ExchangeError::InvalidConfig { field: "share_token", .. })
    ));
}

#[test]
fn test_deploy_binds_router() -> anyhow::Result<()> {
    let (rt, router) = ExchangeConfig::default().deploy()?;
    assert_eq!(router.registry(), rt.registry().address());
    assert!(rt.ledger().is_native_wrapper(&router.wrapped_native()));
    assert_eq!(rt.registry().fee(), FeeRate::DEFAULT);
    assert_eq!(rt.registry().all_pools_len(), 0);
    Ok(())
}

#[test]
fn test_same_config_same_addresses() -> anyhow::Result<()> {
    let (_, first) = ExchangeConfig::default().deploy()?;
    let (_, second) = ExchangeConfig::default().deploy()?;
    assert_eq!(first, second);
    Ok(())
}
