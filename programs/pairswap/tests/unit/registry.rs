//! Pool registry behavior through the runtime

use crate::common::*;
use pairswap::PoolRegistry;

#[test]
fn test_create_pool_emits_and_indexes() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    let registry = ex.rt.registry().address();

    let first = ex.rt.create_pool(ex.token_b, ex.token_a)?;
    let second = ex.rt.create_pool(ex.token_a, ex.token_c)?;

    assert_eq!(ex.rt.registry().all_pools(), &[first, second]);
    assert_eq!(ex.rt.registry().all_pools_len(), 2);
    assert_eq!(first, PoolRegistry::pool_address_for(&registry, ex.token_a, ex.token_b)?);

    match last_event_from(&ex.rt, registry) {
        Some(EventKind::PoolCreated { pool, index, .. }) => {
            assert_eq!(pool, second);
            assert_eq!(index, 2);
        }
        other => panic!("expected PoolCreated, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_get_or_create_is_idempotent() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    let pool = ex.rt.get_or_create_pool(ex.token_a, ex.token_b)?;
    let events = ex.rt.ledger().events().len();

    assert_eq!(ex.rt.get_or_create_pool(ex.token_b, ex.token_a)?, pool);
    assert_eq!(ex.rt.ledger().events().len(), events);
    assert_eq!(ex.rt.registry().all_pools_len(), 1);
    Ok(())
}

#[test]
fn test_strict_create_rejects_existing_pair() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    let pool = ex.rt.create_pool(ex.token_a, ex.token_b)?;
    assert_eq!(
        ex.rt.create_pool(ex.token_b, ex.token_a),
        Err(ExchangeError::PoolExists(pool))
    );
    Ok(())
}

#[test]
fn test_pair_validation_order() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    // Identical is reported even when both sides are the zero address
    assert_eq!(
        ex.rt.create_pool(Address::ZERO, Address::ZERO),
        Err(ExchangeError::IdenticalAssets)
    );
    assert_eq!(
        ex.rt.create_pool(ex.token_a, Address::ZERO),
        Err(ExchangeError::ZeroAsset)
    );
    assert_eq!(ex.rt.registry().all_pools_len(), 0);
    Ok(())
}

#[test]
fn test_share_token_metadata_from_config() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    let pool = ex.rt.create_pool(ex.token_a, ex.token_b)?;
    let shares = ex.rt.ledger().asset(&pool)?.as_token();

    assert_eq!(shares.name(), "PairSwap Shares");
    assert_eq!(shares.symbol(), "PSS");
    assert_eq!(shares.decimals(), 18);
    assert_eq!(shares.minter(), pool);
    Ok(())
}
