//! Router swaps along token paths

use crate::common::*;

const OUT_5_10: u128 = 1_662_497_915_624_478_906;
const IN_5_10: u128 = 557_227_237_267_357_629;

fn exchange_with_pool(config: ExchangeConfig) -> anyhow::Result<TestExchange> {
    let mut ex = TestExchange::with_config(config)?;
    ex.add_liquidity(ex.token_a, ex.token_b, 5 * E18, 10 * E18)?;
    Ok(ex)
}

fn low_fee_config() -> ExchangeConfig {
    let mut config = ExchangeConfig::default();
    config.registry.fee_numerator = 2;
    config
}

#[test]
fn test_exact_in_at_default_fee() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b];
    let before = ex.balance(ex.token_b, wallet);

    let params = ex.exact_in(E18, 0, &path);
    let amounts = ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![E18, OUT_5_10]);
    assert_eq!(ex.balance(ex.token_b, wallet), before + OUT_5_10);
    assert_eq!(ex.reserves(ex.token_a, ex.token_b)?, (6 * E18, 10 * E18 - OUT_5_10));
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_exact_out_at_default_fee() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b];

    let params = ex.exact_out(E18, u128::MAX, &path);
    let amounts = ex.router.swap_tokens_for_exact_tokens(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![IN_5_10, E18]);
    assert_eq!(ex.reserves(ex.token_a, ex.token_b)?, (5 * E18 + IN_5_10, 9 * E18));
    Ok(())
}

#[test]
fn test_exact_in_from_small_pool() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    ex.add_liquidity(ex.token_a, ex.token_b, E18, 4 * E18)?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b];

    let params = ex.exact_in(E18, 0, &path);
    let amounts = ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params)?;

    let out = 1_996_995_493_239_859_789;
    assert_eq!(amounts[1], out);
    assert_eq!(ex.reserves(ex.token_a, ex.token_b)?, (2 * E18, 4 * E18 - out));
    Ok(())
}

#[test]
fn test_configured_lower_fee() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(low_fee_config())?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b];

    assert_eq!(ex.router.get_amounts_out(&ex.rt, E18, &path)?[1], 1_663_887_962_654_218_072);
    assert_eq!(ex.router.get_amounts_in(&ex.rt, E18, &path)?[0], 556_668_893_342_240_036);

    let params = ex.exact_in(E18, 1_663_887_962_654_218_072, &path);
    ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params)?;
    Ok(())
}

#[test]
fn test_two_hop_path() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    ex.add_liquidity(ex.token_b, ex.token_c, 10 * E18, 10 * E18)?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b, ex.token_c];
    let before = ex.balance(ex.token_c, wallet);

    let params = ex.exact_in(E18, 0, &path);
    let amounts = ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![E18, OUT_5_10, 1_421_839_107_917_040_301]);
    assert_eq!(ex.balance(ex.token_c, wallet), before + amounts[2]);
    // Intermediate output went pool to pool
    assert_eq!(ex.reserves(ex.token_b, ex.token_c)?, (10 * E18 + OUT_5_10, 10 * E18 - amounts[2]));
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_slippage_bounds_revert_everything() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;
    let path = [ex.token_a, ex.token_b];
    let events = ex.rt.ledger().events().len();

    let params = ex.exact_in(E18, OUT_5_10 + 1, &path);
    assert_eq!(
        ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::InsufficientOutputAmount)
    );

    let params = ex.exact_out(E18, IN_5_10 - 1, &path);
    assert_eq!(
        ex.router.swap_tokens_for_exact_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::ExcessiveInputAmount)
    );

    assert_eq!(ex.reserves(ex.token_a, ex.token_b)?, (5 * E18, 10 * E18));
    assert_eq!(ex.rt.ledger().events().len(), events);
    Ok(())
}

#[test]
fn test_invalid_paths() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;

    let params = ex.exact_in(E18, 0, &[ex.token_a]);
    assert!(matches!(
        ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::InvalidPath(_))
    ));

    let params = ex.exact_in(E18, 0, &[ex.token_a, ex.token_c]);
    assert_eq!(
        ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::UnknownPool(ex.token_a, ex.token_c))
    );
    Ok(())
}

#[test]
fn test_expired_swap() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;
    let mut params = ex.exact_in(E18, 0, &[ex.token_a, ex.token_b]);
    ex.rt.advance_time(601);
    params.deadline = GENESIS + 600;

    assert_eq!(
        ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::Expired { deadline: GENESIS + 600, now: GENESIS + 601 })
    );
    Ok(())
}

#[test]
fn test_swap_emits_router_as_sender() -> anyhow::Result<()> {
    let mut ex = exchange_with_pool(ExchangeConfig::default())?;
    let wallet = ex.wallet.address;
    let pool = ex.pool(ex.token_a, ex.token_b)?;
    let params = ex.exact_in(E18, 0, &[ex.token_a, ex.token_b]);
    ex.router.swap_exact_tokens_for_tokens(&mut ex.rt, wallet, &params)?;

    match last_event_from(&ex.rt, pool) {
        Some(EventKind::Swap { sender, to, .. }) => {
            assert_eq!(sender, ex.router.address());
            assert_eq!(to, wallet);
        }
        other => panic!("expected Swap, got {:?}", other),
    }
    Ok(())
}
