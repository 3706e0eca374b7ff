//! Native coin flows through the wrapped asset

use crate::common::*;

const OUT_5_10: u128 = 1_662_497_915_624_478_906;
const IN_5_10: u128 = 557_227_237_267_357_629;

/// Pool of token A against wrapped native
fn native_pool(amount_token: u128, amount_native: u128) -> anyhow::Result<TestExchange> {
    let mut ex = TestExchange::new()?;
    ex.add_liquidity_native(ex.token_a, amount_token, amount_native)?;
    Ok(ex)
}

#[test]
fn test_add_native_liquidity_refunds_excess() -> anyhow::Result<()> {
    let mut ex = TestExchange::new()?;
    let wallet = ex.wallet.address;

    let (amount_token, amount_native, liquidity) = ex.add_liquidity_native(ex.token_a, 5 * E18, 10 * E18)?;
    assert_eq!((amount_token, amount_native), (5 * E18, 10 * E18));
    assert!(liquidity > 0);
    assert_eq!(ex.native(wallet), SUPPLY - 10 * E18);

    // Only 10 of the 30 attached are needed at the pool's ratio
    let (_, amount_native, _) = ex.add_liquidity_native(ex.token_a, 5 * E18, 30 * E18)?;
    assert_eq!(amount_native, 10 * E18);
    assert_eq!(ex.native(wallet), SUPPLY - 20 * E18);
    assert_eq!(ex.reserves(ex.token_a, ex.wrapped)?, (10 * E18, 20 * E18));
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_swap_exact_native_for_tokens() -> anyhow::Result<()> {
    let mut ex = native_pool(10 * E18, 5 * E18)?;
    let wallet = ex.wallet.address;
    let tokens_before = ex.balance(ex.token_a, wallet);

    let params = ex.exact_in(E18, 0, &[ex.wrapped, ex.token_a]);
    let amounts = ex.router.swap_exact_native_for_tokens(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![E18, OUT_5_10]);
    assert_eq!(ex.native(wallet), SUPPLY - 6 * E18);
    assert_eq!(ex.balance(ex.token_a, wallet), tokens_before + OUT_5_10);
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_swap_native_for_exact_tokens_refunds_unspent_value() -> anyhow::Result<()> {
    let mut ex = native_pool(10 * E18, 5 * E18)?;
    let wallet = ex.wallet.address;
    let native_before = ex.native(wallet);

    let params = ex.exact_out(E18, 2 * E18, &[ex.wrapped, ex.token_a]);
    let amounts = ex.router.swap_native_for_exact_tokens(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![IN_5_10, E18]);
    assert_eq!(ex.native(wallet), native_before - IN_5_10);
    assert_router_holds_nothing(&ex);

    let params = ex.exact_out(E18, E18 / 2, &[ex.wrapped, ex.token_a]);
    assert_eq!(
        ex.router.swap_native_for_exact_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::ExcessiveInputAmount)
    );
    assert_eq!(ex.native(wallet), native_before - IN_5_10);
    Ok(())
}

#[test]
fn test_swap_exact_tokens_for_native() -> anyhow::Result<()> {
    let mut ex = native_pool(5 * E18, 10 * E18)?;
    let wallet = ex.wallet.address;
    let native_before = ex.native(wallet);

    let params = ex.exact_in(E18, 0, &[ex.token_a, ex.wrapped]);
    let amounts = ex.router.swap_exact_tokens_for_native(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![E18, OUT_5_10]);
    assert_eq!(ex.native(wallet), native_before + OUT_5_10);
    assert_eq!(ex.balance(ex.wrapped, wallet), 0);
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_swap_tokens_for_exact_native() -> anyhow::Result<()> {
    let mut ex = native_pool(5 * E18, 10 * E18)?;
    let wallet = ex.wallet.address;
    let native_before = ex.native(wallet);
    let tokens_before = ex.balance(ex.token_a, wallet);

    let params = ex.exact_out(E18, u128::MAX, &[ex.token_a, ex.wrapped]);
    let amounts = ex.router.swap_tokens_for_exact_native(&mut ex.rt, wallet, &params)?;

    assert_eq!(amounts, vec![IN_5_10, E18]);
    assert_eq!(ex.native(wallet), native_before + E18);
    assert_eq!(ex.balance(ex.token_a, wallet), tokens_before - IN_5_10);
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_native_paths_must_touch_wrapped_asset() -> anyhow::Result<()> {
    let mut ex = native_pool(5 * E18, 10 * E18)?;
    let wallet = ex.wallet.address;
    let native_before = ex.native(wallet);

    let params = ex.exact_in(E18, 0, &[ex.token_a, ex.wrapped]);
    assert!(matches!(
        ex.router.swap_exact_native_for_tokens(&mut ex.rt, wallet, &params),
        Err(ExchangeError::InvalidPath(_))
    ));

    let params = ex.exact_in(E18, 0, &[ex.wrapped, ex.token_a]);
    assert!(matches!(
        ex.router.swap_exact_tokens_for_native(&mut ex.rt, wallet, &params),
        Err(ExchangeError::InvalidPath(_))
    ));

    let params = ex.exact_out(E18, u128::MAX, &[ex.wrapped, ex.token_a]);
    assert!(matches!(
        ex.router.swap_tokens_for_exact_native(&mut ex.rt, wallet, &params),
        Err(ExchangeError::InvalidPath(_))
    ));

    assert_eq!(ex.native(wallet), native_before);
    Ok(())
}

#[test]
fn test_remove_native_liquidity() -> anyhow::Result<()> {
    let mut ex = native_pool(E18, 4 * E18)?;
    let wallet = ex.wallet.address;
    let pool = ex.pool(ex.token_a, ex.wrapped)?;
    let liquidity = ex.balance(pool, wallet);
    ex.rt.approve(pool, wallet, ex.router.address(), liquidity)?;

    let params = RemoveLiquidityNativeParams {
        token: ex.token_a,
        liquidity,
        amount_token_min: 0,
        amount_native_min: 0,
        to: wallet,
        deadline: ex.deadline(),
    };
    let (amount_token, amount_native) = ex.router.remove_liquidity_native(&mut ex.rt, wallet, params)?;

    assert_eq!((amount_token, amount_native), (E18 - 500, 4 * E18 - 2_000));
    assert_eq!(ex.native(wallet), SUPPLY - 2_000);
    assert_eq!(ex.balance(ex.token_a, wallet), SUPPLY - 500);
    assert_eq!(ex.balance(ex.wrapped, wallet), 0);
    assert_router_holds_nothing(&ex);
    Ok(())
}

#[test]
fn test_insufficient_native_value() -> anyhow::Result<()> {
    let mut ex = native_pool(5 * E18, 10 * E18)?;
    let poor = ex.other.address;
    let params = ex.exact_in(E18, 0, &[ex.wrapped, ex.token_a]);

    assert!(matches!(
        ex.router.swap_exact_native_for_tokens(&mut ex.rt, poor, &params),
        Err(ExchangeError::Asset(AssetError::InsufficientNativeBalance { .. }))
    ));
    Ok(())
}
