//! Property-based tests using `proptest` for weighted-pool invariants.
//!
//! 1. **Preview fidelity**: a join mints exactly its preview.
//! 2. **Join monotonicity**: a larger deposit never mints fewer shares.
//! 3. **Swap reversibility**: round-trip A→B→A returns ≤ original.
//! 4. **Price movement direction**: selling A raises the price of B in A.
//! 5. **Join reversal**: `revert_join` restores the pool records exactly.
//! 6. **Floor vs tolerance**: the quoted share floor never rises as the
//!    slippage tolerance grows.
//! 7. **Quote idempotence**: quoting twice against unchanged state agrees.
//! 8. **Deterministic choice**: the underlying pick depends only on state.

use proptest::prelude::*;

use crate::config::{PairConfig, WeightedPoolConfig};
use crate::domain::{
    Account, Amount, Asset, FeeTier, PoolId, PoolKind, Slippage, Token, TokenAddress, ZapInput,
};
use crate::exchange::Router;
use crate::ledger::Ledger;
use crate::math::Bfp;
use crate::pools::WeightedPool;
use crate::traits::{FromConfig, WeightedPoolSurface};
use crate::zap::QuoteEngine;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const E18: u128 = 1_000_000_000_000_000_000;

fn tok_a() -> TokenAddress {
    TokenAddress::from_bytes([1u8; 32])
}

fn tok_b() -> TokenAddress {
    TokenAddress::from_bytes([2u8; 32])
}

fn trader() -> Account {
    Account::from_bytes([0x77; 32])
}

fn make_pool(ra: u128, rb: u128, wa: u64, wb: u64) -> WeightedPool {
    let Ok(cfg) = WeightedPoolConfig::new(
        PoolId::from_bytes([0x42; 32]),
        vec![Token::standard(tok_a()), Token::standard(tok_b())],
        vec![Bfp::from_integer(wa), Bfp::from_integer(wb)],
        vec![Amount::new(ra), Amount::new(rb)],
        Bfp::from_wei_u128(1_500_000_000_000_000),
    ) else {
        panic!("valid config");
    };
    let Ok(pool) = WeightedPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

/// Pool custody funded, trader funded with `ra`/`rb` and fully approved.
fn make_ledger(pool: &WeightedPool, ra: u128, rb: u128) -> Ledger {
    let mut ledger = Ledger::new();
    for (token, reserve) in [(tok_a(), ra), (tok_b(), rb)] {
        let Ok(()) = ledger.mint(pool.account(), Asset::Token(token), Amount::new(reserve)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.mint(trader(), Asset::Token(token), Amount::new(reserve)) else {
            panic!("mint");
        };
        let mut tx = ledger.begin();
        tx.approve(trader(), pool.account(), token, Amount::MAX);
        tx.commit();
    }
    ledger
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    (1_000u128..1_000_000).prop_map(|units| units * E18)
}

fn weight_strategy() -> impl Strategy<Value = u64> {
    1u64..=25
}

fn bps_strategy() -> impl Strategy<Value = u32> {
    0u32..10_000
}

/// Native pairs for both pool tokens at 1000 native : 100 token.
fn make_router() -> Router {
    let lp = Account::from_bytes([0x01; 32]);
    let mut ledger = Ledger::new();
    let mut router = Router::new(Account::from_bytes([0x02; 32]));
    let mut tx = ledger.begin();
    let Ok(()) = tx.mint(lp, Asset::Native, Amount::new(10_000 * E18)) else {
        panic!("mint");
    };
    for token in [tok_a(), tok_b()] {
        let Ok(()) = tx.mint(lp, Asset::Token(token), Amount::new(1_000 * E18)) else {
            panic!("mint");
        };
        let Ok(cfg) = PairConfig::new(
            Asset::Native,
            Asset::Token(token),
            Amount::new(1_000 * E18),
            Amount::new(100 * E18),
            FeeTier::TIER_0_30_PERCENT,
        ) else {
            panic!("valid pair");
        };
        let Ok(()) = router.add_pair(&mut tx, lp, &cfg) else {
            panic!("listed");
        };
    }
    tx.commit();
    router
}

fn quote_floor(
    pool: &WeightedPool,
    router: &Router,
    input: ZapInput,
    bps: u32,
) -> Result<Amount, TestCaseError> {
    let slippage = Slippage::from_bps(bps)
        .map_err(|e| TestCaseError::fail(format!("slippage {bps}: {e}")))?;
    QuoteEngine::calc_min_pool_amount_out(pool, PoolKind::Plain, router, tok_a(), input, None, slippage)
        .map(|q| q.min_pool_amount_out)
        .map_err(|e| TestCaseError::fail(format!("quote: {e}")))
}

// ---------------------------------------------------------------------------
// Property 1 & 2: Join previews
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_join_mints_its_preview(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in 1u128..50,
    ) {
        let mut pool = make_pool(ra, rb, wa, wb);
        let amount = Amount::new(ra / 100 * pct);
        let Ok(preview) = pool.preview_join_single_token(tok_a(), amount) else {
            return Ok(());
        };
        let mut ledger = make_ledger(&pool, ra, rb);
        let mut tx = ledger.begin();
        let Ok(receipt) = pool.join_single_token(&mut tx, trader(), tok_a(), amount, preview) else {
            return Err(TestCaseError::fail("join at preview floor must succeed"));
        };
        prop_assert_eq!(receipt.shares, preview);
    }

    #[test]
    fn prop_join_monotone_in_amount(
        ra in reserve_strategy(),
        wa in weight_strategy(),
        pct_small in 1u128..25,
        extra in 1u128..25,
    ) {
        let pool = make_pool(ra, ra, wa, 1);
        let small = Amount::new(ra / 100 * pct_small);
        let large = Amount::new(ra / 100 * (pct_small + extra));
        let (Ok(s), Ok(l)) = (
            pool.preview_join_single_token(tok_a(), small),
            pool.preview_join_single_token(tok_a(), large),
        ) else {
            return Ok(());
        };
        prop_assert!(l >= s, "larger deposit minted less: {} < {}", l, s);
    }
}

// ---------------------------------------------------------------------------
// Property 3 & 4: Swaps
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
    ) {
        let swap_in = ra / 1_000;
        let mut pool = make_pool(ra, rb, wa, wb);
        let mut ledger = make_ledger(&pool, ra, rb);
        let mut tx = ledger.begin();

        let Ok(received_b) = pool.swap_exact_amount_in(
            &mut tx, trader(), tok_a(), Amount::new(swap_in), tok_b(), Amount::ZERO,
        ) else {
            return Ok(());
        };
        if received_b.is_zero() { return Ok(()); }
        let Ok(final_a) = pool.swap_exact_amount_in(
            &mut tx, trader(), tok_b(), received_b, tok_a(), Amount::ZERO,
        ) else {
            return Ok(());
        };

        prop_assert!(
            final_a.get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            final_a, swap_in
        );
    }

    #[test]
    fn prop_price_movement_direction(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in 1u128..40,
    ) {
        let mut pool = make_pool(ra, rb, wa, wb);
        let mut ledger = make_ledger(&pool, ra, rb);
        let Ok(before) = pool.spot_price(tok_a(), tok_b()) else {
            return Ok(());
        };
        let mut tx = ledger.begin();
        let Ok(_) = pool.swap_exact_amount_in(
            &mut tx, trader(), tok_a(), Amount::new(ra / 100 * pct), tok_b(), Amount::ZERO,
        ) else {
            return Ok(());
        };
        let Ok(after) = pool.spot_price(tok_a(), tok_b()) else {
            return Err(TestCaseError::fail("price must exist after swap"));
        };
        prop_assert!(after >= before, "selling A lowered the price of B: {} < {}", after, before);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Join reversal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_revert_join_restores_pool(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in 1u128..50,
    ) {
        let mut pool = make_pool(ra, rb, wa, wb);
        let snapshot = pool.clone();
        let mut ledger = make_ledger(&pool, ra, rb);
        {
            let mut tx = ledger.begin();
            let Ok(receipt) = pool.join_single_token(
                &mut tx, trader(), tok_b(), Amount::new(rb / 100 * pct), Amount::ZERO,
            ) else {
                return Ok(());
            };
            let Ok(()) = pool.revert_join(&receipt) else {
                return Err(TestCaseError::fail("revert must succeed"));
            };
        }
        prop_assert_eq!(&pool, &snapshot);
        prop_assert_eq!(
            ledger.balance_of(trader(), Asset::Token(tok_b())),
            Amount::new(rb)
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 6-8: Zap quotes
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_floor_non_increasing_in_slippage(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        tenths in 1u128..50,
        low in bps_strategy(),
        high in bps_strategy(),
    ) {
        let (low, high) = (low.min(high), low.max(high));
        let pool = make_pool(ra, rb, wa, wb);
        let router = make_router();
        let input = ZapInput::Native(Amount::new(tenths * E18 / 10));
        let loose = quote_floor(&pool, &router, input, high)?;
        let tight = quote_floor(&pool, &router, input, low)?;
        prop_assert!(loose <= tight);
    }

    #[test]
    fn prop_quote_is_idempotent(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        tenths in 1u128..50,
        bps in bps_strategy(),
    ) {
        let pool = make_pool(ra, rb, wa, wb);
        let router = make_router();
        let Ok(slippage) = Slippage::from_bps(bps) else {
            return Err(TestCaseError::fail("bps below 10_000 is a valid tolerance"));
        };
        let input = ZapInput::Native(Amount::new(tenths * E18 / 10));
        let quote = || {
            QuoteEngine::calc_min_pool_amount_out(
                &pool, PoolKind::Plain, &router, tok_a(), input, None, slippage,
            )
        };
        let first = quote();
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, quote());
    }

    #[test]
    fn prop_underlying_choice_is_deterministic(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
    ) {
        let pool = make_pool(ra, rb, wa, wb);
        let copy = pool.clone();
        let first = QuoteEngine::choose_underlying_token(&pool, PoolKind::Plain);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first.clone(), QuoteEngine::choose_underlying_token(&pool, PoolKind::Plain));
        prop_assert_eq!(first, QuoteEngine::choose_underlying_token(&copy, PoolKind::Plain));
    }
}
