//! Single-asset zap example.
//!
//! Deploys a 20-token equal-weight pool, lists a native pair for every
//! constituent on the router, then zaps one native unit into pool shares
//! at 1% slippage. A basket zap follows for comparison.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_zap=debug cargo run --example zap
//! ```

use hydra_zap::config::{PairConfig, PoolConfig, WeightedPoolConfig, ZapperConfig};
use hydra_zap::domain::{
    Account, Amount, Asset, FeeTier, PoolId, PoolKind, Slippage, Timestamp, Token, TokenAddress,
    ZapRequest,
};
use hydra_zap::exchange::Router;
use hydra_zap::factory::DefaultPoolFactory;
use hydra_zap::ledger::Ledger;
use hydra_zap::math::Bfp;
use hydra_zap::traits::{FixedClock, WeightedPoolSurface};
use hydra_zap::zap::{QuoteEngine, ZapContext, ZapCoordinator};
use tracing_subscriber::EnvFilter;

const E18: u128 = 1_000_000_000_000_000_000;
const TOKENS: u8 = 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Single-Asset Zap ===\n");

    // ── 1. Accounts and funding ─────────────────────────────────────────
    let deployer = Account::from_bytes([0xd0; 32]);
    let caller = Account::from_bytes([0xca; 32]);
    let tokens: Vec<TokenAddress> = (1..=TOKENS).map(|b| TokenAddress::from_bytes([b; 32])).collect();

    let mut ledger = Ledger::new();
    ledger.mint(deployer, Asset::Native, Amount::new(1_000_000 * E18))?;
    for token in &tokens {
        ledger.mint(deployer, Asset::Token(*token), Amount::new(10_000 * E18))?;
    }
    ledger.mint(caller, Asset::Native, Amount::new(10 * E18))?;

    // ── 2. Deploy the pool ──────────────────────────────────────────────
    let pool_id = PoolId::from_bytes([0x77; 32]);
    let config = WeightedPoolConfig::new(
        pool_id,
        tokens.iter().copied().map(Token::standard).collect(),
        vec![Bfp::from_integer(1); tokens.len()],
        vec![Amount::new(100 * E18); tokens.len()],
        Bfp::from_wei_u128(1_500_000_000_000_000), // 0.15%
    )?;
    let mut pool = DefaultPoolFactory::deploy(&PoolConfig::from(config), &mut ledger, deployer)?;
    println!("Pool {} deployed", pool.id());
    println!("  Constituents: {}", pool.constituents().len());
    println!("  Share supply: {}", pool.total_share_supply());

    // ── 3. List native pairs on the router ──────────────────────────────
    let mut router = Router::new(Account::from_bytes([0x40; 32]));
    {
        let mut tx = ledger.begin();
        for token in &tokens {
            let pair = PairConfig::new(
                Asset::Native,
                Asset::Token(*token),
                Amount::new(1_000 * E18),
                Amount::new(100 * E18),
                FeeTier::TIER_0_30_PERCENT,
            )?;
            router.add_pair(&mut tx, deployer, &pair)?;
        }
        tx.commit();
    }

    // ── 4. Quote ────────────────────────────────────────────────────────
    let one_percent = Slippage::from_bps(100)?;
    let request = ZapRequest::native(
        caller,
        pool_id,
        PoolKind::Plain,
        Amount::new(E18),
        Timestamp::new(2_000),
    )
    .with_slippage(one_percent);

    let underlying = QuoteEngine::choose_underlying_token(&pool, PoolKind::Plain)?;
    let quote = QuoteEngine::calc_min_pool_amount_out(
        &pool,
        PoolKind::Plain,
        &router,
        underlying,
        request.input(),
        None,
        one_percent,
    )?;
    println!("\nQuote for 1 native at {one_percent}:");
    println!("  Underlying:       {underlying}");
    println!("  Expected amount:  {}", quote.expected_underlying_amount);
    println!("  Expected shares:  {}", quote.expected_pool_amount_out);
    println!("  Share floor:      {}", quote.min_pool_amount_out);

    // ── 5. Zap ──────────────────────────────────────────────────────────
    let coordinator = ZapCoordinator::new(
        ZapperConfig::new(Account::from_bytes([0x2a; 32]))?,
        FixedClock::new(Timestamp::new(1_000)),
    );
    let receipt = {
        let mut ctx = ZapContext::new(&mut ledger, &mut pool, &mut router);
        coordinator.buy_and_join(&mut ctx, &request)?
    };
    println!("\nZap completed");
    println!("  Shares minted:    {}", receipt.shares_minted);
    println!("  Underlying used:  {}", receipt.underlying_amount);
    println!(
        "  Caller native:    {}",
        ledger.balance_of(caller, Asset::Native)
    );

    // ── 6. Basket zap ───────────────────────────────────────────────────
    let basket = {
        let mut ctx = ZapContext::new(&mut ledger, &mut pool, &mut router);
        coordinator.buy_basket_and_join(&mut ctx, &request)?
    };
    println!("\nBasket zap completed");
    println!("  Shares minted:    {}", basket.shares_minted);
    println!("  Dust refunded:    {} assets", basket.refunds.len());
    println!(
        "  Caller shares:    {}",
        ledger.balance_of(caller, Asset::Token(pool_id.share_token()))
    );

    Ok(())
}
