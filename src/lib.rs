//! # Hydra Zap
//!
//! Single-asset liquidity zapper for Balancer-style weighted pools: turn
//! native currency (or one token) into pool shares in one atomic call.
//!
//! A zap picks one pool constituent to route into, buys it on an
//! exchange, deposits it with a single-token join and hands the minted
//! shares to the caller. Either every step happens or none does.
//!
//! ## Zap native currency into a pool
//!
//! ```rust
//! use hydra_zap::config::{PairConfig, PoolConfig, WeightedPoolConfig, ZapperConfig};
//! use hydra_zap::domain::{
//!     Account, Amount, Asset, FeeTier, PoolId, PoolKind, Slippage, Timestamp, Token,
//!     TokenAddress, ZapRequest,
//! };
//! use hydra_zap::exchange::Router;
//! use hydra_zap::factory::DefaultPoolFactory;
//! use hydra_zap::ledger::Ledger;
//! use hydra_zap::math::Bfp;
//! use hydra_zap::traits::FixedClock;
//! use hydra_zap::zap::{ZapContext, ZapCoordinator};
//!
//! const E18: u128 = 1_000_000_000_000_000_000;
//! let lp = Account::from_bytes([1u8; 32]);
//! let caller = Account::from_bytes([2u8; 32]);
//! let (a, b) = (TokenAddress::from_bytes([3u8; 32]), TokenAddress::from_bytes([4u8; 32]));
//!
//! // 1. Fund accounts
//! let mut ledger = Ledger::new();
//! ledger.mint(lp, Asset::Native, Amount::new(10_000 * E18)).expect("mint");
//! for t in [a, b] {
//!     ledger.mint(lp, Asset::Token(t), Amount::new(1_000 * E18)).expect("mint");
//! }
//! ledger.mint(caller, Asset::Native, Amount::new(E18)).expect("mint");
//!
//! // 2. Deploy a 50/50 pool
//! let pool_id = PoolId::from_bytes([5u8; 32]);
//! let cfg = WeightedPoolConfig::new(
//!     pool_id,
//!     vec![Token::standard(a), Token::standard(b)],
//!     vec![Bfp::from_integer(1), Bfp::from_integer(1)],
//!     vec![Amount::new(100 * E18), Amount::new(100 * E18)],
//!     Bfp::from_wei_u128(1_500_000_000_000_000),
//! )
//! .expect("valid pool");
//! let mut pool = DefaultPoolFactory::deploy(&PoolConfig::from(cfg), &mut ledger, lp)
//!     .expect("deployed");
//!
//! // 3. List native pairs
//! let mut router = Router::new(Account::from_bytes([6u8; 32]));
//! let mut tx = ledger.begin();
//! for t in [a, b] {
//!     let pair = PairConfig::new(
//!         Asset::Native,
//!         Asset::Token(t),
//!         Amount::new(1_000 * E18),
//!         Amount::new(100 * E18),
//!         FeeTier::TIER_0_30_PERCENT,
//!     )
//!     .expect("valid pair");
//!     router.add_pair(&mut tx, lp, &pair).expect("listed");
//! }
//! tx.commit();
//!
//! // 4. Zap
//! let zapper = ZapCoordinator::new(
//!     ZapperConfig::new(Account::from_bytes([7u8; 32])).expect("valid"),
//!     FixedClock::new(Timestamp::new(100)),
//! );
//! let request = ZapRequest::native(caller, pool_id, PoolKind::Plain, Amount::new(E18), Timestamp::new(200))
//!     .with_slippage(Slippage::from_bps(100).expect("valid"));
//! let mut ctx = ZapContext::new(&mut ledger, &mut pool, &mut router);
//! let receipt = zapper.buy_and_join(&mut ctx, &request).expect("zapped");
//!
//! assert!(receipt.shares_minted >= receipt.min_pool_amount_out);
//! assert_eq!(ledger.balance_of(caller, Asset::Native), Amount::ZERO);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    Caller     │  ZapRequest
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐      ┌──────────────┐
//! │ZapCoordinator │─────▶│ QuoteEngine  │  underlying + share floor
//! └──────┬───────┘      └──────────────┘
//!        │ Transaction + compensation log
//!        ├──────────────▶ Exchanger (Router)       swap
//!        └──────────────▶ WeightedPoolSurface      join
//!                         (WeightedPool / RightsPool via PoolBox)
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`ZapRequest`](domain::ZapRequest), receipts |
//! | [`math`] | [`Bfp`](math::Bfp) fixed point and weighted-pool formulas |
//! | [`ledger`] | Balances, allowances and journaled [`Transaction`](ledger::Transaction)s |
//! | [`traits`] | [`WeightedPoolSurface`](traits::WeightedPoolSurface), [`Exchanger`](traits::Exchanger), [`Clock`](traits::Clock), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Validated blueprints for pools, pairs and the zapper |
//! | [`pools`] | [`WeightedPool`](pools::WeightedPool), [`RightsPool`](pools::RightsPool) and [`PoolBox`](pools::PoolBox) |
//! | [`exchange`] | Constant-product [`Router`](exchange::Router) |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) for config-driven deployment |
//! | [`zap`] | [`QuoteEngine`](zap::QuoteEngine) and [`ZapCoordinator`](zap::ZapCoordinator) |
//! | [`error`] | [`ZapError`](error::ZapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
pub mod zap;
