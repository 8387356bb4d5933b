//! Pool instantiation via the factory pattern.
//!
//! The [`DefaultPoolFactory`] creates pool instances from [`PoolConfig`]
//! values, validating configuration and dispatching to the appropriate
//! pool constructor based on the config variant.
//!
//! # Usage
//!
//! ```rust
//! use hydra_zap::config::{PoolConfig, WeightedPoolConfig};
//! use hydra_zap::domain::{Account, Amount, Asset, PoolId, Token, TokenAddress};
//! use hydra_zap::factory::DefaultPoolFactory;
//! use hydra_zap::ledger::Ledger;
//! use hydra_zap::math::Bfp;
//! use hydra_zap::traits::WeightedPoolSurface;
//!
//! let a = TokenAddress::from_bytes([1u8; 32]);
//! let b = TokenAddress::from_bytes([2u8; 32]);
//! let creator = Account::from_bytes([3u8; 32]);
//!
//! let mut ledger = Ledger::new();
//! ledger.mint(creator, Asset::Token(a), Amount::new(10_000_000)).expect("mint");
//! ledger.mint(creator, Asset::Token(b), Amount::new(10_000_000)).expect("mint");
//!
//! let cfg = WeightedPoolConfig::new(
//!     PoolId::from_bytes([4u8; 32]),
//!     vec![Token::standard(a), Token::standard(b)],
//!     vec![Bfp::from_integer(1), Bfp::from_integer(1)],
//!     vec![Amount::new(10_000_000), Amount::new(10_000_000)],
//!     Bfp::from_wei_u128(1_500_000_000_000_000),
//! )
//! .expect("valid");
//!
//! let pool = DefaultPoolFactory::deploy(&PoolConfig::from(cfg), &mut ledger, creator)
//!     .expect("pool deployed");
//! assert_eq!(pool.constituents().len(), 2);
//! ```
//!
//! [`PoolConfig`]: crate::config::PoolConfig

mod default_factory;

pub use default_factory::DefaultPoolFactory;
