//! Declarative blueprints for pools, exchange pairs and the zapper.
//!
//! Every config validates on construction (`new`) and exposes
//! `validate()` so a consumer can re-check a value it deserialized or
//! mutated.

mod pair;
mod pool_config;
mod rights;
mod weighted;
mod zapper;

pub use pair::PairConfig;
pub use pool_config::PoolConfig;
pub use rights::RightsPoolConfig;
pub use weighted::{
    INIT_POOL_SUPPLY, MAX_BOUND_TOKENS, MAX_FEE, MAX_POOL_SUPPLY, MAX_TOTAL_WEIGHT, MAX_WEIGHT,
    MIN_BALANCE, MIN_BOUND_TOKENS, MIN_FEE, MIN_POOL_SUPPLY, MIN_WEIGHT, WeightedPoolConfig,
};
pub use zapper::{DEFAULT_SLIPPAGE_BPS, ZapperConfig};
