//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_zap::prelude::*;
//! ```

pub use crate::domain::{
    Account, Amount, Asset, PoolId, PoolKind, Quote, SecondaryLeg, Slippage, Timestamp, Token,
    TokenAddress, ZapInput, ZapReceipt, ZapRequest,
};

pub use crate::traits::{Clock, Exchanger, FromConfig, WeightedPoolSurface};

pub use crate::math::{Bfp, CheckedArithmetic};

pub use crate::config::{PairConfig, PoolConfig, WeightedPoolConfig, ZapperConfig};

pub use crate::error::{Result, ZapError};

pub use crate::factory::DefaultPoolFactory;

pub use crate::ledger::Ledger;

pub use crate::pools::PoolBox;

pub use crate::zap::{QuoteEngine, ZapContext, ZapCoordinator};
