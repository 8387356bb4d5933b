//! Construction of pools and pairs from their validated configuration.
//!
//! [`FromConfig`] gives the factory and the exchange router one uniform
//! way to build a component from its blueprint without `dyn` objects:
//!
//! ```text
//! PoolConfig::Weighted(cfg) => WeightedPool::from_config(cfg)
//! PoolConfig::Rights(cfg)   => RightsPool::from_config(cfg)
//! PairConfig                => Pair::from_config(cfg)
//! ```
//!
//! There is no blanket implementation: every component/config pairing
//! is written out explicitly, so validation stays component-specific.

use crate::error::Result;

/// Builds `Self` from a configuration of type `C`.
///
/// Implementations must re-validate the configuration; a successfully
/// constructed value is in a valid initial state.
pub trait FromConfig<C> {
    /// Creates the component.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`](crate::error::ZapError::InvalidConfiguration)
    /// (or a more specific variant) if the configuration is invalid.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
