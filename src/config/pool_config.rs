//! Top-level pool configuration enum.
//!
//! [`PoolConfig`] is the declarative blueprint the factory consumes:
//!
//! ```text
//! match config {
//!     PoolConfig::Weighted(cfg) => WeightedPool::from_config(cfg),
//!     PoolConfig::Rights(cfg)   => RightsPool::from_config(cfg),
//! }
//! ```

use super::{RightsPoolConfig, WeightedPoolConfig};
use crate::domain::{PoolId, PoolKind};
use crate::error::Result;

/// Blueprint for either pool flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolConfig {
    /// Immutable weighted pool.
    Weighted(WeightedPoolConfig),
    /// Weighted pool behind a rights wrapper.
    Rights(RightsPoolConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the same error the inner `validate()` would return.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Weighted(cfg) => cfg.validate(),
            Self::Rights(cfg) => cfg.validate(),
        }
    }

    /// Parameters of the underlying weighted pool.
    #[must_use]
    pub const fn pool(&self) -> &WeightedPoolConfig {
        match self {
            Self::Weighted(cfg) => cfg,
            Self::Rights(cfg) => cfg.pool(),
        }
    }

    /// Pool identifier.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.pool().id()
    }

    /// Pool flavour this blueprint produces.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        match self {
            Self::Weighted(_) => PoolKind::Plain,
            Self::Rights(_) => PoolKind::RightsWrapped,
        }
    }
}

impl From<WeightedPoolConfig> for PoolConfig {
    fn from(cfg: WeightedPoolConfig) -> Self {
        Self::Weighted(cfg)
    }
}

impl From<RightsPoolConfig> for PoolConfig {
    fn from(cfg: RightsPoolConfig) -> Self {
        Self::Rights(cfg)
    }
}
