//! Builds pools from [`PoolConfig`] and seeds their custody.

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{Account, Asset};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::pools::{PoolBox, RightsPool, WeightedPool};
use crate::traits::{FromConfig, WeightedPoolSurface};

/// Turns a pool blueprint into a live [`PoolBox`].
///
/// Plain and rights-wrapped pools go through the same two calls:
/// [`create`](Self::create) for the in-memory pool alone, and
/// [`deploy`](Self::deploy) when the pool's balances must also exist on a
/// [`Ledger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Validates `config` and builds the matching pool flavour.
    ///
    /// The pool's records hold the configured balances but no tokens sit
    /// in its custody account yet; see [`deploy`](Self::deploy).
    ///
    /// # Errors
    ///
    /// Any error from validation or the pool's `from_config`.
    pub fn create(config: &PoolConfig) -> Result<PoolBox> {
        config.validate()?;

        match config {
            PoolConfig::Weighted(cfg) => {
                let pool = WeightedPool::from_config(cfg)?;
                Ok(PoolBox::Weighted(Box::new(pool)))
            }
            PoolConfig::Rights(cfg) => {
                let pool = RightsPool::from_config(cfg)?;
                Ok(PoolBox::Rights(Box::new(pool)))
            }
        }
    }

    /// Creates a pool and funds it from `creator`.
    ///
    /// Inside one ledger transaction, every initial balance moves from
    /// `creator` to the pool account and the initial share supply is
    /// minted to `creator`. Either all of it happens or none of it.
    ///
    /// # Errors
    ///
    /// - Any error of [`create`](Self::create).
    /// - [`ZapError::TransferFailed`](crate::error::ZapError::TransferFailed)
    ///   if `creator` cannot cover an initial balance.
    pub fn deploy(config: &PoolConfig, ledger: &mut Ledger, creator: Account) -> Result<PoolBox> {
        let pool = Self::create(config)?;
        let params = config.pool();

        let mut tx = ledger.begin();
        for (token, balance) in params.tokens().iter().zip(params.balances()) {
            tx.transfer(
                creator,
                pool.id().account(),
                Asset::Token(token.address()),
                *balance,
            )?;
        }
        tx.mint(
            creator,
            Asset::Token(pool.id().share_token()),
            pool.total_share_supply(),
        )?;
        tx.commit();

        info!(
            pool = %pool.id(),
            kind = %pool.kind(),
            tokens = params.tokens().len(),
            supply = %pool.total_share_supply(),
            "pool deployed"
        );
        Ok(pool)
    }
}
