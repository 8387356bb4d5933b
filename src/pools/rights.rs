//! Configurable-rights wrapper around a [`WeightedPool`].
//!
//! The wrapper gates who may join and how far the share supply may grow.
//! Join economics are the inner pool's; a join that passes the gates mints
//! exactly what the same join on the bare pool would.

use tracing::debug;

use super::WeightedPool;
use crate::config::RightsPoolConfig;
use crate::domain::{
    Account, Amount, Constituent, JoinReceipt, PoolId, PoolKind, Rights, TokenAddress,
};
use crate::error::{Result, ZapError};
use crate::ledger::Transaction;
use crate::math::{Bfp, CheckedArithmetic};
use crate::traits::{FromConfig, WeightedPoolSurface};

/// A "smart" pool: a weighted pool plus a rights descriptor, an optional
/// share cap and an optional provider whitelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsPool {
    inner: WeightedPool,
    rights: Rights,
    cap: Option<Amount>,
    whitelist: Vec<Account>,
}

impl RightsPool {
    /// The wrapped pool.
    #[must_use]
    pub const fn inner(&self) -> &WeightedPool {
        &self.inner
    }

    /// Share cap, if any.
    #[must_use]
    pub const fn cap(&self) -> Option<Amount> {
        self.cap
    }

    /// Whether `account` may add liquidity.
    #[must_use]
    pub fn can_provide_liquidity(&self, account: Account) -> bool {
        !self.rights.can_whitelist_lps || self.whitelist.contains(&account)
    }

    fn check_access(&self, sender: Account) -> Result<()> {
        if self.can_provide_liquidity(sender) {
            Ok(())
        } else {
            Err(ZapError::NotWhitelisted)
        }
    }

    fn check_cap(&self, shares: Amount) -> Result<()> {
        let Some(cap) = self.cap else {
            return Ok(());
        };
        let after = self.inner.total_share_supply().safe_add(&shares)?;
        if after > cap {
            return Err(ZapError::CapExceeded);
        }
        Ok(())
    }
}

impl FromConfig<RightsPoolConfig> for RightsPool {
    /// Builds the wrapper and its inner pool.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RightsPoolConfig::validate`].
    fn from_config(config: &RightsPoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: WeightedPool::from_config(config.pool())?,
            rights: config.rights(),
            cap: config.cap(),
            whitelist: config.whitelist().to_vec(),
        })
    }
}

impl WeightedPoolSurface for RightsPool {
    fn id(&self) -> PoolId {
        self.inner.id()
    }

    fn kind(&self) -> PoolKind {
        PoolKind::RightsWrapped
    }

    fn rights(&self) -> Option<Rights> {
        Some(self.rights)
    }

    fn constituents(&self) -> Vec<Constituent> {
        self.inner.constituents()
    }

    fn total_share_supply(&self) -> Amount {
        self.inner.total_share_supply()
    }

    fn swap_fee(&self) -> Bfp {
        self.inner.swap_fee()
    }

    fn join_single_token(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token: TokenAddress,
        amount_in: Amount,
        min_shares_out: Amount,
    ) -> Result<JoinReceipt> {
        self.check_access(sender)?;
        if self.cap.is_some() {
            let shares = self.inner.preview_join_single_token(token, amount_in)?;
            self.check_cap(shares)?;
        }
        self.inner
            .join_single_token(tx, sender, token, amount_in, min_shares_out)
    }

    fn join_all(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        pool_amount_out: Amount,
        max_amounts_in: &[Amount],
    ) -> Result<JoinReceipt> {
        self.check_access(sender)?;
        self.check_cap(pool_amount_out)?;
        self.inner.join_all(tx, sender, pool_amount_out, max_amounts_in)
    }

    fn swap_exact_amount_in(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token_in: TokenAddress,
        amount_in: Amount,
        token_out: TokenAddress,
        min_amount_out: Amount,
    ) -> Result<Amount> {
        self.inner
            .swap_exact_amount_in(tx, sender, token_in, amount_in, token_out, min_amount_out)
    }

    fn spot_price(&self, token_in: TokenAddress, token_out: TokenAddress) -> Result<Bfp> {
        self.inner.spot_price(token_in, token_out)
    }

    fn revert_join(&mut self, receipt: &JoinReceipt) -> Result<()> {
        debug!(pool = %self.id(), "reverting join on rights pool");
        self.inner.revert_join(receipt)
    }
}
