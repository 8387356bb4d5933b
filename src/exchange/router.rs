//! Multi-pair router with a native-asset hop.
//!
//! # Routing
//!
//! ```text
//! direct:  asset_in ──pair──▶ asset_out
//! hop:     asset_in ──pair──▶ Native ──pair──▶ asset_out
//! ```
//!
//! A direct pair always wins. The native hop is tried only when neither
//! side is native. All pair reserves sit under the router's single
//! custody account.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::Pair;
use crate::config::PairConfig;
use crate::domain::{Account, Amount, Asset, SwapLeg, SwapReceipt, Timestamp};
use crate::error::{Result, ZapError};
use crate::ledger::Transaction;
use crate::traits::{Exchanger, FromConfig, SwapOrder};

/// Order-independent key of a pair.
fn pair_key(a: Asset, b: Asset) -> (Asset, Asset) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Constant-product exchange over a set of [`Pair`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    account: Account,
    pairs: BTreeMap<(Asset, Asset), Pair>,
}

impl Router {
    /// Creates an empty router custodied by `account`.
    #[must_use]
    pub const fn new(account: Account) -> Self {
        Self {
            account,
            pairs: BTreeMap::new(),
        }
    }

    /// Lists a pair, funding its reserves from `provider`.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidConfiguration`] if the pair is already listed.
    /// - Validation errors of [`PairConfig`].
    /// - [`ZapError::TransferFailed`] if `provider` cannot cover the
    ///   reserves.
    pub fn add_pair(
        &mut self,
        tx: &mut Transaction<'_>,
        provider: Account,
        config: &PairConfig,
    ) -> Result<()> {
        let key = pair_key(config.asset_a(), config.asset_b());
        if self.pairs.contains_key(&key) {
            return Err(ZapError::InvalidConfiguration("pair is already listed"));
        }
        let pair = Pair::from_config(config)?;
        tx.transfer(provider, self.account, config.asset_a(), config.reserve_a())?;
        tx.transfer(provider, self.account, config.asset_b(), config.reserve_b())?;
        self.pairs.insert(key, pair);
        debug!(a = %config.asset_a(), b = %config.asset_b(), "pair listed");
        Ok(())
    }

    /// The pair trading `a` against `b`, if listed.
    #[must_use]
    pub fn pair(&self, a: Asset, b: Asset) -> Option<&Pair> {
        self.pairs.get(&pair_key(a, b))
    }

    /// Hops connecting `asset_in` to `asset_out`.
    fn route(&self, asset_in: Asset, asset_out: Asset) -> Result<Vec<(Asset, Asset)>> {
        if asset_in == asset_out {
            return Err(ZapError::InvalidToken("cannot swap an asset for itself"));
        }
        if self.pair(asset_in, asset_out).is_some() {
            return Ok(vec![(asset_in, asset_out)]);
        }
        if !asset_in.is_native()
            && !asset_out.is_native()
            && self.pair(asset_in, Asset::Native).is_some()
            && self.pair(Asset::Native, asset_out).is_some()
        {
            return Ok(vec![(asset_in, Asset::Native), (Asset::Native, asset_out)]);
        }
        Err(ZapError::PairNotFound)
    }

    /// Simulates every hop against current reserves.
    fn simulate(&self, asset_in: Asset, amount_in: Amount, asset_out: Asset) -> Result<Vec<SwapLeg>> {
        let hops = self.route(asset_in, asset_out)?;
        let mut legs = Vec::with_capacity(hops.len());
        let mut amount = amount_in;
        for (hop_in, hop_out) in hops {
            let pair = self.pair(hop_in, hop_out).ok_or(ZapError::PairNotFound)?;
            let (out, _fee) = pair.quote_exact_in(hop_in, amount)?;
            legs.push(SwapLeg {
                asset_in: hop_in,
                asset_out: hop_out,
                amount_in: amount,
                amount_out: out,
            });
            amount = out;
        }
        Ok(legs)
    }

    fn pair_mut(&mut self, a: Asset, b: Asset) -> Result<&mut Pair> {
        self.pairs
            .get_mut(&pair_key(a, b))
            .ok_or(ZapError::PairNotFound)
    }
}

impl Exchanger for Router {
    fn account(&self) -> Account {
        self.account
    }

    fn quote(&self, asset_in: Asset, amount_in: Amount, asset_out: Asset) -> Result<Amount> {
        let legs = self.simulate(asset_in, amount_in, asset_out)?;
        Ok(legs.last().map_or(Amount::ZERO, |leg| leg.amount_out))
    }

    #[instrument(skip(self, tx), fields(asset_in = %order.asset_in, asset_out = %order.asset_out))]
    fn swap(
        &mut self,
        tx: &mut Transaction<'_>,
        order: &SwapOrder,
        now: Timestamp,
    ) -> Result<SwapReceipt> {
        if now > order.deadline {
            return Err(ZapError::DeadlineExpired {
                now,
                deadline: order.deadline,
            });
        }
        let legs = self.simulate(order.asset_in, order.amount_in, order.asset_out)?;
        let amount_out = legs.last().map_or(Amount::ZERO, |leg| leg.amount_out);
        if amount_out < order.min_amount_out {
            return Err(ZapError::SlippageExceeded {
                min_out: order.min_amount_out,
                actual: amount_out,
            });
        }

        match order.asset_in {
            Asset::Native => {
                tx.transfer(order.sender, self.account, Asset::Native, order.amount_in)?;
            }
            Asset::Token(token) => {
                tx.transfer_from(self.account, order.sender, self.account, token, order.amount_in)?;
            }
        }
        tx.transfer(self.account, order.recipient, order.asset_out, amount_out)?;

        for leg in &legs {
            self.pair_mut(leg.asset_in, leg.asset_out)?
                .apply(leg.asset_in, leg.amount_in, leg.amount_out)?;
        }

        debug!(amount_in = %order.amount_in, %amount_out, hops = legs.len(), "swap executed");
        Ok(SwapReceipt {
            sender: order.sender,
            recipient: order.recipient,
            asset_in: order.asset_in,
            asset_out: order.asset_out,
            amount_in: order.amount_in,
            amount_out,
            legs,
        })
    }

    fn revert_swap(&mut self, receipt: &SwapReceipt) -> Result<()> {
        for leg in receipt.legs.iter().rev() {
            self.pair_mut(leg.asset_in, leg.asset_out)?
                .unapply(leg.asset_in, leg.amount_in, leg.amount_out)?;
        }
        debug!(hops = receipt.legs.len(), "swap reverted");
        Ok(())
    }
}
