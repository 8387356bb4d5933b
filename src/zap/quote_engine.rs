//! Read-only planning: which constituent to route into and how many
//! shares to insist on.
//!
//! # Underlying Selection
//!
//! ```text
//! share_i     = B_i / Σ B
//! imbalance_i = | share_i − w_i |
//! pick argmin imbalance_i, ties → lower w_i, then earlier in pool order
//! ```
//!
//! # Share Floor
//!
//! ```text
//! underlying = input                       (input is the underlying)
//!            | exchanger.quote(input → underlying)
//! expected   = shares(underlying) [+ shares(secondary) on the post-join state]
//! floor      = ⌊expected × (1 − slippage)⌋
//! ```
//!
//! Share math goes through [`single_in_shares`], the same function the
//! pool's join uses, so a quote taken and executed against unchanged state
//! mints exactly `expected`.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{
    Amount, Asset, Constituent, PoolKind, Quote, SecondaryLeg, Slippage, TokenAddress, ZapInput,
};
use crate::error::{Result, ZapError};
use crate::math::weighted_math::single_in_shares;
use crate::math::{Bfp, CheckedArithmetic};
use crate::traits::{Exchanger, WeightedPoolSurface};

/// Stateless quoting functions over a pool and an exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteEngine;

impl QuoteEngine {
    /// Picks the constituent a single-asset zap should route into.
    ///
    /// Deterministic for identical pool state.
    ///
    /// # Errors
    ///
    /// - [`ZapError::UnsupportedPoolKind`] if `kind` is not the pool's.
    /// - [`ZapError::EmptyPool`] if the pool has no constituents.
    pub fn choose_underlying_token<P>(pool: &P, kind: PoolKind) -> Result<TokenAddress>
    where
        P: WeightedPoolSurface + ?Sized,
    {
        check_kind(pool, kind)?;
        let constituents = pool.constituents();
        if constituents.is_empty() {
            return Err(ZapError::EmptyPool);
        }

        let total = constituents
            .iter()
            .try_fold(Bfp::ZERO, |acc, c| acc.add(Bfp::from(c.balance())))?;

        let mut best: Option<(Bfp, &Constituent)> = None;
        for c in &constituents {
            let share = if total.is_zero() {
                Bfp::ZERO
            } else {
                Bfp::from(c.balance()).div(total)?
            };
            let (imbalance, _) = share.sub_sign(c.weight());
            let better = match best {
                None => true,
                Some((best_imbalance, best_c)) => match imbalance.cmp(&best_imbalance) {
                    Ordering::Less => true,
                    Ordering::Equal => c.weight() < best_c.weight(),
                    Ordering::Greater => false,
                },
            };
            if better {
                best = Some((imbalance, c));
            }
        }

        let (imbalance, chosen) = best.ok_or(ZapError::EmptyPool)?;
        debug!(pool = %pool.id(), token = %chosen.token(), %imbalance, "underlying chosen");
        Ok(chosen.token())
    }

    /// Quotes a single-token zap and derives its share floor.
    ///
    /// With a `secondary` leg, the second join is quoted against the pool
    /// state the first join leaves behind, and the expectation is the sum.
    ///
    /// # Errors
    ///
    /// - [`ZapError::UnsupportedPoolKind`] if `kind` is not the pool's.
    /// - [`ZapError::InvalidToken`] if `underlying` or the secondary token
    ///   is not a constituent.
    /// - [`ZapError::InsufficientLiquidity`] if a balance involved is zero
    ///   or the exchanger has no route.
    /// - [`ZapError::MaxInRatioExceeded`] if a leg is too large to join.
    pub fn calc_min_pool_amount_out<P, X>(
        pool: &P,
        kind: PoolKind,
        exchanger: &X,
        underlying: TokenAddress,
        input: ZapInput,
        secondary: Option<SecondaryLeg>,
        slippage: Slippage,
    ) -> Result<Quote>
    where
        P: WeightedPoolSurface + ?Sized,
        X: Exchanger + ?Sized,
    {
        check_kind(pool, kind)?;
        let constituents = pool.constituents();
        let main = find(&constituents, underlying)?;

        let underlying_amount = if input.asset() == Asset::Token(underlying) {
            input.amount()
        } else {
            quote_exchange(exchanger, input.asset(), input.amount(), Asset::Token(underlying))?
        };

        let supply = pool.total_share_supply();
        let fee = pool.swap_fee();
        let first = single_in_shares(main.balance(), main.weight(), supply, underlying_amount, fee)?;

        let expected = match secondary {
            None => first,
            Some(leg) => {
                let second_c = find(&constituents, leg.token())?;
                let balance = if leg.token() == underlying {
                    second_c.balance().safe_add(&underlying_amount)?
                } else {
                    second_c.balance()
                };
                let supply_after = supply.safe_add(&first)?;
                let second =
                    single_in_shares(balance, second_c.weight(), supply_after, leg.amount(), fee)?;
                first.safe_add(&second)?
            }
        };

        let min_pool_amount_out = slippage.apply_floor(expected)?;
        debug!(
            pool = %pool.id(),
            %underlying,
            %underlying_amount,
            %expected,
            floor = %min_pool_amount_out,
            "zap quoted"
        );
        Ok(Quote {
            underlying,
            expected_underlying_amount: underlying_amount,
            expected_pool_amount_out: expected,
            min_pool_amount_out,
        })
    }
}

/// Fails unless `kind` matches the pool's wrapper state.
pub(crate) fn check_kind<P>(pool: &P, kind: PoolKind) -> Result<()>
where
    P: WeightedPoolSurface + ?Sized,
{
    let actual = pool.kind();
    if actual != kind {
        return Err(ZapError::UnsupportedPoolKind {
            requested: kind,
            actual,
        });
    }
    Ok(())
}

/// Exchanger quote with "no route" reported as missing liquidity.
pub(crate) fn quote_exchange<X>(
    exchanger: &X,
    asset_in: Asset,
    amount_in: Amount,
    asset_out: Asset,
) -> Result<Amount>
where
    X: Exchanger + ?Sized,
{
    exchanger
        .quote(asset_in, amount_in, asset_out)
        .map_err(|err| match err {
            ZapError::PairNotFound => ZapError::InsufficientLiquidity,
            other => other,
        })
}

fn find(constituents: &[Constituent], token: TokenAddress) -> Result<Constituent> {
    constituents
        .iter()
        .find(|c| c.token() == token)
        .copied()
        .ok_or(ZapError::InvalidToken("token is not a pool constituent"))
}
