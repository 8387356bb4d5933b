//! Basket zaps: buy every constituent by weight, then join proportionally.
//!
//! # Split
//!
//! ```text
//! spend_i = ⌊input × w_i⌋          for every constituent but the last
//! spend_n = input − Σ spend_i      (the last takes the rounding remainder)
//! ```
//!
//! # Shares
//!
//! ```text
//! ratio_i   = ⌊bought_i × BONE / B_i⌋
//! shares    = ⌊min(ratio_i) × supply / BONE⌋
//! ```
//!
//! Both floors keep the pool's half-up proportional join at or below
//! `bought_i` for every constituent, so the join never asks for more than
//! the basket holds.

use tracing::debug;

use super::quote_engine::{check_kind, quote_exchange};
use super::QuoteEngine;
use crate::domain::{Amount, Asset, Constituent, PoolKind, Rounding, Slippage, TokenAddress, ZapInput};
use crate::error::{Result, ZapError};
use crate::math::{Bfp, CheckedArithmetic};
use crate::traits::{Exchanger, WeightedPoolSurface};

/// One purchase of a basket zap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasketPurchase {
    /// Constituent bought.
    pub token: TokenAddress,
    /// Input spent on it.
    pub spend: Amount,
    /// Constituent expected (or, once executed, received).
    pub bought: Amount,
}

/// Derived expectation for a basket zap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasketQuote {
    /// Purchases in pool order.
    pub purchases: Vec<BasketPurchase>,
    /// Shares the expected basket covers at current state.
    pub expected_pool_amount_out: Amount,
    /// Expected shares reduced by the slippage tolerance.
    pub min_pool_amount_out: Amount,
}

impl QuoteEngine {
    /// Quotes a basket zap of `input` into every constituent.
    ///
    /// # Errors
    ///
    /// - [`ZapError::UnsupportedPoolKind`] if `kind` is not the pool's.
    /// - [`ZapError::EmptyPool`] if the pool has no constituents.
    /// - [`ZapError::InsufficientLiquidity`] if the exchanger has no route
    ///   or a constituent balance is zero.
    /// - [`ZapError::InvalidQuantity`] if a constituent's slice of the
    ///   input is too small to trade.
    pub fn quote_basket<P, X>(
        pool: &P,
        kind: PoolKind,
        exchanger: &X,
        input: ZapInput,
        slippage: Slippage,
    ) -> Result<BasketQuote>
    where
        P: WeightedPoolSurface + ?Sized,
        X: Exchanger + ?Sized,
    {
        check_kind(pool, kind)?;
        let constituents = pool.constituents();
        let mut purchases = Vec::with_capacity(constituents.len());
        for (token, spend) in split_by_weight(input.amount(), &constituents)? {
            let bought = if input.asset() == Asset::Token(token) {
                spend
            } else {
                quote_exchange(exchanger, input.asset(), spend, Asset::Token(token))?
            };
            purchases.push(BasketPurchase { token, spend, bought });
        }
        let bought: Vec<Amount> = purchases.iter().map(|p| p.bought).collect();
        let expected = basket_pool_out(&constituents, pool.total_share_supply(), &bought)?;
        let min_pool_amount_out = slippage.apply_floor(expected)?;
        debug!(pool = %pool.id(), %expected, floor = %min_pool_amount_out, "basket quoted");
        Ok(BasketQuote {
            purchases,
            expected_pool_amount_out: expected,
            min_pool_amount_out,
        })
    }
}

/// Splits `amount` across `constituents` by normalized weight.
///
/// # Errors
///
/// - [`ZapError::EmptyPool`] for an empty pool.
/// - [`ZapError::Underflow`] if the weights sum above one by more than
///   the input can absorb.
pub fn split_by_weight(
    amount: Amount,
    constituents: &[Constituent],
) -> Result<Vec<(TokenAddress, Amount)>> {
    let Some((last, rest)) = constituents.split_last() else {
        return Err(ZapError::EmptyPool);
    };
    let one = Bfp::ONE.to_amount()?;
    let mut spent = Amount::ZERO;
    let mut out = Vec::with_capacity(constituents.len());
    for c in rest {
        let weight = c.weight().to_amount()?;
        let spend = amount.safe_mul_div(&weight, &one, Rounding::Down)?;
        spent = spent.safe_add(&spend)?;
        out.push((c.token(), spend));
    }
    out.push((last.token(), amount.safe_sub(&spent)?));
    Ok(out)
}

/// Largest proportional join `bought` (in pool order) fully covers.
///
/// # Errors
///
/// - [`ZapError::InvalidQuantity`] if `bought` has the wrong length.
/// - [`ZapError::InsufficientLiquidity`] if a constituent balance is zero.
pub fn basket_pool_out(
    constituents: &[Constituent],
    supply: Amount,
    bought: &[Amount],
) -> Result<Amount> {
    if bought.len() != constituents.len() {
        return Err(ZapError::InvalidQuantity(
            "one purchase per constituent is required",
        ));
    }
    let one = Bfp::ONE.to_amount()?;
    let mut min_ratio: Option<Amount> = None;
    for (c, amount) in constituents.iter().zip(bought) {
        if c.balance().is_zero() {
            return Err(ZapError::InsufficientLiquidity);
        }
        let ratio = amount.safe_mul_div(&one, &c.balance(), Rounding::Down)?;
        min_ratio = Some(min_ratio.map_or(ratio, |m| m.min(ratio)));
    }
    let ratio = min_ratio.ok_or(ZapError::EmptyPool)?;
    supply.safe_mul_div(&ratio, &one, Rounding::Down)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn constituent(byte: u8, balance: u128, weight: u128) -> Constituent {
        Constituent::new(
            TokenAddress::from_bytes([byte; 32]),
            Amount::new(balance),
            Bfp::from_wei_u128(weight),
            Bfp::from_wei_u128(weight),
        )
    }

    #[test]
    fn split_gives_remainder_to_last() {
        let cs = [
            constituent(1, E18, E18 / 3 + 1),
            constituent(2, E18, E18 / 3),
            constituent(3, E18, E18 / 3),
        ];
        let Ok(split) = split_by_weight(Amount::new(1_000), &cs) else {
            panic!("split");
        };
        let amounts: Vec<u128> = split.iter().map(|(_, a)| a.get()).collect();
        assert_eq!(amounts, vec![333, 333, 334]);
        assert_eq!(amounts.iter().sum::<u128>(), 1_000);
    }

    #[test]
    fn split_of_empty_pool_fails() {
        assert_eq!(split_by_weight(Amount::new(1), &[]), Err(ZapError::EmptyPool));
    }

    #[test]
    fn pool_out_limited_by_scarcest_purchase() {
        let cs = [constituent(1, 100 * E18, E18 / 2), constituent(2, 200 * E18, E18 / 2)];
        // ratios: 1% and 0.5% → 0.5% of supply
        let Ok(out) = basket_pool_out(&cs, Amount::new(100 * E18), &[Amount::new(E18), Amount::new(E18)])
        else {
            panic!("pool out");
        };
        assert_eq!(out, Amount::new(E18 / 2));
    }

    #[test]
    fn pool_out_rejects_mismatched_lengths() {
        let cs = [constituent(1, E18, E18)];
        assert!(matches!(
            basket_pool_out(&cs, Amount::new(E18), &[]),
            Err(ZapError::InvalidQuantity(_))
        ));
    }
}
