//! Constant-weighted-product pricing and share issuance.
//!
//! These mirror Balancer V1's `BMath` step for step so that a preview
//! computed off the pool state equals what the pool itself mints.
//!
//! # Invariant
//!
//! ```text
//! V = ∏ Bᵢ ^ wᵢ        (wᵢ normalized, Σ wᵢ = 1)
//! ```
//!
//! A single-token deposit behaves like a swap of the non-weighted part
//! into the other constituents, so only that portion pays the swap fee:
//!
//! ```text
//! zaz           = (1 − w) · fee
//! in_after_fee  = amount_in · (1 − zaz)
//! pool_ratio    = ((B + in_after_fee) / B) ^ w
//! shares_out    = pool_ratio · supply − supply
//! ```

use super::Bfp;
use crate::domain::Amount;
use crate::error::{Result, ZapError};

/// Largest single deposit or swap input, as a fraction of the balance.
pub const MAX_IN_RATIO: Bfp = Bfp::from_wei_u128(500_000_000_000_000_000);

/// Spot price of `token_out` in units of `token_in`, fee included.
///
/// Weights may be denormalized; only their ratio matters.
///
/// # Errors
///
/// Returns [`ZapError::DivisionByZero`] for zero weights or balances.
pub fn calc_spot_price(
    balance_in: Bfp,
    weight_in: Bfp,
    balance_out: Bfp,
    weight_out: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp> {
    let numer = balance_in.div(weight_in)?;
    let denom = balance_out.div(weight_out)?;
    let ratio = numer.div(denom)?;
    let scale = Bfp::ONE.div(swap_fee.complement()?)?;
    ratio.mul(scale)
}

/// Output of an exact-in swap between two constituents.
///
/// # Errors
///
/// - [`ZapError::DivisionByZero`] for zero weights or balances.
/// - [`ZapError::PowBaseOutOfRange`] for degenerate balances.
pub fn calc_out_given_in(
    balance_in: Bfp,
    weight_in: Bfp,
    balance_out: Bfp,
    weight_out: Bfp,
    amount_in: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp> {
    let weight_ratio = weight_in.div(weight_out)?;
    let adjusted_in = amount_in.mul(swap_fee.complement()?)?;
    let y = balance_in.div(balance_in.add(adjusted_in)?)?;
    let foo = y.pow(weight_ratio)?;
    let bar = foo.complement()?;
    balance_out.mul(bar)
}

/// Pool shares minted for a single-token deposit.
///
/// `normalized_weight` is the token's denormalized weight divided by the
/// pool's total weight.
///
/// # Errors
///
/// - [`ZapError::InsufficientLiquidity`] if `balance_in` is zero.
/// - [`ZapError::PowBaseOutOfRange`] if the deposit doubles the balance
///   or more.
/// - Arithmetic errors from the fixed-point primitives.
pub fn calc_pool_out_given_single_in(
    balance_in: Bfp,
    normalized_weight: Bfp,
    pool_supply: Bfp,
    amount_in: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp> {
    if balance_in.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    let zaz = normalized_weight.complement()?.mul(swap_fee)?;
    let in_after_fee = amount_in.mul(zaz.complement()?)?;
    let new_balance = balance_in.add(in_after_fee)?;
    let ratio = new_balance.div(balance_in)?;
    let pool_ratio = ratio.pow(normalized_weight)?;
    let new_supply = pool_ratio.mul(pool_supply)?;
    new_supply.sub(pool_supply)
}

/// Largest admissible single-token input for a constituent balance.
///
/// # Errors
///
/// Returns [`ZapError::Overflow`] on overflow.
pub fn max_in(balance: Bfp) -> Result<Bfp> {
    balance.mul(MAX_IN_RATIO)
}

/// Shares a single-token join mints at the given state, after the
/// max-in-ratio guard.
///
/// This is the one function both the pool's join and every preview go
/// through.
///
/// # Errors
///
/// - [`ZapError::InsufficientLiquidity`] if `balance` is zero.
/// - [`ZapError::MaxInRatioExceeded`] if `amount_in` exceeds half of
///   `balance`.
/// - Arithmetic errors from [`calc_pool_out_given_single_in`].
pub fn single_in_shares(
    balance: Amount,
    normalized_weight: Bfp,
    supply: Amount,
    amount_in: Amount,
    swap_fee: Bfp,
) -> Result<Amount> {
    if balance.is_zero() {
        return Err(ZapError::InsufficientLiquidity);
    }
    let balance = Bfp::from(balance);
    let amount = Bfp::from(amount_in);
    if amount > max_in(balance)? {
        return Err(ZapError::MaxInRatioExceeded);
    }
    calc_pool_out_given_single_in(balance, normalized_weight, Bfp::from(supply), amount, swap_fee)?
        .to_amount()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn bfp(v: u128) -> Bfp {
        Bfp::from_wei_u128(v)
    }

    fn fee() -> Bfp {
        // 0.15%
        bfp(1_500_000_000_000_000)
    }

    // -- spot price ---------------------------------------------------------

    #[test]
    fn spot_price_equal_weights_no_fee() {
        let Ok(p) = calc_spot_price(
            bfp(200 * E18),
            Bfp::ONE,
            bfp(100 * E18),
            Bfp::ONE,
            Bfp::ZERO,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(p, Bfp::from_integer(2));
    }

    #[test]
    fn spot_price_includes_fee() {
        let Ok(with_fee) = calc_spot_price(Bfp::ONE, Bfp::ONE, Bfp::ONE, Bfp::ONE, fee()) else {
            panic!("expected Ok");
        };
        assert!(with_fee > Bfp::ONE);
    }

    // -- swap out -----------------------------------------------------------

    #[test]
    fn out_given_in_equal_weights_matches_constant_product() {
        // 50/50, no fee: out = 100 * (1 - 100/110) = 9.0909…
        let Ok(out) = calc_out_given_in(
            bfp(100 * E18),
            Bfp::ONE,
            bfp(100 * E18),
            Bfp::ONE,
            bfp(10 * E18),
            Bfp::ZERO,
        ) else {
            panic!("expected Ok");
        };
        let (diff, _) = out.sub_sign(bfp(9_090_909_090_909_090_909));
        assert!(diff <= bfp(1_000));
    }

    #[test]
    fn out_given_in_fee_reduces_output() {
        let args = (bfp(100 * E18), Bfp::ONE, bfp(100 * E18), Bfp::ONE, bfp(E18));
        let Ok(free) = calc_out_given_in(args.0, args.1, args.2, args.3, args.4, Bfp::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(paid) = calc_out_given_in(args.0, args.1, args.2, args.3, args.4, fee()) else {
            panic!("expected Ok");
        };
        assert!(paid < free);
    }

    // -- pool out -----------------------------------------------------------

    #[test]
    fn pool_out_full_weight_is_proportional() {
        // w = 1: shares = supply * amount / balance exactly (no fee applies).
        let Ok(out) = calc_pool_out_given_single_in(
            bfp(100 * E18),
            Bfp::ONE,
            bfp(100 * E18),
            bfp(10 * E18),
            fee(),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(out, bfp(10 * E18));
    }

    #[test]
    fn pool_out_half_weight() {
        // w = 0.5, no fee: supply * (sqrt(1.21) - 1) = 100 * 0.1 = 10
        let Ok(out) = calc_pool_out_given_single_in(
            bfp(100 * E18),
            bfp(E18 / 2),
            bfp(100 * E18),
            bfp(21 * E18),
            Bfp::ZERO,
        ) else {
            panic!("expected Ok");
        };
        let (diff, _) = out.sub_sign(bfp(10 * E18));
        assert!(diff <= bfp(1_000_000_000_000));
    }

    #[test]
    fn pool_out_is_monotone_in_amount() {
        let w = bfp(E18 / 20);
        let mut last = Bfp::ZERO;
        for k in [1u128, 2, 5, 10, 40] {
            let Ok(out) =
                calc_pool_out_given_single_in(bfp(100 * E18), w, bfp(100 * E18), bfp(k * E18), fee())
            else {
                panic!("expected Ok");
            };
            assert!(out >= last);
            last = out;
        }
    }

    #[test]
    fn pool_out_zero_balance() {
        assert!(matches!(
            calc_pool_out_given_single_in(Bfp::ZERO, Bfp::ONE, Bfp::ONE, Bfp::ONE, fee()),
            Err(ZapError::InsufficientLiquidity)
        ));
    }

    #[test]
    fn single_in_shares_guards_ratio() {
        let bal = Amount::new(10 * E18);
        let supply = Amount::new(100 * E18);
        assert!(matches!(
            single_in_shares(bal, Bfp::ONE, supply, Amount::new(5 * E18 + 1), fee()),
            Err(ZapError::MaxInRatioExceeded)
        ));
        let Ok(shares) = single_in_shares(bal, Bfp::ONE, supply, Amount::new(5 * E18), fee()) else {
            panic!("expected Ok");
        };
        assert_eq!(shares, Amount::new(50 * E18));
    }

    #[test]
    fn single_in_shares_zero_balance() {
        assert!(matches!(
            single_in_shares(Amount::ZERO, Bfp::ONE, Amount::new(1), Amount::new(1), fee()),
            Err(ZapError::InsufficientLiquidity)
        ));
    }

    #[test]
    fn max_in_is_half_balance() {
        let Ok(m) = max_in(bfp(10 * E18)) else {
            panic!("expected Ok");
        };
        assert_eq!(m, bfp(5 * E18));
    }
}
