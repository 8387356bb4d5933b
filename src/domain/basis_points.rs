//! Basis-point percentages and exchange fee tiers.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::{Result, ZapError};

/// One whole, in basis points.
const MAX_BPS: u32 = 10_000;

/// Hundredths of a percent; slippage tolerances and exchange fees use it.
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.apply(Amount::new(10_000), Rounding::Down).ok(), Some(Amount::new(30)));
/// assert_eq!(bp.complement().ok(), Some(BasisPoints::new(9_970)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// No tolerance, no fee.
    pub const ZERO: Self = Self(0);

    /// The whole amount.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Wraps a raw count; values above 100% are representable.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Returns `10_000 − self`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Underflow`] if the value exceeds 100%.
    pub const fn complement(&self) -> Result<Self> {
        match MAX_BPS.checked_sub(self.0) {
            Some(v) => Ok(Self(v)),
            None => Err(ZapError::Underflow("basis points above 100%")),
        }
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so only a result above
    /// `u128::MAX` (possible for values above 100%) fails.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if the result does not fit.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        amount
            .mul_div(
                &Amount::new(u128::from(self.0)),
                &Amount::new(u128::from(MAX_BPS)),
                rounding,
            )
            .ok_or(ZapError::Overflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

/// Swap fee charged by an exchange pair, taken from the input amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const FREE: Self = Self(BasisPoints::ZERO);

    /// 0.25% fee, the PancakeSwap v2 default.
    pub const TIER_0_25_PERCENT: Self = Self(BasisPoints::new(25));

    /// 0.30% fee, the Uniswap v2 default.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// Creates a fee tier from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Fee owed on `amount_in`, rounded up in favour of the pair.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if the fee does not fit.
    pub fn fee_on(&self, amount_in: Amount) -> Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- BasisPoints --------------------------------------------------------

    #[test]
    fn constants_and_validity() {
        assert_eq!(BasisPoints::MAX_PERCENT.get(), 10_000);
        assert!(BasisPoints::new(10_000).is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement() {
        let Ok(c) = BasisPoints::new(100).complement() else {
            panic!("expected Ok");
        };
        assert_eq!(c.get(), 9_900);
        assert!(matches!(
            BasisPoints::new(10_001).complement(),
            Err(ZapError::Underflow(_))
        ));
    }

    #[test]
    fn apply_rounding() {
        let bp = BasisPoints::new(30);
        let Ok(down) = bp.apply(Amount::new(1_001), Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = bp.apply(Amount::new(1_001), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down.get(), 3);
        assert_eq!(up.get(), 4);
    }

    #[test]
    fn apply_does_not_overflow_at_max_amount() {
        let Ok(r) = BasisPoints::new(5_000).apply(Amount::MAX, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(r.get(), u128::MAX / 2);
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(42).to_string(), "42bp");
    }

    // -- FeeTier ------------------------------------------------------------

    #[test]
    fn fee_rounds_up() {
        let Ok(fee) = FeeTier::TIER_0_30_PERCENT.fee_on(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(fee.get(), 1);
    }

    #[test]
    fn free_tier_charges_nothing() {
        let Ok(fee) = FeeTier::FREE.fee_on(Amount::new(1_000_000)) else {
            panic!("expected Ok");
        };
        assert!(fee.is_zero());
    }

    #[test]
    fn fee_tier_display() {
        assert_eq!(FeeTier::TIER_0_25_PERCENT.to_string(), "FeeTier(25bp)");
    }
}
