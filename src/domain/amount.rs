//! Integer quantities of native currency, tokens and pool shares.

use core::fmt;

use primitive_types::U256;

use super::Rounding;

/// A quantity in base units (wei for 18-decimal assets).
///
/// Pool shares, native currency and tokens all count in this unit. The
/// `checked_*` helpers yield `None` instead of wrapping; the
/// [`CheckedArithmetic`](crate::math::CheckedArithmetic) impl maps the same
/// failures onto [`ZapError`](crate::error::ZapError).
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::{Amount, Rounding};
///
/// let deposit = Amount::new(1_000);
/// let fee = Amount::new(3);
/// assert_eq!(deposit.checked_sub(&fee), Some(Amount::new(997)));
/// assert_eq!(
///     Amount::new(10).mul_div(&Amount::new(1), &Amount::new(3), Rounding::Up),
///     Some(Amount::new(4)),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Nothing.
    pub const ZERO: Self = Self(0);

    /// Largest quantity; used as an unlimited allowance.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a base-unit count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Base-unit count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// `true` for an empty quantity.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum, or `None` past `u128::MAX`.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Difference, or `None` below zero.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `self × mul / div` with a 256-bit intermediate product.
    ///
    /// Returns `None` if `div` is zero or the quotient does not fit in
    /// `u128`.
    #[must_use]
    pub fn mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> Option<Self> {
        let product = U256::from(self.0).checked_mul(U256::from(mul.0))?;
        let q = rounding.div(product, U256::from(div.0))?;
        Self::from_u256(q)
    }

    /// Narrows a 256-bit value, returning `None` if it exceeds `u128`.
    #[must_use]
    pub fn from_u256(value: U256) -> Option<Self> {
        if value.bits() > 128 {
            return None;
        }
        Some(Self(value.low_u128()))
    }

    /// Widens to 256 bits.
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from(self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
