//! Checked arithmetic on [`Amount`] with typed errors.
//!
//! [`Amount`]'s own checked methods return `Option`. Pool and ledger code
//! needs to say *what* went wrong, so this trait maps each `None` to the
//! matching [`ZapError`] variant. That way `?` can propagate it.
//!
//! # Examples
//!
//! ```
//! use hydra_zap::domain::Amount;
//! use hydra_zap::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum.ok(), Some(Amount::new(300)));
//! assert!(Amount::ZERO.safe_sub(&Amount::new(1)).is_err());
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::{Result, ZapError};

/// Fallible arithmetic returning [`ZapError`] instead of `None`.
///
/// No method panics or saturates.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self>;

    /// `self × mul / div` with a wide intermediate.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::DivisionByZero`] if `div` is zero, or
    /// [`ZapError::Overflow`] if the quotient does not fit.
    fn safe_mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(ZapError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(ZapError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> Result<Self> {
        if div.is_zero() {
            return Err(ZapError::DivisionByZero);
        }
        self.mul_div(mul, div, rounding)
            .ok_or(ZapError::Overflow("amount mul_div overflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn add_ok_and_overflow() {
        let Ok(v) = Amount::new(1).safe_add(&Amount::new(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(v.get(), 3);
        assert!(matches!(
            Amount::MAX.safe_add(&Amount::new(1)),
            Err(ZapError::Overflow(_))
        ));
    }

    #[test]
    fn sub_underflow() {
        assert!(matches!(
            Amount::new(1).safe_sub(&Amount::new(2)),
            Err(ZapError::Underflow(_))
        ));
    }

    #[test]
    fn mul_div_errors_are_distinct() {
        assert!(matches!(
            Amount::new(1).safe_mul_div(&Amount::new(1), &Amount::ZERO, Rounding::Down),
            Err(ZapError::DivisionByZero)
        ));
        assert!(matches!(
            Amount::MAX.safe_mul_div(&Amount::MAX, &Amount::new(1), Rounding::Down),
            Err(ZapError::Overflow(_))
        ));
    }

    #[test]
    fn mul_div_ok() {
        let Ok(v) = Amount::new(9).safe_mul_div(&Amount::new(2), &Amount::new(4), Rounding::Up)
        else {
            panic!("expected Ok");
        };
        assert_eq!(v.get(), 5);
    }
}
