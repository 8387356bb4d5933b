//! Explicit rounding direction for arithmetic operations.

use primitive_types::U256;

/// Rounding direction for divisions on domain types.
///
/// Every division that can lose precision names its direction, so the
/// side that absorbs the rounding dust is always explicit: fees and
/// amounts owed to a pool round up, amounts paid out round down.
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::Rounding;
/// use primitive_types::U256;
///
/// assert_eq!(Rounding::Up.div(U256::from(7), U256::from(2)), Some(U256::from(4)));
/// assert_eq!(Rounding::Down.div(U256::from(7), U256::from(2)), Some(U256::from(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Divides `numerator` by `denominator` in this direction.
    ///
    /// Returns `None` when `denominator` is zero.
    #[must_use]
    pub fn div(self, numerator: U256, denominator: U256) -> Option<U256> {
        if denominator.is_zero() {
            return None;
        }
        let (q, r) = numerator.div_mod(denominator);
        match self {
            Self::Up if !r.is_zero() => q.checked_add(U256::one()),
            _ => Some(q),
        }
    }
}
