//! Caller slippage tolerance.

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::{Result, ZapError};

/// Maximum fractional degradation from an expected output, in `[0, 1)`.
///
/// Stored in basis points, so 100 = 1%. A tolerance of 100% is rejected
/// because it would turn every floor into zero.
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::{Amount, Slippage};
///
/// let Ok(one_percent) = Slippage::from_bps(100) else { return };
/// assert_eq!(one_percent.apply_floor(Amount::new(1_000)).ok(), Some(Amount::new(990)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Slippage(BasisPoints);

impl Slippage {
    /// Zero tolerance: the floor equals the expectation.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// Creates a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidSlippage`] unless `bps < 10_000`.
    pub const fn new(bps: BasisPoints) -> Result<Self> {
        if bps.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(ZapError::InvalidSlippage(
                "tolerance must be below 10000 basis points",
            ));
        }
        Ok(Self(bps))
    }

    /// Shorthand for [`new`](Self::new) from raw basis points.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidSlippage`] unless `bps < 10_000`.
    pub const fn from_bps(bps: u32) -> Result<Self> {
        Self::new(BasisPoints::new(bps))
    }

    /// Tolerance in basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// `expected × (1 − tolerance)`, rounded down.
    ///
    /// Non-increasing in the tolerance for any fixed `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidSlippage`] if the tolerance is out of
    /// range, which only a hand-built value can be.
    pub fn apply_floor(&self, expected: Amount) -> Result<Amount> {
        let keep = self
            .0
            .complement()
            .map_err(|_| ZapError::InvalidSlippage("tolerance above 100%"))?;
        keep.apply(expected, Rounding::Down)
    }
}

impl fmt::Display for Slippage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
