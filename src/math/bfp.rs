//! 18-decimal fixed-point arithmetic in the style of Balancer's `BNum`.
//!
//! A [`Bfp`] wraps a `U256` scaled by `BONE = 10^18`. Multiplication and
//! division round half-up, exactly as the on-chain pool does. Both the
//! pool's own accounting and the zapper's previews therefore agree to
//! the last wei.
//!
//! ```text
//! mul(a, b) = (a·b + BONE/2) / BONE
//! div(a, b) = (a·BONE + b/2) / b
//! pow(b, e) = powi(b, ⌊e⌋) · approx(b, e − ⌊e⌋)
//! ```
//!
//! The fractional power uses the binomial series of `(1 + x)^e` around
//! `x = b − 1`. The series stops once a term drops below
//! [`POW_PRECISION`]. It only converges for bases in `(0, 2)`.

use core::fmt;

use primitive_types::U256;

use crate::domain::Amount;
use crate::error::{Result, ZapError};

/// `10^18`.
const BONE_WEI: u64 = 1_000_000_000_000_000_000;

/// `10^18` as a `U256`.
const BONE: U256 = U256([BONE_WEI, 0, 0, 0]);

/// Smallest accepted base for [`Bfp::pow`] (1 wei).
const MIN_POW_BASE: U256 = U256([1, 0, 0, 0]);

/// Largest accepted base for [`Bfp::pow`] (`2·BONE − 1` wei).
const MAX_POW_BASE: U256 = U256([2 * BONE_WEI - 1, 0, 0, 0]);

/// Series cut-off for fractional powers (`BONE / 10^10`).
pub const POW_PRECISION: Bfp = Bfp(U256([100_000_000, 0, 0, 0]));

/// Balancer fixed-point number: a `U256` value scaled by `10^18`.
///
/// # Examples
///
/// ```
/// use hydra_zap::math::Bfp;
///
/// let half = Bfp::from_wei_u128(500_000_000_000_000_000);
/// let Ok(q) = half.mul(half) else { return };
/// assert_eq!(q, Bfp::from_wei_u128(250_000_000_000_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bfp(U256);

impl Bfp {
    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One (`BONE` wei).
    pub const ONE: Self = Self(BONE);

    /// Wraps a raw wei value.
    #[must_use]
    pub const fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// Wraps a raw wei value given as `u128`.
    #[must_use]
    pub const fn from_wei_u128(wei: u128) -> Self {
        Self(U256([wei as u64, (wei >> 64) as u64, 0, 0]))
    }

    /// `n · BONE`.
    #[must_use]
    pub fn from_integer(n: u64) -> Self {
        Self(U256::from(n).saturating_mul(BONE))
    }

    /// Reinterprets a raw amount as a fixed-point value, wei for wei.
    #[must_use]
    pub fn from_amount(amount: Amount) -> Self {
        Self(amount.to_u256())
    }

    /// Raw wei value.
    #[must_use]
    pub const fn as_wei(&self) -> U256 {
        self.0
    }

    /// Narrows back to an [`Amount`].
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if the value exceeds `u128`.
    pub fn to_amount(&self) -> Result<Amount> {
        Amount::from_u256(self.0).ok_or(ZapError::Overflow("fixed point value exceeds u128"))
    }

    /// `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] on overflow.
    pub fn add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ZapError::Overflow("fixed point add overflow"))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Underflow`] if `other > self`.
    pub fn sub(self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(ZapError::Underflow("fixed point sub underflow"))
    }

    /// Absolute difference and whether it is negative (`other > self`).
    #[must_use]
    pub fn sub_sign(self, other: Self) -> (Self, bool) {
        if self.0 >= other.0 {
            (Self(self.0 - other.0), false)
        } else {
            (Self(other.0 - self.0), true)
        }
    }

    /// Fixed-point multiplication, rounding half-up.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if the intermediate product
    /// overflows 256 bits.
    pub fn mul(self, other: Self) -> Result<Self> {
        let c0 = self
            .0
            .checked_mul(other.0)
            .ok_or(ZapError::Overflow("fixed point mul overflow"))?;
        let c1 = c0
            .checked_add(BONE >> 1)
            .ok_or(ZapError::Overflow("fixed point mul overflow"))?;
        Ok(Self(c1 / BONE))
    }

    /// Fixed-point division, rounding half-up.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::DivisionByZero`] if `other` is zero, or
    /// [`ZapError::Overflow`] if `self · BONE` overflows.
    pub fn div(self, other: Self) -> Result<Self> {
        if other.0.is_zero() {
            return Err(ZapError::DivisionByZero);
        }
        let c0 = self
            .0
            .checked_mul(BONE)
            .ok_or(ZapError::Overflow("fixed point div overflow"))?;
        let c1 = c0
            .checked_add(other.0 >> 1)
            .ok_or(ZapError::Overflow("fixed point div overflow"))?;
        Ok(Self(c1 / other.0))
    }

    /// Integer part (`⌊self⌋`) as a plain integer.
    #[must_use]
    pub fn to_integer(&self) -> U256 {
        self.0 / BONE
    }

    /// `⌊self⌋` as a fixed-point value.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self(self.to_integer() * BONE)
    }

    /// `1 − self`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Underflow`] if `self > 1`.
    pub fn complement(self) -> Result<Self> {
        Self::ONE.sub(self)
    }

    /// `self^n` for integer `n`, by repeated squaring.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if an intermediate square overflows.
    pub fn powi(self, n: u64) -> Result<Self> {
        let mut base = self;
        let mut n = n;
        let mut z = if n % 2 != 0 { base } else { Self::ONE };
        n /= 2;
        while n != 0 {
            base = base.mul(base)?;
            if n % 2 != 0 {
                z = z.mul(base)?;
            }
            n /= 2;
        }
        Ok(z)
    }

    /// `self^exp` for fractional `exp`, with `self` in `[1 wei, 2 − 1 wei]`.
    ///
    /// # Errors
    ///
    /// - [`ZapError::PowBaseOutOfRange`] if the base is outside the
    ///   convergent range.
    /// - [`ZapError::Overflow`] if the integer part of the exponent does
    ///   not fit in `u64` or an intermediate product overflows.
    pub fn pow(self, exp: Self) -> Result<Self> {
        if self.0 < MIN_POW_BASE || self.0 > MAX_POW_BASE {
            return Err(ZapError::PowBaseOutOfRange);
        }
        let whole = exp.floor();
        let remain = exp.sub(whole)?;
        let whole_exp = exp.to_integer();
        if whole_exp.bits() > 64 {
            return Err(ZapError::Overflow("fixed point pow exponent too large"));
        }
        let whole_pow = self.powi(whole_exp.low_u64())?;
        if remain.is_zero() {
            return Ok(whole_pow);
        }
        let partial = self.pow_approx(remain, POW_PRECISION)?;
        whole_pow.mul(partial)
    }

    /// Binomial-series approximation of `self^exp` for `exp < 1`.
    ///
    /// # Errors
    ///
    /// Propagates [`ZapError::Overflow`] / [`ZapError::Underflow`] from the
    /// series terms.
    pub fn pow_approx(self, exp: Self, precision: Self) -> Result<Self> {
        let a = exp;
        let (x, x_neg) = self.sub_sign(Self::ONE);
        let mut term = Self::ONE;
        let mut sum = term;
        let mut negative = false;

        let mut i: u64 = 1;
        while term >= precision {
            let big_k = Self::from_integer(i);
            let (c, c_neg) = a.sub_sign(big_k.sub(Self::ONE)?);
            term = term.mul(c.mul(x)?)?;
            term = term.div(big_k)?;
            if term.is_zero() {
                break;
            }
            if x_neg {
                negative = !negative;
            }
            if c_neg {
                negative = !negative;
            }
            sum = if negative {
                sum.sub(term)?
            } else {
                sum.add(term)?
            };
            i += 1;
        }
        Ok(sum)
    }
}

impl From<Amount> for Bfp {
    fn from(amount: Amount) -> Self {
        Self::from_amount(amount)
    }
}

impl fmt::Display for Bfp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (int, frac) = self.0.div_mod(BONE);
        write!(f, "{int}.{:018}", frac.low_u64())
    }
}
