//! Token metadata: address and decimal precision.

use core::fmt;

use super::{Amount, TokenAddress};
use crate::error::{Result, ZapError};

/// Maximum decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of a token, in `0..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimals(u8);

impl Decimals {
    /// Eighteen decimals, the precision of the native currency and of
    /// pool shares.
    pub const EIGHTEEN: Self = Self(MAX_DECIMALS);

    /// Creates a validated `Decimals`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(ZapError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// `10^decimals`.
    #[must_use]
    pub const fn factor(&self) -> u128 {
        10u128.pow(self.0 as u32)
    }
}

/// A token that can be bound into a weighted pool or traded on the
/// exchange.
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::{Decimals, Token, TokenAddress};
///
/// let Ok(six) = Decimals::new(6) else { return };
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), six);
/// assert_eq!(usdc.units(3).get(), 3_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    address: TokenAddress,
    decimals: Decimals,
}

impl Token {
    /// Creates a token descriptor.
    #[must_use]
    pub const fn new(address: TokenAddress, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// An 18-decimal token, the common case.
    #[must_use]
    pub const fn standard(address: TokenAddress) -> Self {
        Self::new(address, Decimals::EIGHTEEN)
    }

    /// Token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Decimal precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Raw amount for `whole` human units. Cannot overflow:
    /// `u64::MAX × 10^18 < u128::MAX`.
    pub const fn units(&self, whole: u64) -> Amount {
        Amount::new(whole as u128 * self.decimals.factor())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.decimals.get())
    }
}
