//! Ledger assets: the native currency or a token.

use core::fmt;

use super::TokenAddress;

/// Anything an account can hold a balance of.
///
/// The native network currency has no token address and cannot be
/// approved for spending; it moves only by direct transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    /// The chain's native currency.
    Native,
    /// A fungible token.
    Token(TokenAddress),
}

impl Asset {
    /// Returns `true` for the native currency.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Returns the token address, or `None` for the native currency.
    #[must_use]
    pub const fn token(&self) -> Option<TokenAddress> {
        match self {
            Self::Native => None,
            Self::Token(t) => Some(*t),
        }
    }
}

impl From<TokenAddress> for Asset {
    fn from(token: TokenAddress) -> Self {
        Self::Token(token)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Token(t) => write!(f, "token({t})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_has_no_token() {
        assert!(Asset::Native.is_native());
        assert_eq!(Asset::Native.token(), None);
    }

    #[test]
    fn token_round_trip() {
        let t = TokenAddress::from_bytes([3u8; 32]);
        let asset = Asset::from(t);
        assert!(!asset.is_native());
        assert_eq!(asset.token(), Some(t));
    }

    #[test]
    fn native_orders_first() {
        assert!(Asset::Native < Asset::Token(TokenAddress::zero()));
    }
}
