//! Chain-agnostic 32-byte identifiers.
//!
//! Accounts, tokens and pools all share the same representation: a fixed
//! `[u8; 32]` value. They are distinct types so a pool id can never be
//! passed where a token address is expected.

use core::fmt;

macro_rules! address_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Creates the identifier from raw bytes.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Returns the underlying 32-byte representation.
            #[must_use]
            pub const fn as_bytes(&self) -> [u8; 32] {
                self.0
            }

            /// Returns the all-zero identifier.
            #[must_use]
            pub const fn zero() -> Self {
                Self([0u8; 32])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("0x")?;
                for byte in self.0.iter().take(4) {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("…")
            }
        }
    };
}

address_type! {
    /// An externally owned or contract account holding balances.
    Account
}

address_type! {
    /// Address of a fungible token.
    TokenAddress
}

address_type! {
    /// Identifier of a weighted pool.
    ///
    /// A pool is also the issuer of its own share token and the account
    /// holding its constituent balances, so the same bytes name all three.
    PoolId
}

impl PoolId {
    /// The account that custodies the pool's constituent balances.
    #[must_use]
    pub const fn account(&self) -> Account {
        Account::from_bytes(self.0)
    }

    /// The pool-share token issued by this pool.
    #[must_use]
    pub const fn share_token(&self) -> TokenAddress {
        TokenAddress::from_bytes(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(Account::from_bytes(bytes).as_bytes(), bytes);
        assert_eq!(TokenAddress::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(PoolId::zero().as_bytes(), [0u8; 32]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let lo = TokenAddress::from_bytes([0u8; 32]);
        let hi = TokenAddress::from_bytes([1u8; 32]);
        assert!(lo < hi);
    }

    #[test]
    fn pool_id_projections_share_bytes() {
        let id = PoolId::from_bytes([9u8; 32]);
        assert_eq!(id.account().as_bytes(), [9u8; 32]);
        assert_eq!(id.share_token().as_bytes(), [9u8; 32]);
    }

    #[test]
    fn display_is_short_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[3] = 0x01;
        assert_eq!(Account::from_bytes(bytes).to_string(), "0xab000001…");
    }
}
