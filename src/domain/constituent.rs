//! A token bound into a weighted pool.

use super::{Amount, TokenAddress};
use crate::math::Bfp;

/// Snapshot of one bound token: balance held by the pool and its weight.
///
/// `denorm` is the weight the token was bound with; `weight` is
/// `denorm / Σ denorm`, computed with the pool's own rounding so that
/// previews and joins see identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constituent {
    token: TokenAddress,
    balance: Amount,
    denorm: Bfp,
    weight: Bfp,
}

impl Constituent {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(token: TokenAddress, balance: Amount, denorm: Bfp, weight: Bfp) -> Self {
        Self {
            token,
            balance,
            denorm,
            weight,
        }
    }

    /// Token address.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Balance held by the pool.
    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }

    /// Denormalized weight.
    #[must_use]
    pub const fn denorm(&self) -> Bfp {
        self.denorm
    }

    /// Normalized weight in `(0, 1]`.
    #[must_use]
    pub const fn weight(&self) -> Bfp {
        self.weight
    }
}
