//! Configuration for a constant-product exchange pair.

use crate::domain::{Amount, Asset, FeeTier};
use crate::error::{Result, ZapError};

/// Parameters for listing a pair on the exchange router.
///
/// # Validation
///
/// - The two assets differ.
/// - Both reserves are non-zero.
/// - The fee is below 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairConfig {
    asset_a: Asset,
    asset_b: Asset,
    reserve_a: Amount,
    reserve_b: Amount,
    fee: FeeTier,
}

impl PairConfig {
    /// Creates a validated pair configuration.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        asset_a: Asset,
        asset_b: Asset,
        reserve_a: Amount,
        reserve_b: Amount,
        fee: FeeTier,
    ) -> Result<Self> {
        let config = Self {
            asset_a,
            asset_b,
            reserve_a,
            reserve_b,
            fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidConfiguration`] for identical assets or a fee
    ///   of 100% or more.
    /// - [`ZapError::InsufficientLiquidity`] for a zero reserve.
    pub fn validate(&self) -> Result<()> {
        if self.asset_a == self.asset_b {
            return Err(ZapError::InvalidConfiguration(
                "pair assets must be distinct",
            ));
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(ZapError::InsufficientLiquidity);
        }
        if self.fee.basis_points() >= crate::domain::BasisPoints::MAX_PERCENT {
            return Err(ZapError::InvalidConfiguration(
                "pair fee must be below 10000 basis points",
            ));
        }
        Ok(())
    }

    /// First asset.
    #[must_use]
    pub const fn asset_a(&self) -> Asset {
        self.asset_a
    }

    /// Second asset.
    #[must_use]
    pub const fn asset_b(&self) -> Asset {
        self.asset_b
    }

    /// Initial reserve of the first asset.
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Initial reserve of the second asset.
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }
}
