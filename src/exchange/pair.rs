//! Constant-product exchange pair (Uniswap V2 style).
//!
//! # Exact-In Pricing
//!
//! ```text
//! fee        = ceil(amount_in × fee_bps / 10 000)
//! net_input  = amount_in − fee
//! amount_out = floor(reserve_out × net_input / (reserve_in + net_input))
//! ```

use crate::config::PairConfig;
use crate::domain::{Amount, Asset, FeeTier, Rounding};
use crate::error::{Result, ZapError};
use crate::math::CheckedArithmetic;
use crate::traits::FromConfig;

/// Reserves of two assets priced along `x · y = k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    asset_a: Asset,
    asset_b: Asset,
    reserve_a: Amount,
    reserve_b: Amount,
    fee: FeeTier,
}

impl Pair {
    /// Both assets, in listing order.
    #[must_use]
    pub const fn assets(&self) -> (Asset, Asset) {
        (self.asset_a, self.asset_b)
    }

    /// Current reserve of `asset`, if it is one of the pair's.
    #[must_use]
    pub fn reserve_of(&self, asset: Asset) -> Option<Amount> {
        if asset == self.asset_a {
            Some(self.reserve_a)
        } else if asset == self.asset_b {
            Some(self.reserve_b)
        } else {
            None
        }
    }

    /// Whether the pair trades `asset_in` for `asset_out`.
    #[must_use]
    pub fn connects(&self, asset_in: Asset, asset_out: Asset) -> bool {
        (asset_in == self.asset_a && asset_out == self.asset_b)
            || (asset_in == self.asset_b && asset_out == self.asset_a)
    }

    /// Output and fee for selling `amount_in` of `asset_in`.
    ///
    /// Returns `(amount_out, fee)`.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidToken`] if `asset_in` is not in the pair.
    /// - [`ZapError::InvalidQuantity`] if the input after fee is zero.
    /// - [`ZapError::InsufficientLiquidity`] if the output is zero or
    ///   would drain the reserve.
    pub fn quote_exact_in(&self, asset_in: Asset, amount_in: Amount) -> Result<(Amount, Amount)> {
        let (reserve_in, reserve_out) = self.oriented(asset_in)?;

        let fee = self.fee.fee_on(amount_in)?;
        let net_input = amount_in.safe_sub(&fee)?;
        if net_input.is_zero() {
            return Err(ZapError::InvalidQuantity("net input after fee is zero"));
        }

        let denominator = reserve_in.safe_add(&net_input)?;
        let amount_out = reserve_out.safe_mul_div(&net_input, &denominator, Rounding::Down)?;

        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(ZapError::InsufficientLiquidity);
        }
        Ok((amount_out, fee))
    }

    /// Books a trade into the reserves.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidToken`] if `asset_in` is not in the pair.
    /// - [`ZapError::Underflow`] if `amount_out` exceeds the reserve.
    pub fn apply(&mut self, asset_in: Asset, amount_in: Amount, amount_out: Amount) -> Result<()> {
        let (reserve_in, reserve_out) = self.oriented(asset_in)?;
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        self.store(asset_in, new_in, new_out);
        Ok(())
    }

    /// Reverses a trade booked with [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidToken`] if `asset_in` is not in the pair.
    /// - [`ZapError::Underflow`] if the reserves no longer hold the trade.
    pub fn unapply(&mut self, asset_in: Asset, amount_in: Amount, amount_out: Amount) -> Result<()> {
        let (reserve_in, reserve_out) = self.oriented(asset_in)?;
        let new_in = reserve_in.safe_sub(&amount_in)?;
        let new_out = reserve_out.safe_add(&amount_out)?;
        self.store(asset_in, new_in, new_out);
        Ok(())
    }

    fn oriented(&self, asset_in: Asset) -> Result<(Amount, Amount)> {
        if asset_in == self.asset_a {
            Ok((self.reserve_a, self.reserve_b))
        } else if asset_in == self.asset_b {
            Ok((self.reserve_b, self.reserve_a))
        } else {
            Err(ZapError::InvalidToken("asset is not traded by the pair"))
        }
    }

    fn store(&mut self, asset_in: Asset, reserve_in: Amount, reserve_out: Amount) {
        if asset_in == self.asset_a {
            self.reserve_a = reserve_in;
            self.reserve_b = reserve_out;
        } else {
            self.reserve_b = reserve_in;
            self.reserve_a = reserve_out;
        }
    }
}

impl FromConfig<PairConfig> for Pair {
    fn from_config(config: &PairConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            asset_a: config.asset_a(),
            asset_b: config.asset_b(),
            reserve_a: config.reserve_a(),
            reserve_b: config.reserve_b(),
            fee: config.fee(),
        })
    }
}
