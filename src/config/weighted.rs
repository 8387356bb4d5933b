//! Configuration for Balancer-style weighted pools.

use crate::domain::{Amount, PoolId, Token};
use crate::error::{Result, ZapError};
use crate::math::Bfp;

const E18: u128 = 1_000_000_000_000_000_000;

/// Fewest tokens a pool may bind.
pub const MIN_BOUND_TOKENS: usize = 2;
/// Most tokens a pool may bind.
pub const MAX_BOUND_TOKENS: usize = 32;
/// Smallest denormalized weight (1.0).
pub const MIN_WEIGHT: Bfp = Bfp::from_wei_u128(E18);
/// Largest denormalized weight (50.0).
pub const MAX_WEIGHT: Bfp = Bfp::from_wei_u128(50 * E18);
/// Largest sum of denormalized weights (100.0).
pub const MAX_TOTAL_WEIGHT: Bfp = Bfp::from_wei_u128(100 * E18);
/// Smallest bound balance (10^6 wei).
pub const MIN_BALANCE: Amount = Amount::new(E18 / 1_000_000_000_000);
/// Smallest swap fee (0.0001%).
pub const MIN_FEE: Bfp = Bfp::from_wei_u128(E18 / 1_000_000);
/// Largest swap fee (10%).
pub const MAX_FEE: Bfp = Bfp::from_wei_u128(E18 / 10);
/// Share supply minted to the creator when none is given.
pub const INIT_POOL_SUPPLY: Amount = Amount::new(100 * E18);
/// Smallest initial share supply.
pub const MIN_POOL_SUPPLY: Amount = Amount::new(100 * E18);
/// Largest initial share supply.
pub const MAX_POOL_SUPPLY: Amount = Amount::new(1_000_000_000 * E18);

/// Parameters of a finalized weighted pool.
///
/// # Invariant
///
/// ```text
/// ∏(Bᵢ ^ wᵢ) = k,   wᵢ = denormᵢ / Σ denorm
/// ```
///
/// # Validation
///
/// - `tokens.len() == weights.len() == balances.len()`, within
///   [`MIN_BOUND_TOKENS`]..=[`MAX_BOUND_TOKENS`].
/// - No duplicate token addresses.
/// - Each weight in [`MIN_WEIGHT`]..=[`MAX_WEIGHT`], total at most
///   [`MAX_TOTAL_WEIGHT`].
/// - Each balance at least [`MIN_BALANCE`].
/// - Swap fee in [`MIN_FEE`]..=[`MAX_FEE`].
/// - Initial supply in [`MIN_POOL_SUPPLY`]..=[`MAX_POOL_SUPPLY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPoolConfig {
    id: PoolId,
    tokens: Vec<Token>,
    weights: Vec<Bfp>,
    balances: Vec<Amount>,
    swap_fee: Bfp,
    initial_supply: Amount,
}

impl WeightedPoolConfig {
    /// Creates a validated configuration minting [`INIT_POOL_SUPPLY`].
    ///
    /// `weights` are denormalized (e.g. `Bfp::from_integer(2)` for a
    /// weight of 2).
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        id: PoolId,
        tokens: Vec<Token>,
        weights: Vec<Bfp>,
        balances: Vec<Amount>,
        swap_fee: Bfp,
    ) -> Result<Self> {
        let config = Self {
            id,
            tokens,
            weights,
            balances,
            swap_fee,
            initial_supply: INIT_POOL_SUPPLY,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the initial share supply.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_initial_supply(mut self, supply: Amount) -> Result<Self> {
        self.initial_supply = supply;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidConfiguration`] for length mismatches, token
    ///   count out of range, duplicates, fee or supply out of range.
    /// - [`ZapError::InvalidWeight`] for an individual or total weight out
    ///   of range.
    /// - [`ZapError::InvalidQuantity`] for a balance below
    ///   [`MIN_BALANCE`].
    pub fn validate(&self) -> Result<()> {
        if self.tokens.len() != self.weights.len() || self.tokens.len() != self.balances.len() {
            return Err(ZapError::InvalidConfiguration(
                "tokens, weights, and balances must have equal length",
            ));
        }
        if self.tokens.len() < MIN_BOUND_TOKENS {
            return Err(ZapError::InvalidConfiguration(
                "at least 2 tokens are required",
            ));
        }
        if self.tokens.len() > MAX_BOUND_TOKENS {
            return Err(ZapError::InvalidConfiguration("too many bound tokens"));
        }

        let mut iter = self.tokens.iter();
        while let Some(token) = iter.next() {
            if iter.clone().any(|other| other.address() == token.address()) {
                return Err(ZapError::InvalidConfiguration(
                    "duplicate token addresses are not allowed",
                ));
            }
        }

        let mut total = Bfp::ZERO;
        for w in &self.weights {
            if *w < MIN_WEIGHT || *w > MAX_WEIGHT {
                return Err(ZapError::InvalidWeight("weight out of bounds"));
            }
            total = total.add(*w)?;
        }
        if total > MAX_TOTAL_WEIGHT {
            return Err(ZapError::InvalidWeight("total weight exceeds maximum"));
        }

        if self.balances.iter().any(|b| *b < MIN_BALANCE) {
            return Err(ZapError::InvalidQuantity("balance below minimum"));
        }
        if self.swap_fee < MIN_FEE || self.swap_fee > MAX_FEE {
            return Err(ZapError::InvalidConfiguration("swap fee out of range"));
        }
        if self.initial_supply < MIN_POOL_SUPPLY || self.initial_supply > MAX_POOL_SUPPLY {
            return Err(ZapError::InvalidConfiguration(
                "initial supply out of range",
            ));
        }
        Ok(())
    }

    /// Pool identifier.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Bound tokens, in pool order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Denormalized weights, in pool order.
    #[must_use]
    pub fn weights(&self) -> &[Bfp] {
        &self.weights
    }

    /// Initial balances, in pool order.
    #[must_use]
    pub fn balances(&self) -> &[Amount] {
        &self.balances
    }

    /// Swap fee as a fixed-point fraction.
    #[must_use]
    pub const fn swap_fee(&self) -> Bfp {
        self.swap_fee
    }

    /// Shares minted to the creator.
    pub const fn initial_supply(&self) -> Amount {
        self.initial_supply
    }
}
