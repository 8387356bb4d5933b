//! Configuration for a configurable-rights ("smart") pool.

use super::WeightedPoolConfig;
use crate::domain::{Account, Amount, Rights};
use crate::error::{Result, ZapError};

/// A weighted pool wrapped by a rights layer.
///
/// # Validation
///
/// - The inner pool configuration is valid.
/// - A cap requires [`Rights::can_change_cap`] and must not be below the
///   initial supply.
/// - A non-empty whitelist requires [`Rights::can_whitelist_lps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsPoolConfig {
    pool: WeightedPoolConfig,
    rights: Rights,
    cap: Option<Amount>,
    whitelist: Vec<Account>,
}

impl RightsPoolConfig {
    /// Creates a validated configuration with no cap and no whitelist.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(pool: WeightedPoolConfig, rights: Rights) -> Result<Self> {
        let config = Self {
            pool,
            rights,
            cap: None,
            whitelist: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Caps the total share supply.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_cap(mut self, cap: Amount) -> Result<Self> {
        self.cap = Some(cap);
        self.validate()?;
        Ok(self)
    }

    /// Restricts joins to `providers`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_whitelist(mut self, providers: Vec<Account>) -> Result<Self> {
        self.whitelist = providers;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - Any error of [`WeightedPoolConfig::validate`].
    /// - [`ZapError::InvalidConfiguration`] for a cap or whitelist the
    ///   rights do not allow, or a cap below the initial supply.
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        if let Some(cap) = self.cap {
            if !self.rights.can_change_cap {
                return Err(ZapError::InvalidConfiguration(
                    "a cap requires the can_change_cap right",
                ));
            }
            if cap < self.pool.initial_supply() {
                return Err(ZapError::InvalidConfiguration(
                    "cap is below the initial supply",
                ));
            }
        }
        if !self.whitelist.is_empty() && !self.rights.can_whitelist_lps {
            return Err(ZapError::InvalidConfiguration(
                "a whitelist requires the can_whitelist_lps right",
            ));
        }
        Ok(())
    }

    /// Inner pool parameters.
    #[must_use]
    pub const fn pool(&self) -> &WeightedPoolConfig {
        &self.pool
    }

    /// Rights descriptor.
    #[must_use]
    pub const fn rights(&self) -> Rights {
        self.rights
    }

    /// Supply cap, if any.
    #[must_use]
    pub const fn cap(&self) -> Option<Amount> {
        self.cap
    }

    /// Whitelisted providers.
    #[must_use]
    pub fn whitelist(&self) -> &[Account] {
        &self.whitelist
    }
}
