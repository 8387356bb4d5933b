//! Configuration of the zap coordinator.

use crate::domain::{Account, Slippage};
use crate::error::{Result, ZapError};

/// Default swap tolerance when a request carries none: 1%.
pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;

/// Coordinator settings.
///
/// `account` is the transient custody account the coordinator holds
/// assets in mid-call; it must be empty again when every call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZapperConfig {
    account: Account,
    default_slippage: Slippage,
}

impl ZapperConfig {
    /// Creates a validated configuration with a 1% default tolerance.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(account: Account) -> Result<Self> {
        let config = Self {
            account,
            default_slippage: Slippage::from_bps(DEFAULT_SLIPPAGE_BPS)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the default tolerance.
    #[must_use]
    pub const fn with_default_slippage(mut self, slippage: Slippage) -> Self {
        self.default_slippage = slippage;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidConfiguration`] for the zero account.
    pub fn validate(&self) -> Result<()> {
        if self.account == Account::zero() {
            return Err(ZapError::InvalidConfiguration(
                "zapper account must not be zero",
            ));
        }
        Ok(())
    }

    /// Custody account.
    #[must_use]
    pub const fn account(&self) -> Account {
        self.account
    }

    /// Tolerance applied when the request has none.
    #[must_use]
    pub const fn default_slippage(&self) -> Slippage {
        self.default_slippage
    }
}
