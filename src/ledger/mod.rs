//! Account balances and token allowances.
//!
//! The [`Ledger`] is the custody layer every other component moves value
//! through: callers, the zapper, the exchange and pools are all plain
//! [`Account`]s here. All mutation goes through a [`Transaction`], which
//! journals the previous value of every slot it writes. An uncommitted
//! transaction restores those values on drop.
//!
//! ```text
//! let mut tx = ledger.begin();
//! tx.transfer(a, b, asset, amount)?;   // journaled
//! tx.approve(a, spender, token, amt);  // journaled
//! tx.commit();                         // or drop → rollback
//! ```

mod transaction;

use std::collections::HashMap;

pub use transaction::Transaction;

use crate::domain::{Account, Amount, Asset, TokenAddress};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// Balance slot key.
type BalanceKey = (Account, Asset);

/// Allowance slot key: `(owner, spender, token)`.
type AllowanceKey = (Account, Account, TokenAddress);

/// In-memory multi-asset ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    balances: HashMap<BalanceKey, Amount>,
    allowances: HashMap<AllowanceKey, Amount>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a journaled transaction.
    pub fn begin(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Credits `amount` of `asset` to `account` outside any zap, e.g. to
    /// fund test accounts or seed an exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`](crate::error::ZapError::Overflow) if
    /// the balance would overflow.
    pub fn mint(&mut self, account: Account, asset: Asset, amount: Amount) -> Result<()> {
        let mut tx = self.begin();
        tx.mint(account, asset, amount)?;
        tx.commit();
        Ok(())
    }

    /// Balance of `asset` held by `account`.
    #[must_use]
    pub fn balance_of(&self, account: Account, asset: Asset) -> Amount {
        self.balances
            .get(&(account, asset))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Remaining amount of `token` that `spender` may pull from `owner`.
    #[must_use]
    pub fn allowance(&self, owner: Account, spender: Account, token: TokenAddress) -> Amount {
        self.allowances
            .get(&(owner, spender, token))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Sum of all balances of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`](crate::error::ZapError::Overflow) if
    /// the sum does not fit.
    pub fn total_held(&self, asset: Asset) -> Result<Amount> {
        self.balances
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .try_fold(Amount::ZERO, |acc, (_, v)| acc.safe_add(v))
    }

    fn slot(&self, key: &BalanceKey) -> Option<Amount> {
        self.balances.get(key).copied()
    }

    fn restore_balance(&mut self, key: BalanceKey, previous: Option<Amount>) {
        match previous {
            Some(v) => {
                self.balances.insert(key, v);
            }
            None => {
                self.balances.remove(&key);
            }
        }
    }

    fn allowance_slot(&self, key: &AllowanceKey) -> Option<Amount> {
        self.allowances.get(key).copied()
    }

    fn restore_allowance(&mut self, key: AllowanceKey, previous: Option<Amount>) {
        match previous {
            Some(v) => {
                self.allowances.insert(key, v);
            }
            None => {
                self.allowances.remove(&key);
            }
        }
    }
}
