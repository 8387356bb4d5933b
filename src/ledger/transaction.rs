//! Journaled, all-or-nothing ledger mutation.

use tracing::debug;

use super::{AllowanceKey, BalanceKey, Ledger};
use crate::domain::{Account, Amount, Asset, TokenAddress};
use crate::error::{Result, ZapError};
use crate::math::CheckedArithmetic;

/// Previous value of a slot, recorded before its first write.
#[derive(Debug, Clone, Copy)]
enum JournalEntry {
    Balance(BalanceKey, Option<Amount>),
    Allowance(AllowanceKey, Option<Amount>),
}

/// A unit of ledger work that either commits in full or leaves the ledger
/// exactly as it found it.
///
/// Writes apply immediately, so later reads inside the transaction see
/// them. Each write first journals the slot's previous value. Rollback,
/// explicit or on drop, replays the journal in reverse. It never fails.
#[derive(Debug)]
pub struct Transaction<'a> {
    ledger: &'a mut Ledger,
    journal: Vec<JournalEntry>,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(super) fn new(ledger: &'a mut Ledger) -> Self {
        Self {
            ledger,
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Balance of `asset` held by `account`, including this transaction's
    /// pending writes.
    #[must_use]
    pub fn balance_of(&self, account: Account, asset: Asset) -> Amount {
        self.ledger.balance_of(account, asset)
    }

    /// Current allowance, including pending writes.
    #[must_use]
    pub fn allowance(&self, owner: Account, spender: Account, token: TokenAddress) -> Amount {
        self.ledger.allowance(owner, spender, token)
    }

    /// Number of journaled writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// A zero amount is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ZapError::TransferFailed`] if `from` holds less than `amount`.
    /// - [`ZapError::Overflow`] if the recipient balance would overflow.
    pub fn transfer(&mut self, from: Account, to: Account, asset: Asset, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let from_balance = self.balance_of(from, asset);
        if from_balance < amount {
            return Err(ZapError::TransferFailed("insufficient balance"));
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(to, asset).safe_add(&amount)?;
        self.set_balance(from, asset, from_balance.safe_sub(&amount)?);
        self.set_balance(to, asset, to_balance);
        Ok(())
    }

    /// Moves `amount` of `token` from `owner` to `to`, spending the
    /// allowance `owner` granted `spender`.
    ///
    /// # Errors
    ///
    /// - [`ZapError::TransferFailed`] if the allowance or the balance is
    ///   short.
    pub fn transfer_from(
        &mut self,
        spender: Account,
        owner: Account,
        to: Account,
        token: TokenAddress,
        amount: Amount,
    ) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let allowed = self.allowance(owner, spender, token);
        if allowed < amount {
            return Err(ZapError::TransferFailed("insufficient allowance"));
        }
        self.transfer(owner, to, Asset::Token(token), amount)?;
        self.set_allowance(owner, spender, token, allowed.safe_sub(&amount)?);
        Ok(())
    }

    /// Sets the amount of `token` that `spender` may pull from `owner`.
    pub fn approve(&mut self, owner: Account, spender: Account, token: TokenAddress, amount: Amount) {
        self.set_allowance(owner, spender, token, amount);
    }

    /// Creates `amount` of `asset` in `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::Overflow`] if the balance would overflow.
    pub fn mint(&mut self, to: Account, asset: Asset, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(to, asset).safe_add(&amount)?;
        self.set_balance(to, asset, balance);
        Ok(())
    }

    /// Destroys `amount` of `asset` held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::TransferFailed`] if `from` holds less.
    pub fn burn(&mut self, from: Account, asset: Asset, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(from, asset);
        if balance < amount {
            return Err(ZapError::TransferFailed("insufficient balance to burn"));
        }
        self.set_balance(from, asset, balance.safe_sub(&amount)?);
        Ok(())
    }

    /// Keeps every write.
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Undoes every write. Equivalent to dropping the transaction.
    pub fn rollback(self) {}

    fn set_balance(&mut self, account: Account, asset: Asset, value: Amount) {
        let key = (account, asset);
        let previous = self.ledger.slot(&key);
        self.journal.push(JournalEntry::Balance(key, previous));
        self.ledger.balances.insert(key, value);
    }

    fn set_allowance(&mut self, owner: Account, spender: Account, token: TokenAddress, value: Amount) {
        let key = (owner, spender, token);
        let previous = self.ledger.allowance_slot(&key);
        self.journal.push(JournalEntry::Allowance(key, previous));
        self.ledger.allowances.insert(key, value);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.committed || self.journal.is_empty() {
            return;
        }
        debug!(writes = self.journal.len(), "rolling back ledger transaction");
        while let Some(entry) = self.journal.pop() {
            match entry {
                JournalEntry::Balance(key, previous) => self.ledger.restore_balance(key, previous),
                JournalEntry::Allowance(key, previous) => {
                    self.ledger.restore_allowance(key, previous);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn acct(b: u8) -> Account {
        Account::from_bytes([b; 32])
    }

    fn token() -> TokenAddress {
        TokenAddress::from_bytes([9u8; 32])
    }

    fn funded() -> Ledger {
        let mut l = Ledger::new();
        let Ok(()) = l.mint(acct(1), Asset::Token(token()), Amount::new(100)) else {
            panic!("expected Ok");
        };
        let Ok(()) = l.mint(acct(1), Asset::Native, Amount::new(50)) else {
            panic!("expected Ok");
        };
        l
    }

    // -- transfer -----------------------------------------------------------

    #[test]
    fn transfer_moves_balance() {
        let mut l = funded();
        let mut tx = l.begin();
        let Ok(()) = tx.transfer(acct(1), acct(2), Asset::Native, Amount::new(20)) else {
            panic!("expected Ok");
        };
        tx.commit();
        assert_eq!(l.balance_of(acct(1), Asset::Native), Amount::new(30));
        assert_eq!(l.balance_of(acct(2), Asset::Native), Amount::new(20));
    }

    #[test]
    fn transfer_insufficient() {
        let mut l = funded();
        let mut tx = l.begin();
        assert!(matches!(
            tx.transfer(acct(1), acct(2), Asset::Native, Amount::new(51)),
            Err(ZapError::TransferFailed(_))
        ));
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let mut l = funded();
        let mut tx = l.begin();
        let Ok(()) = tx.transfer(acct(1), acct(1), Asset::Native, Amount::new(50)) else {
            panic!("expected Ok");
        };
        tx.commit();
        assert_eq!(l.balance_of(acct(1), Asset::Native), Amount::new(50));
    }

    // -- allowances ---------------------------------------------------------

    #[test]
    fn transfer_from_spends_allowance() {
        let mut l = funded();
        let mut tx = l.begin();
        tx.approve(acct(1), acct(3), token(), Amount::new(60));
        let Ok(()) = tx.transfer_from(acct(3), acct(1), acct(2), token(), Amount::new(40)) else {
            panic!("expected Ok");
        };
        assert_eq!(tx.allowance(acct(1), acct(3), token()), Amount::new(20));
        assert!(matches!(
            tx.transfer_from(acct(3), acct(1), acct(2), token(), Amount::new(21)),
            Err(ZapError::TransferFailed("insufficient allowance"))
        ));
        tx.commit();
        assert_eq!(l.balance_of(acct(2), Asset::Token(token())), Amount::new(40));
    }

    // -- mint / burn --------------------------------------------------------

    #[test]
    fn burn_checks_balance() {
        let mut l = funded();
        let mut tx = l.begin();
        let Ok(()) = tx.burn(acct(1), Asset::Native, Amount::new(50)) else {
            panic!("expected Ok");
        };
        assert!(matches!(
            tx.burn(acct(1), Asset::Native, Amount::new(1)),
            Err(ZapError::TransferFailed(_))
        ));
    }

    // -- rollback -----------------------------------------------------------

    #[test]
    fn drop_restores_every_slot() {
        let mut l = funded();
        let before = l.clone();
        {
            let mut tx = l.begin();
            let Ok(()) = tx.transfer(acct(1), acct(2), Asset::Native, Amount::new(10)) else {
                panic!("expected Ok");
            };
            tx.approve(acct(1), acct(3), token(), Amount::new(5));
            let Ok(()) = tx.mint(acct(4), Asset::Token(token()), Amount::new(7)) else {
                panic!("expected Ok");
            };
            assert_eq!(tx.len(), 4);
        }
        assert_eq!(l, before);
    }

    #[test]
    fn explicit_rollback_matches_drop() {
        let mut l = funded();
        let before = l.clone();
        let mut tx = l.begin();
        let Ok(()) = tx.transfer(acct(1), acct(2), Asset::Native, Amount::new(10)) else {
            panic!("expected Ok");
        };
        tx.rollback();
        assert_eq!(l, before);
    }

    #[test]
    fn repeated_writes_restore_original() {
        let mut l = funded();
        let before = l.clone();
        let mut tx = l.begin();
        for _ in 0..3 {
            let Ok(()) = tx.transfer(acct(1), acct(2), Asset::Native, Amount::new(1)) else {
                panic!("expected Ok");
            };
        }
        drop(tx);
        assert_eq!(l, before);
    }

    #[test]
    fn zero_amounts_write_nothing() {
        let mut l = funded();
        let tx = l.begin();
        assert!(tx.is_empty());
        let mut tx = tx;
        let Ok(()) = tx.transfer(acct(1), acct(2), Asset::Native, Amount::ZERO) else {
            panic!("expected Ok");
        };
        assert!(tx.is_empty());
    }
}
