//! External exchange abstraction.
//!
//! The zapper only needs three things from an exchange: a read-only quote,
//! a firm swap that honours a minimum output and a deadline, and an exact
//! inverse of an executed swap for unwinding. Prices may move between
//! quote and swap; the minimum output is the only guard.

use crate::domain::{Account, Amount, Asset, SwapReceipt, Timestamp};
use crate::error::Result;
use crate::ledger::Transaction;

/// An exact-input swap instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOrder {
    /// Account the input is pulled from.
    pub sender: Account,
    /// Account credited with the output.
    pub recipient: Account,
    /// Asset sold.
    pub asset_in: Asset,
    /// Amount sold.
    pub amount_in: Amount,
    /// Asset bought.
    pub asset_out: Asset,
    /// Smallest acceptable output.
    pub min_amount_out: Amount,
    /// Last instant (inclusive) at which the swap may execute.
    pub deadline: Timestamp,
}

/// Firm-quote exchange.
pub trait Exchanger {
    /// Account that must be approved to pull token inputs.
    #[must_use]
    fn account(&self) -> Account;

    /// Output `amount_in` of `asset_in` would buy right now.
    ///
    /// # Errors
    ///
    /// - [`ZapError::PairNotFound`](crate::error::ZapError::PairNotFound)
    ///   if no route connects the assets.
    /// - [`ZapError::InsufficientLiquidity`](crate::error::ZapError::InsufficientLiquidity)
    ///   if the route cannot pay out.
    fn quote(&self, asset_in: Asset, amount_in: Amount, asset_out: Asset) -> Result<Amount>;

    /// Executes `order` at `now`.
    ///
    /// Native input moves by direct transfer from the sender; token input
    /// is pulled with the sender's allowance to [`account`](Self::account).
    ///
    /// # Errors
    ///
    /// - [`ZapError::DeadlineExpired`](crate::error::ZapError::DeadlineExpired)
    ///   if `now` is past the deadline.
    /// - [`ZapError::SlippageExceeded`](crate::error::ZapError::SlippageExceeded)
    ///   if the output is below the minimum.
    /// - Quote and transfer errors.
    fn swap(
        &mut self,
        tx: &mut Transaction<'_>,
        order: &SwapOrder,
        now: Timestamp,
    ) -> Result<SwapReceipt>;

    /// Restores the exchange's internal state to before `receipt`'s swap.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::PairNotFound`](crate::error::ZapError::PairNotFound)
    /// if a hop names an unknown pair.
    fn revert_swap(&mut self, receipt: &SwapReceipt) -> Result<()>;
}
