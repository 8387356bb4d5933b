//! The economic surface every weighted pool flavour exposes.
//!
//! [`WeightedPoolSurface`] is what the zapper programs against. The plain
//! pool and the rights-wrapped pool both implement it. The wrapper adds
//! access checks but never changes the join economics:
//!
//! ```text
//! quote:   constituents() + total_share_supply() + swap_fee()
//! execute: join_single_token(..) / join_all(..)
//! unwind:  revert_join(&receipt)
//! ```
//!
//! # Custody Model
//!
//! Token and share movements go through the caller's ledger
//! [`Transaction`]. The pool's own records (balances, supply) change
//! in place. A failed zap rolls the transaction back and calls
//! [`revert_join`](WeightedPoolSurface::revert_join) for every join it
//! completed, restoring both layers.

use crate::domain::{
    Account, Amount, Constituent, JoinReceipt, PoolId, PoolKind, Rights, TokenAddress,
};
use crate::error::Result;
use crate::ledger::Transaction;
use crate::math::Bfp;

/// Read and join operations of a weighted pool.
///
/// # Implementors
///
/// - `WeightedPool`: finalized Balancer-style pool
/// - `RightsPool`: configurable-rights wrapper around a `WeightedPool`
/// - `PoolBox`: enum dispatch over both
pub trait WeightedPoolSurface {
    /// Pool identifier (also its custody account and share token).
    #[must_use]
    fn id(&self) -> PoolId;

    /// Wrapper flavour.
    #[must_use]
    fn kind(&self) -> PoolKind;

    /// Rights descriptor; `None` for an immutable pool.
    #[must_use]
    fn rights(&self) -> Option<Rights>;

    /// Bound tokens with balances and weights, in pool order.
    #[must_use]
    fn constituents(&self) -> Vec<Constituent>;

    /// Outstanding pool shares.
    #[must_use]
    fn total_share_supply(&self) -> Amount;

    /// Swap fee as a fixed-point fraction.
    #[must_use]
    fn swap_fee(&self) -> Bfp;

    /// Snapshot of one constituent.
    #[must_use]
    fn constituent(&self, token: TokenAddress) -> Option<Constituent> {
        self.constituents().into_iter().find(|c| c.token() == token)
    }

    /// Deposits `amount_in` of one constituent and mints shares to
    /// `sender`.
    ///
    /// The pool pulls the tokens with `sender`'s allowance to the pool
    /// account.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidToken`](crate::error::ZapError::InvalidToken)
    ///   if `token` is not bound.
    /// - [`ZapError::MaxInRatioExceeded`](crate::error::ZapError::MaxInRatioExceeded)
    ///   if the deposit exceeds half the balance.
    /// - [`ZapError::BelowMinimumOutput`](crate::error::ZapError::BelowMinimumOutput)
    ///   if fewer than `min_shares_out` would be minted.
    /// - [`ZapError::TransferFailed`](crate::error::ZapError::TransferFailed)
    ///   if the allowance or balance is short.
    /// - Access errors of the rights layer.
    fn join_single_token(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token: TokenAddress,
        amount_in: Amount,
        min_shares_out: Amount,
    ) -> Result<JoinReceipt>;

    /// Mints exactly `pool_amount_out` shares for a proportional deposit of
    /// every constituent.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidQuantity`](crate::error::ZapError::InvalidQuantity)
    ///   if the share ratio or any token amount rounds to zero, or
    ///   `max_amounts_in` has the wrong length.
    /// - [`ZapError::LimitInExceeded`](crate::error::ZapError::LimitInExceeded)
    ///   if any token amount exceeds its limit.
    /// - Transfer and access errors as for
    ///   [`join_single_token`](Self::join_single_token).
    fn join_all(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        pool_amount_out: Amount,
        max_amounts_in: &[Amount],
    ) -> Result<JoinReceipt>;

    /// Sells `amount_in` of one constituent for another inside the pool.
    ///
    /// # Errors
    ///
    /// - [`ZapError::InvalidToken`](crate::error::ZapError::InvalidToken)
    ///   for unbound or identical tokens.
    /// - [`ZapError::MaxInRatioExceeded`](crate::error::ZapError::MaxInRatioExceeded)
    ///   if the input exceeds half the balance.
    /// - [`ZapError::SlippageExceeded`](crate::error::ZapError::SlippageExceeded)
    ///   if the output is below `min_amount_out`.
    fn swap_exact_amount_in(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token_in: TokenAddress,
        amount_in: Amount,
        token_out: TokenAddress,
        min_amount_out: Amount,
    ) -> Result<Amount>;

    /// Spot price of `token_out` in `token_in`, fee included.
    ///
    /// # Errors
    ///
    /// Returns [`ZapError::InvalidToken`](crate::error::ZapError::InvalidToken)
    /// if either token is unbound.
    fn spot_price(&self, token_in: TokenAddress, token_out: TokenAddress) -> Result<Bfp>;

    /// Undoes the pool-record effects of a join this pool produced.
    ///
    /// Ledger effects are undone by rolling back the transaction.
    ///
    /// # Errors
    ///
    /// - [`ZapError::UnknownPool`](crate::error::ZapError::UnknownPool) if
    ///   the receipt names another pool.
    /// - [`ZapError::InvalidToken`](crate::error::ZapError::InvalidToken)
    ///   if it names an unbound token.
    fn revert_join(&mut self, receipt: &JoinReceipt) -> Result<()>;
}
