//! Quotes and the receipts produced by each step of a zap.
//!
//! Receipts double as compensation records: a swap or join receipt holds
//! everything its issuer needs to undo the effect exactly.

use super::{Account, Amount, Asset, PoolId, TokenAddress, ZapInput};

/// Derived expectation for a single-token zap.
///
/// Re-deriving it from the same pool and exchange state yields the same
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quote {
    /// Constituent the input is routed into.
    pub underlying: TokenAddress,
    /// Underlying expected from the swap (the input itself when no swap
    /// is needed).
    pub expected_underlying_amount: Amount,
    /// Shares expected from the join(s) at current state.
    pub expected_pool_amount_out: Amount,
    /// Expected shares reduced by the slippage tolerance.
    pub min_pool_amount_out: Amount,
}

/// One hop of an exchange route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapLeg {
    /// Asset sold into the hop.
    pub asset_in: Asset,
    /// Asset bought from the hop.
    pub asset_out: Asset,
    /// Amount sold, fee included.
    pub amount_in: Amount,
    /// Amount bought.
    pub amount_out: Amount,
}

/// Result of an executed exchange swap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapReceipt {
    /// Account the input was pulled from.
    pub sender: Account,
    /// Account credited with the output.
    pub recipient: Account,
    /// Asset sold.
    pub asset_in: Asset,
    /// Asset bought.
    pub asset_out: Asset,
    /// Amount sold.
    pub amount_in: Amount,
    /// Amount bought.
    pub amount_out: Amount,
    /// Hops in execution order.
    pub legs: Vec<SwapLeg>,
}

/// Result of a pool join.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinReceipt {
    /// Pool joined.
    pub pool: PoolId,
    /// Account that supplied the tokens and received the shares.
    pub sender: Account,
    /// Tokens pulled into the pool, in pool order.
    pub pulled: Vec<(TokenAddress, Amount)>,
    /// Shares minted to `sender`.
    pub shares: Amount,
}

/// Caller-visible outcome of a successful zap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZapReceipt {
    /// Pool joined.
    pub pool: PoolId,
    /// Caller credited with the shares.
    pub caller: Account,
    /// Asset and amount spent.
    pub input: ZapInput,
    /// Routing target; `None` for basket zaps.
    pub underlying: Option<TokenAddress>,
    /// Underlying received from the exchange (or pulled directly); zero
    /// for basket zaps.
    pub underlying_amount: Amount,
    /// Floor the join(s) were held to.
    pub min_pool_amount_out: Amount,
    /// Shares credited to the caller.
    pub shares_minted: Amount,
    /// Assets returned to the caller, with amounts.
    pub refunds: Vec<(Asset, Amount)>,
}
