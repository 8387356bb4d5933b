//! Unified error types for the Hydra zapper.
//!
//! All fallible operations across the crate return [`ZapError`] as their
//! error type. Every error is terminal for the operation that raised it:
//! the zap sequence aborts, its effects are unwound, and the error is the
//! call's sole outcome. Nothing is retried.

use thiserror::Error;

use crate::domain::{Amount, PoolKind, Timestamp};

/// Errors produced by quoting, pool accounting, the exchange and the
/// zap coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZapError {
    // -- zap taxonomy -------------------------------------------------------
    /// The caller's deadline is not strictly after the current time.
    #[error("deadline expired: now {now} is not before deadline {deadline}")]
    DeadlineExpired {
        /// Time observed at entry.
        now: Timestamp,
        /// Deadline carried by the request.
        deadline: Timestamp,
    },

    /// Slippage tolerance outside `[0, 1)`.
    #[error("invalid slippage: {0}")]
    InvalidSlippage(&'static str),

    /// The pool has no constituents.
    #[error("pool has no constituents")]
    EmptyPool,

    /// A reserve or balance involved in the operation is empty.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A swap produced less than the caller's minimum.
    #[error("slippage exceeded: expected at least {min_out}, got {actual}")]
    SlippageExceeded {
        /// Minimum acceptable output.
        min_out: Amount,
        /// Output the operation would have delivered.
        actual: Amount,
    },

    /// A join would mint fewer shares than the caller's floor.
    #[error("below minimum output: floor {min_out}, minted {minted}")]
    BelowMinimumOutput {
        /// Minimum acceptable share mint.
        min_out: Amount,
        /// Shares the join would have minted.
        minted: Amount,
    },

    /// The pool-kind flag does not match the pool's wrapper state.
    #[error("unsupported pool kind: requested {requested}, pool is {actual}")]
    UnsupportedPoolKind {
        /// Kind claimed by the caller.
        requested: PoolKind,
        /// Kind of the pool actually addressed.
        actual: PoolKind,
    },

    /// A balance or allowance could not cover a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(&'static str),

    // -- validation ---------------------------------------------------------
    /// Token is not part of the pool, route or pair.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A quantity is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// Configuration invariants violated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A weight is outside the bound range.
    #[error("invalid weight: {0}")]
    InvalidWeight(&'static str),

    /// Fee or other precision-bound parameter out of range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    // -- pool accounting ----------------------------------------------------
    /// Deposit exceeds the pool's maximum in-ratio for one token.
    #[error("amount in exceeds the maximum in-ratio of the pool balance")]
    MaxInRatioExceeded,

    /// A proportional join needs more of a token than the caller allowed.
    #[error("limit in exceeded: allowed {max_in}, required {required}")]
    LimitInExceeded {
        /// Caller's limit for the token.
        max_in: Amount,
        /// Amount the join requires.
        required: Amount,
    },

    /// Base of a fractional power lies outside the convergent range.
    #[error("power base out of range")]
    PowBaseOutOfRange,

    /// The rights pool does not list the sender as a liquidity provider.
    #[error("sender is not whitelisted to provide liquidity")]
    NotWhitelisted,

    /// The join would push the share supply past the pool cap.
    #[error("pool share cap exceeded")]
    CapExceeded,

    /// A receipt names a pool other than the one asked to revert it.
    #[error("receipt belongs to a different pool")]
    UnknownPool,

    // -- exchange -----------------------------------------------------------
    /// No pair or route connects the two assets.
    #[error("no exchange route between the requested assets")]
    PairNotFound,

    // -- arithmetic ---------------------------------------------------------
    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ZapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = ZapError::DeadlineExpired {
            now: Timestamp::new(10),
            deadline: Timestamp::new(10),
        };
        assert_eq!(
            err.to_string(),
            "deadline expired: now 10 is not before deadline 10"
        );
    }

    #[test]
    fn slippage_message() {
        let err = ZapError::SlippageExceeded {
            min_out: Amount::new(5),
            actual: Amount::new(4),
        };
        assert_eq!(
            err.to_string(),
            "slippage exceeded: expected at least 5, got 4"
        );
    }

    #[test]
    fn pool_kind_message() {
        let err = ZapError::UnsupportedPoolKind {
            requested: PoolKind::RightsWrapped,
            actual: PoolKind::Plain,
        };
        assert_eq!(
            err.to_string(),
            "unsupported pool kind: requested rights-wrapped, pool is plain"
        );
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(ZapError::EmptyPool, ZapError::EmptyPool);
        assert_ne!(
            ZapError::TransferFailed("a"),
            ZapError::TransferFailed("b")
        );
    }
}
