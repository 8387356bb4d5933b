//! Inverse effects recorded while a zap runs.
//!
//! Ledger effects unwind with the transaction. Effects inside the pool and
//! the exchanger (balances, supply, reserves) unwind through their
//! `revert_*` hooks, in reverse order of execution.

use tracing::warn;

use crate::domain::{JoinReceipt, SwapReceipt};
use crate::traits::{Exchanger, WeightedPoolSurface};

/// One undoable step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Compensation {
    /// An executed exchange swap.
    Swap(SwapReceipt),
    /// An executed pool join.
    Join(JoinReceipt),
}

/// Steps completed so far, oldest first.
#[derive(Debug, Default)]
pub(crate) struct CompensationLog(Vec<Compensation>);

impl CompensationLog {
    pub(crate) fn push(&mut self, entry: Compensation) {
        self.0.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Reverts every recorded step, newest first.
    ///
    /// A failing revert is logged and the unwind continues with the next
    /// entry.
    pub(crate) fn unwind<P, X>(self, pool: &mut P, exchanger: &mut X)
    where
        P: WeightedPoolSurface + ?Sized,
        X: Exchanger + ?Sized,
    {
        for entry in self.0.into_iter().rev() {
            let result = match &entry {
                Compensation::Swap(receipt) => exchanger.revert_swap(receipt),
                Compensation::Join(receipt) => pool.revert_join(receipt),
            };
            if let Err(err) = result {
                warn!(error = %err, ?entry, "compensation failed");
            }
        }
    }
}
