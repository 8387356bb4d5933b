//! The zapper: quote a single-asset deposit, then run it atomically.
//!
//! # Components
//!
//! | Item | Role |
//! |------|------|
//! | [`QuoteEngine`] | Picks the underlying constituent and the share floor |
//! | [`ZapCoordinator`] | Runs swap → join → hand-over as one unit |
//! | [`ZapContext`] | Borrows the ledger, pool and exchanger for one call |
//!
//! # Entry Points
//!
//! - [`ZapCoordinator::buy_and_join`]: native currency in.
//! - [`ZapCoordinator::join_pool`]: native or an approved token in,
//!   optionally with a second caller-held constituent.
//! - [`ZapCoordinator::buy_basket_and_join`]: native in, spread over every
//!   constituent, proportional join.

mod basket;
mod compensation;
mod coordinator;
mod quote_engine;

pub use basket::{basket_pool_out, split_by_weight, BasketPurchase, BasketQuote};
pub use coordinator::{ZapContext, ZapCoordinator};
pub use quote_engine::QuoteEngine;
