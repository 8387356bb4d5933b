//! Reference exchange: constant-product pairs behind a routing layer.
//!
//! The zapper talks to any [`Exchanger`](crate::traits::Exchanger); the
//! [`Router`] here is the in-process implementation used by the tests,
//! the demo and embedders without an external venue.

mod pair;
mod router;

pub use pair::Pair;
pub use router::Router;
