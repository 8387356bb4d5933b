//! Weighted pool implementations and the [`PoolBox`] dispatch enum.
//!
//! # Pool Types
//!
//! | Pool | Kind | Style |
//! |------|------|-------|
//! | [`WeightedPool`] | [`Plain`](crate::domain::PoolKind::Plain) | Balancer V1 `BPool` |
//! | [`RightsPool`] | [`RightsWrapped`](crate::domain::PoolKind::RightsWrapped) | Balancer configurable-rights pool |

mod pool_box;
pub mod rights;
pub mod weighted;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use pool_box::PoolBox;
pub use rights::RightsPool;
pub use weighted::WeightedPool;
