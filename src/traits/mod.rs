//! Core trait abstractions: the pool surface the zapper targets, the
//! exchange it routes through, the clock it checks deadlines against, and
//! config-driven construction.

mod clock;
mod exchanger;
mod from_config;
mod weighted_pool;

pub use clock::{Clock, FixedClock, SystemClock};
pub use exchanger::{Exchanger, SwapOrder};
pub use from_config::FromConfig;
pub use weighted_pool::WeightedPoolSurface;
