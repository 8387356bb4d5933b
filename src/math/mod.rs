//! Mathematical utilities: checked amount arithmetic, 18-decimal fixed
//! point, and weighted-pool formulas.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `checked` | [`CheckedArithmetic`] trait mapping overflow to [`ZapError`](crate::error::ZapError) |
//! | `bfp` | [`Bfp`], Balancer-compatible fixed point over `U256` |
//! | `weighted_math` | spot price, swap output and single-asset join formulas |

mod bfp;
mod checked;
pub mod weighted_math;

pub use bfp::{Bfp, POW_PRECISION};
pub use checked::CheckedArithmetic;
