//! Domain value types shared by every layer of the zapper.
//!
//! Newtypes keep accounts, tokens and pools apart at the type level, and
//! every quantity carries its unit in its type: raw [`Amount`]s for
//! balances, [`BasisPoints`] for fees and tolerances,
//! [`Bfp`](crate::math::Bfp) for weights.

mod address;
mod amount;
mod asset;
mod basis_points;
mod constituent;
mod pool_kind;
mod receipt;
mod request;
mod rounding;
mod slippage;
mod timestamp;
mod token;

pub use address::{Account, PoolId, TokenAddress};
pub use amount::Amount;
pub use asset::Asset;
pub use basis_points::{BasisPoints, FeeTier};
pub use constituent::Constituent;
pub use pool_kind::{PoolKind, Rights};
pub use receipt::{JoinReceipt, Quote, SwapLeg, SwapReceipt, ZapReceipt};
pub use request::{SecondaryLeg, ZapInput, ZapRequest};
pub use rounding::Rounding;
pub use slippage::Slippage;
pub use timestamp::Timestamp;
pub use token::{Decimals, Token};
