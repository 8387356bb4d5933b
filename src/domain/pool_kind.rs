//! Pool wrapper flavour and the rights descriptor of governed pools.

use core::fmt;

/// Whether a weighted pool is addressed directly or through a rights
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    /// Immutable, finalized weighted pool.
    Plain,
    /// Weighted pool behind a configurable-rights ("smart") wrapper.
    RightsWrapped,
}

impl PoolKind {
    /// Maps the caller's "is smart pool" flag.
    #[must_use]
    pub const fn from_smart_flag(is_smart: bool) -> Self {
        if is_smart {
            Self::RightsWrapped
        } else {
            Self::Plain
        }
    }

    /// `true` for [`PoolKind::RightsWrapped`].
    #[must_use]
    pub const fn is_smart(&self) -> bool {
        matches!(self, Self::RightsWrapped)
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::RightsWrapped => f.write_str("rights-wrapped"),
        }
    }
}

/// Read-only descriptor of what a rights-wrapped pool's controller may
/// change.
///
/// Only `can_whitelist_lps` and `can_change_cap` affect joins; the rest
/// describe governance powers that the zapper merely reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rights {
    /// Controller may pause public swaps.
    pub can_pause_swapping: bool,
    /// Controller may change the swap fee.
    pub can_change_swap_fee: bool,
    /// Controller may change weights.
    pub can_change_weights: bool,
    /// Controller may add or remove constituents.
    pub can_add_remove_tokens: bool,
    /// Joins are restricted to whitelisted providers.
    pub can_whitelist_lps: bool,
    /// Total share supply is capped.
    pub can_change_cap: bool,
}
