//! Enum dispatch wrapper over both pool flavours.
//!
//! [`PoolBox`] lets the zapper and the factory hold either a plain or a
//! rights-wrapped pool behind one concrete type, with static dispatch.

use super::{RightsPool, WeightedPool};
use crate::domain::{
    Account, Amount, Constituent, JoinReceipt, PoolId, PoolKind, Rights, TokenAddress,
};
use crate::error::Result;
use crate::ledger::Transaction;
use crate::math::Bfp;
use crate::traits::WeightedPoolSurface;

/// Dispatch enum wrapping the concrete pool implementations.
///
/// The enum implements [`WeightedPoolSurface`] by delegating every method
/// call to the inner pool via `match`.
///
/// # Example
///
/// ```text
/// let pool = PoolBox::Weighted(Box::new(weighted));
/// let kind = pool.kind();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Finalized weighted pool.
    Weighted(Box<WeightedPool>),

    /// Weighted pool behind a configurable-rights wrapper.
    Rights(Box<RightsPool>),
}

/// Delegates a method call to every [`PoolBox`] variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            PoolBox::Weighted(p) => p.$method($($arg),*),
            PoolBox::Rights(p) => p.$method($($arg),*),
        }
    };
}

impl From<WeightedPool> for PoolBox {
    fn from(pool: WeightedPool) -> Self {
        Self::Weighted(Box::new(pool))
    }
}

impl From<RightsPool> for PoolBox {
    fn from(pool: RightsPool) -> Self {
        Self::Rights(Box::new(pool))
    }
}

impl WeightedPoolSurface for PoolBox {
    fn id(&self) -> PoolId {
        delegate!(self, id())
    }

    fn kind(&self) -> PoolKind {
        delegate!(self, kind())
    }

    fn rights(&self) -> Option<Rights> {
        delegate!(self, rights())
    }

    fn constituents(&self) -> Vec<Constituent> {
        delegate!(self, constituents())
    }

    fn total_share_supply(&self) -> Amount {
        delegate!(self, total_share_supply())
    }

    fn swap_fee(&self) -> Bfp {
        delegate!(self, swap_fee())
    }

    fn join_single_token(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token: TokenAddress,
        amount_in: Amount,
        min_shares_out: Amount,
    ) -> Result<JoinReceipt> {
        delegate!(
            self,
            join_single_token(tx, sender, token, amount_in, min_shares_out)
        )
    }

    fn join_all(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        pool_amount_out: Amount,
        max_amounts_in: &[Amount],
    ) -> Result<JoinReceipt> {
        delegate!(self, join_all(tx, sender, pool_amount_out, max_amounts_in))
    }

    fn swap_exact_amount_in(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token_in: TokenAddress,
        amount_in: Amount,
        token_out: TokenAddress,
        min_amount_out: Amount,
    ) -> Result<Amount> {
        delegate!(
            self,
            swap_exact_amount_in(tx, sender, token_in, amount_in, token_out, min_amount_out)
        )
    }

    fn spot_price(&self, token_in: TokenAddress, token_out: TokenAddress) -> Result<Bfp> {
        delegate!(self, spot_price(token_in, token_out))
    }

    fn revert_join(&mut self, receipt: &JoinReceipt) -> Result<()> {
        delegate!(self, revert_join(receipt))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{RightsPoolConfig, WeightedPoolConfig};
    use crate::domain::Token;
    use crate::traits::FromConfig;

    // -- helpers --------------------------------------------------------------

    fn config() -> WeightedPoolConfig {
        let Ok(cfg) = WeightedPoolConfig::new(
            PoolId::from_bytes([7u8; 32]),
            vec![
                Token::standard(TokenAddress::from_bytes([1u8; 32])),
                Token::standard(TokenAddress::from_bytes([2u8; 32])),
            ],
            vec![Bfp::from_integer(2), Bfp::from_integer(3)],
            vec![Amount::new(10_000_000), Amount::new(20_000_000)],
            Bfp::from_wei_u128(1_500_000_000_000_000),
        ) else {
            panic!("expected valid config");
        };
        cfg
    }

    fn weighted_box() -> PoolBox {
        let Ok(pool) = WeightedPool::from_config(&config()) else {
            panic!("expected valid pool");
        };
        PoolBox::from(pool)
    }

    fn rights_box() -> PoolBox {
        let Ok(cfg) = RightsPoolConfig::new(config(), Rights::default()) else {
            panic!("expected valid config");
        };
        let Ok(pool) = RightsPool::from_config(&cfg) else {
            panic!("expected valid pool");
        };
        PoolBox::from(pool)
    }

    // -- delegation -----------------------------------------------------------

    #[test]
    fn kind_delegation() {
        assert_eq!(weighted_box().kind(), PoolKind::Plain);
        assert_eq!(rights_box().kind(), PoolKind::RightsWrapped);
    }

    #[test]
    fn state_delegation_matches_across_variants() {
        let plain = weighted_box();
        let smart = rights_box();
        assert_eq!(plain.id(), smart.id());
        assert_eq!(plain.constituents(), smart.constituents());
        assert_eq!(plain.total_share_supply(), smart.total_share_supply());
        assert_eq!(plain.swap_fee(), smart.swap_fee());
        assert_eq!(plain.rights(), None);
        assert_eq!(smart.rights(), Some(Rights::default()));
    }

    #[test]
    fn spot_price_delegation() {
        let a = TokenAddress::from_bytes([1u8; 32]);
        let b = TokenAddress::from_bytes([2u8; 32]);
        let Ok(p1) = weighted_box().spot_price(a, b) else {
            panic!("expected price");
        };
        let Ok(p2) = rights_box().spot_price(a, b) else {
            panic!("expected price");
        };
        assert_eq!(p1, p2);
    }

    #[test]
    fn debug_format_contains_variant() {
        let dbg = format!("{:?}", rights_box());
        assert!(dbg.contains("Rights"));
    }
}
