//! Finalized weighted pool (Balancer V1 `BPool` semantics).
//!
//! The pool keeps its own record of every bound token's balance and
//! denormalized weight, plus the outstanding share supply. Custody lives
//! in the ledger under the pool's account; the records move in lockstep
//! with it.
//!
//! # Single-Token Join
//!
//! 1. `amount_in ≤ balance × MAX_IN_RATIO`
//! 2. `shares = calc_pool_out_given_single_in(balance, w, supply, amount_in, fee)`
//! 3. `shares ≥ min_shares_out`
//! 4. pull `amount_in` from the sender (allowance to the pool account)
//! 5. mint `shares` to the sender
//! 6. `balance += amount_in`, `supply += shares`
//!
//! # Proportional Join
//!
//! ```text
//! ratio      = pool_amount_out / supply          (half-up)
//! amount_in_i = ratio × balance_i                (half-up), ≤ max_in_i
//! ```

use tracing::debug;

use crate::config::WeightedPoolConfig;
use crate::domain::{
    Account, Amount, Asset, Constituent, JoinReceipt, PoolId, PoolKind, Rights, Token,
    TokenAddress,
};
use crate::error::{Result, ZapError};
use crate::ledger::Transaction;
use crate::math::weighted_math::{calc_out_given_in, calc_spot_price, max_in, single_in_shares};
use crate::math::{Bfp, CheckedArithmetic};
use crate::traits::{FromConfig, WeightedPoolSurface};

/// Bound-token record.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    token: Token,
    denorm: Bfp,
    balance: Amount,
}

/// A finalized Balancer-style weighted pool.
///
/// Created from a [`WeightedPoolConfig`] via [`FromConfig`]; the factory
/// moves the initial balances into the pool account and mints the
/// initial supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPool {
    id: PoolId,
    records: Vec<Record>,
    total_weight: Bfp,
    swap_fee: Bfp,
    total_supply: Amount,
}

impl WeightedPool {
    /// Account holding the pool's constituent balances.
    #[must_use]
    pub const fn account(&self) -> Account {
        self.id.account()
    }

    /// Sum of denormalized weights.
    #[must_use]
    pub const fn total_weight(&self) -> Bfp {
        self.total_weight
    }

    /// Shares `amount_in` of `token` would mint right now.
    ///
    /// # Errors
    ///
    /// Same as [`single_in_shares`], plus [`ZapError::InvalidToken`] for an
    /// unbound token.
    pub fn preview_join_single_token(&self, token: TokenAddress, amount_in: Amount) -> Result<Amount> {
        let record = self.record(token)?;
        let weight = record.denorm.div(self.total_weight)?;
        single_in_shares(record.balance, weight, self.total_supply, amount_in, self.swap_fee)
    }

    fn position(&self, token: TokenAddress) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.token.address() == token)
            .ok_or(ZapError::InvalidToken("token is not bound to the pool"))
    }

    fn record(&self, token: TokenAddress) -> Result<&Record> {
        let idx = self.position(token)?;
        self.records
            .get(idx)
            .ok_or(ZapError::InvalidToken("token is not bound to the pool"))
    }

    fn record_mut(&mut self, token: TokenAddress) -> Result<&mut Record> {
        let idx = self.position(token)?;
        self.records
            .get_mut(idx)
            .ok_or(ZapError::InvalidToken("token is not bound to the pool"))
    }
}

impl FromConfig<WeightedPoolConfig> for WeightedPool {
    /// Builds the pool records from the configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`WeightedPoolConfig::validate`].
    fn from_config(config: &WeightedPoolConfig) -> Result<Self> {
        config.validate()?;
        let mut total_weight = Bfp::ZERO;
        let mut records = Vec::with_capacity(config.tokens().len());
        for ((token, denorm), balance) in config
            .tokens()
            .iter()
            .zip(config.weights())
            .zip(config.balances())
        {
            total_weight = total_weight.add(*denorm)?;
            records.push(Record {
                token: *token,
                denorm: *denorm,
                balance: *balance,
            });
        }
        Ok(Self {
            id: config.id(),
            records,
            total_weight,
            swap_fee: config.swap_fee(),
            total_supply: config.initial_supply(),
        })
    }
}

impl WeightedPoolSurface for WeightedPool {
    fn id(&self) -> PoolId {
        self.id
    }

    fn kind(&self) -> PoolKind {
        PoolKind::Plain
    }

    fn rights(&self) -> Option<Rights> {
        None
    }

    fn constituents(&self) -> Vec<Constituent> {
        self.records
            .iter()
            .map(|r| {
                // total_weight >= MIN_WEIGHT, so the division cannot fail.
                let weight = r.denorm.div(self.total_weight).unwrap_or(Bfp::ZERO);
                Constituent::new(r.token.address(), r.balance, r.denorm, weight)
            })
            .collect()
    }

    fn total_share_supply(&self) -> Amount {
        self.total_supply
    }

    fn swap_fee(&self) -> Bfp {
        self.swap_fee
    }

    fn join_single_token(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        token: TokenAddress,
        amount_in: Amount,
        min_shares_out: Amount,
    ) -> Result<JoinReceipt> {
        if amount_in.is_zero() {
            return Err(ZapError::InvalidQuantity("join amount must be non-zero"));
        }
        let shares = self.preview_join_single_token(token, amount_in)?;
        if shares < min_shares_out {
            return Err(ZapError::BelowMinimumOutput {
                min_out: min_shares_out,
                minted: shares,
            });
        }

        let pool = self.account();
        tx.transfer_from(pool, sender, pool, token, amount_in)?;
        tx.mint(sender, Asset::Token(self.id.share_token()), shares)?;

        let new_supply = self.total_supply.safe_add(&shares)?;
        let record = self.record_mut(token)?;
        record.balance = record.balance.safe_add(&amount_in)?;
        self.total_supply = new_supply;

        debug!(pool = %self.id, %token, %amount_in, %shares, "single-token join");
        Ok(JoinReceipt {
            pool: self.id,
            sender,
            pulled: vec![(token, amount_in)],
            shares,
        })
    }

    fn join_all(
        &mut self,
        tx: &mut Transaction<'_>,
        sender: Account,
        pool_amount_out: Amount,
        max_amounts_in: &[Amount],
    ) -> Result<JoinReceipt> {
        if max_amounts_in.len() != self.records.len() {
            return Err(ZapError::InvalidQuantity(
                "one limit per constituent is required",
            ));
        }
        let ratio = Bfp::from(pool_amount_out).div(Bfp::from(self.total_supply))?;
        if ratio.is_zero() {
            return Err(ZapError::InvalidQuantity("share ratio rounds to zero"));
        }

        let mut pulled = Vec::with_capacity(self.records.len());
        for (record, max) in self.records.iter().zip(max_amounts_in) {
            let amount = ratio.mul(Bfp::from(record.balance))?.to_amount()?;
            if amount.is_zero() {
                return Err(ZapError::InvalidQuantity("token amount rounds to zero"));
            }
            if amount > *max {
                return Err(ZapError::LimitInExceeded {
                    max_in: *max,
                    required: amount,
                });
            }
            pulled.push((record.token.address(), amount));
        }

        let pool = self.account();
        for (token, amount) in &pulled {
            tx.transfer_from(pool, sender, pool, *token, *amount)?;
        }
        tx.mint(sender, Asset::Token(self.id.share_token()), pool_amount_out)?;

        let new_supply = self.total_supply.safe_add(&pool_amount_out)?;
        for (record, (_, amount)) in self.records.iter_mut().zip(&pulled) {
            record.balance = record.balance.safe_add(amount)?;
        }
        self.total_supply = new_supply;

        debug!(pool = %self.id, shares = %pool_amount_out, tokens = pulled.len(), "proportional join");
        Ok(JoinReceipt {
            pool: self.id,
            sender,
            pulled,
            shares: pool_amount_out,
        })
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
        if token_in == token_out {
            return Err(ZapError::InvalidToken("cannot swap a token for itself"));
        }
        let rec_in = self.record(token_in)?.clone();
        let rec_out = self.record(token_out)?.clone();
        let bal_in = Bfp::from(rec_in.balance);
        let bal_out = Bfp::from(rec_out.balance);
        if Bfp::from(amount_in) > max_in(bal_in)? {
            return Err(ZapError::MaxInRatioExceeded);
        }

        let price_before =
            calc_spot_price(bal_in, rec_in.denorm, bal_out, rec_out.denorm, self.swap_fee)?;
        let amount_out = calc_out_given_in(
            bal_in,
            rec_in.denorm,
            bal_out,
            rec_out.denorm,
            Bfp::from(amount_in),
            self.swap_fee,
        )?
        .to_amount()?;
        if amount_out < min_amount_out {
            return Err(ZapError::SlippageExceeded {
                min_out: min_amount_out,
                actual: amount_out,
            });
        }
        let new_in = rec_in.balance.safe_add(&amount_in)?;
        let new_out = rec_out.balance.safe_sub(&amount_out)?;
        let price_after = calc_spot_price(
            Bfp::from(new_in),
            rec_in.denorm,
            Bfp::from(new_out),
            rec_out.denorm,
            self.swap_fee,
        )?;
        if price_after < price_before {
            return Err(ZapError::InvalidPrecision("spot price moved against the trade"));
        }

        let pool = self.account();
        tx.transfer_from(pool, sender, pool, token_in, amount_in)?;
        tx.transfer(pool, sender, Asset::Token(token_out), amount_out)?;
        self.record_mut(token_in)?.balance = new_in;
        self.record_mut(token_out)?.balance = new_out;

        debug!(pool = %self.id, %token_in, %amount_in, %token_out, %amount_out, "pool swap");
        Ok(amount_out)
    }

    fn spot_price(&self, token_in: TokenAddress, token_out: TokenAddress) -> Result<Bfp> {
        let rec_in = self.record(token_in)?;
        let rec_out = self.record(token_out)?;
        calc_spot_price(
            Bfp::from(rec_in.balance),
            rec_in.denorm,
            Bfp::from(rec_out.balance),
            rec_out.denorm,
            self.swap_fee,
        )
    }

    fn revert_join(&mut self, receipt: &JoinReceipt) -> Result<()> {
        if receipt.pool != self.id {
            return Err(ZapError::UnknownPool);
        }
        let new_supply = self.total_supply.safe_sub(&receipt.shares)?;
        for (token, amount) in &receipt.pulled {
            let record = self.record_mut(*token)?;
            record.balance = record.balance.safe_sub(amount)?;
        }
        self.total_supply = new_supply;
        debug!(pool = %self.id, shares = %receipt.shares, "join reverted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;

    const E18: u128 = 1_000_000_000_000_000_000;

    // -- helpers --------------------------------------------------------------

    fn tok(byte: u8) -> TokenAddress {
        TokenAddress::from_bytes([byte; 32])
    }

    fn user() -> Account {
        Account::from_bytes([0xee; 32])
    }

    fn make_pool(weights: [u64; 3]) -> WeightedPool {
        let Ok(cfg) = WeightedPoolConfig::new(
            PoolId::from_bytes([0xaa; 32]),
            vec![
                Token::standard(tok(1)),
                Token::standard(tok(2)),
                Token::standard(tok(3)),
            ],
            weights.iter().map(|w| Bfp::from_integer(*w)).collect(),
            vec![Amount::new(100 * E18), Amount::new(200 * E18), Amount::new(300 * E18)],
            Bfp::from_wei_u128(E18 / 1_000),
        ) else {
            panic!("valid config");
        };
        let Ok(pool) = WeightedPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    /// Ledger where the pool holds its balances and `user` holds and has
    /// approved 1000 of every token.
    fn ledger_for(pool: &WeightedPool) -> Ledger {
        let mut ledger = Ledger::new();
        for c in pool.constituents() {
            let Ok(()) = ledger.mint(pool.account(), Asset::Token(c.token()), c.balance()) else {
                panic!("mint");
            };
            let Ok(()) = ledger.mint(user(), Asset::Token(c.token()), Amount::new(1_000 * E18))
            else {
                panic!("mint");
            };
            let mut tx = ledger.begin();
            tx.approve(user(), pool.account(), c.token(), Amount::MAX);
            tx.commit();
        }
        ledger
    }

    // -- construction ---------------------------------------------------------

    #[test]
    fn normalized_weights_sum_to_one() {
        let pool = make_pool([1, 2, 2]);
        let Ok(sum) = pool
            .constituents()
            .iter()
            .try_fold(Bfp::ZERO, |acc, c| acc.add(c.weight()))
        else {
            panic!("sum");
        };
        let (diff, _) = sum.sub_sign(Bfp::ONE);
        assert!(diff <= Bfp::from_wei_u128(3));
        assert_eq!(pool.total_weight(), Bfp::from_integer(5));
        assert_eq!(pool.kind(), PoolKind::Plain);
        assert_eq!(pool.rights(), None);
    }

    // -- single-token join ------------------------------------------------------

    #[test]
    fn join_single_token_mints_preview() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let Ok(preview) = pool.preview_join_single_token(tok(1), Amount::new(10 * E18)) else {
            panic!("preview");
        };
        let mut tx = ledger.begin();
        let Ok(receipt) = pool.join_single_token(&mut tx, user(), tok(1), Amount::new(10 * E18), preview)
        else {
            panic!("join");
        };
        tx.commit();
        assert_eq!(receipt.shares, preview);
        assert_eq!(
            ledger.balance_of(user(), Asset::Token(pool.id().share_token())),
            preview
        );
        assert_eq!(
            ledger.balance_of(pool.account(), Asset::Token(tok(1))),
            Amount::new(110 * E18)
        );
        let Some(c) = pool.constituent(tok(1)) else {
            panic!("bound");
        };
        assert_eq!(c.balance(), Amount::new(110 * E18));
        assert_eq!(pool.total_share_supply().get(), 100 * E18 + preview.get());
    }

    #[test]
    fn join_below_floor_changes_nothing() {
        let mut pool = make_pool([1, 1, 1]);
        let snapshot = pool.clone();
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        let result = pool.join_single_token(&mut tx, user(), tok(1), Amount::new(E18), Amount::new(100 * E18));
        assert!(matches!(result, Err(ZapError::BelowMinimumOutput { .. })));
        assert!(tx.is_empty());
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn join_rejects_unbound_and_oversized() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        assert!(matches!(
            pool.join_single_token(&mut tx, user(), tok(9), Amount::new(1), Amount::ZERO),
            Err(ZapError::InvalidToken(_))
        ));
        assert!(matches!(
            pool.join_single_token(&mut tx, user(), tok(1), Amount::new(51 * E18), Amount::ZERO),
            Err(ZapError::MaxInRatioExceeded)
        ));
        assert!(matches!(
            pool.join_single_token(&mut tx, user(), tok(1), Amount::ZERO, Amount::ZERO),
            Err(ZapError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn join_without_allowance_fails_before_state_change() {
        let mut pool = make_pool([1, 1, 1]);
        let snapshot = pool.clone();
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        tx.approve(user(), pool.account(), tok(1), Amount::ZERO);
        let result = pool.join_single_token(&mut tx, user(), tok(1), Amount::new(E18), Amount::ZERO);
        assert!(matches!(result, Err(ZapError::TransferFailed(_))));
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn revert_join_restores_records() {
        let mut pool = make_pool([1, 2, 3]);
        let snapshot = pool.clone();
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        let Ok(receipt) = pool.join_single_token(&mut tx, user(), tok(2), Amount::new(5 * E18), Amount::ZERO)
        else {
            panic!("join");
        };
        let Ok(()) = pool.revert_join(&receipt) else {
            panic!("revert");
        };
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn revert_join_rejects_foreign_receipt() {
        let mut pool = make_pool([1, 1, 1]);
        let receipt = JoinReceipt {
            pool: PoolId::from_bytes([1u8; 32]),
            sender: user(),
            pulled: vec![],
            shares: Amount::ZERO,
        };
        assert!(matches!(pool.revert_join(&receipt), Err(ZapError::UnknownPool)));
    }

    // -- proportional join ------------------------------------------------------

    #[test]
    fn join_all_pulls_proportionally() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        let limits = [Amount::MAX; 3];
        let Ok(receipt) = pool.join_all(&mut tx, user(), Amount::new(10 * E18), &limits) else {
            panic!("join_all");
        };
        tx.commit();
        let amounts: Vec<u128> = receipt.pulled.iter().map(|(_, a)| a.get()).collect();
        assert_eq!(amounts, vec![10 * E18, 20 * E18, 30 * E18]);
        assert_eq!(pool.total_share_supply(), Amount::new(110 * E18));
    }

    #[test]
    fn join_all_respects_limits() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        let limits = [Amount::MAX, Amount::new(E18), Amount::MAX];
        assert!(matches!(
            pool.join_all(&mut tx, user(), Amount::new(10 * E18), &limits),
            Err(ZapError::LimitInExceeded { .. })
        ));
        assert!(matches!(
            pool.join_all(&mut tx, user(), Amount::new(10 * E18), &limits[..2]),
            Err(ZapError::InvalidQuantity(_))
        ));
    }

    // -- swaps & prices -----------------------------------------------------------

    #[test]
    fn swap_moves_price_up() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let Ok(before) = pool.spot_price(tok(1), tok(2)) else {
            panic!("price");
        };
        let mut tx = ledger.begin();
        let Ok(out) = pool.swap_exact_amount_in(&mut tx, user(), tok(1), Amount::new(10 * E18), tok(2), Amount::ZERO)
        else {
            panic!("swap");
        };
        tx.commit();
        assert!(out.get() > 0);
        let Ok(after) = pool.spot_price(tok(1), tok(2)) else {
            panic!("price");
        };
        assert!(after > before);
    }

    #[test]
    fn swap_min_out_enforced() {
        let mut pool = make_pool([1, 1, 1]);
        let mut ledger = ledger_for(&pool);
        let mut tx = ledger.begin();
        assert!(matches!(
            pool.swap_exact_amount_in(&mut tx, user(), tok(1), Amount::new(E18), tok(2), Amount::new(100 * E18)),
            Err(ZapError::SlippageExceeded { .. })
        ));
        assert!(matches!(
            pool.swap_exact_amount_in(&mut tx, user(), tok(1), Amount::new(E18), tok(1), Amount::ZERO),
            Err(ZapError::InvalidToken(_))
        ));
    }
}
