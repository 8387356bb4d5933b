//! The zap sequence: swap into a constituent, join, hand over the shares.
//!
//! # Sequence
//!
//! ```text
//! 1. now < deadline, pool id and kind match        (no effects yet)
//! 2. underlying / floor from the quote engine      (if not supplied)
//! 3. pull input from the caller                    ─┐
//! 4. swap input → underlying (skipped if equal)     │ ledger Transaction
//! 5. exact approval → join → allowance back to 0    │ + compensation log
//! 6. [secondary leg: pull → approve → join → 0]     │
//! 7. shares and leftovers to the caller            ─┘
//! ```
//!
//! Any error after step 2 rolls the transaction back and reverts the
//! completed swaps and joins, newest first. The caller ends up exactly
//! where they started.

use tracing::{debug, info, instrument, warn};

use super::basket::basket_pool_out;
use super::compensation::{Compensation, CompensationLog};
use super::quote_engine::{check_kind, quote_exchange};
use super::QuoteEngine;
use crate::config::ZapperConfig;
use crate::domain::{
    Account, Amount, Asset, JoinReceipt, Slippage, SwapReceipt, Timestamp, TokenAddress,
    ZapReceipt, ZapRequest,
};
use crate::error::{Result, ZapError};
use crate::ledger::{Ledger, Transaction};
use crate::math::CheckedArithmetic;
use crate::traits::{Clock, Exchanger, SwapOrder, SystemClock, WeightedPoolSurface};

/// Mutable collaborators of one zap call.
#[derive(Debug)]
pub struct ZapContext<'a, P, X> {
    /// Custody layer.
    pub ledger: &'a mut Ledger,
    /// Pool being joined.
    pub pool: &'a mut P,
    /// Exchange used to buy constituents.
    pub exchanger: &'a mut X,
}

impl<'a, P, X> ZapContext<'a, P, X>
where
    P: WeightedPoolSurface,
    X: Exchanger,
{
    /// Bundles the collaborators.
    pub fn new(ledger: &'a mut Ledger, pool: &'a mut P, exchanger: &'a mut X) -> Self {
        Self {
            ledger,
            pool,
            exchanger,
        }
    }
}

/// Which single-token entry point is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    BuyAndJoin,
    JoinPool,
}

/// Everything decided before the first effect.
#[derive(Debug, Clone, Copy)]
struct Plan {
    now: Timestamp,
    slippage: Slippage,
    underlying: TokenAddress,
    min_pool_amount_out: Amount,
}

/// Zapper balances at entry, so leftovers can be told apart from anything
/// the custody account already held.
#[derive(Debug)]
struct Residue {
    zapper: Account,
    baseline: Vec<(Asset, Amount)>,
}

impl Residue {
    fn capture(tx: &Transaction<'_>, zapper: Account, assets: impl IntoIterator<Item = Asset>) -> Self {
        let mut baseline: Vec<(Asset, Amount)> = Vec::new();
        for asset in assets {
            if baseline.iter().all(|(a, _)| *a != asset) {
                baseline.push((asset, tx.balance_of(zapper, asset)));
            }
        }
        Self { zapper, baseline }
    }

    /// Returns everything above the baseline to `caller`.
    fn refund(&self, tx: &mut Transaction<'_>, caller: Account) -> Result<Vec<(Asset, Amount)>> {
        let mut refunds = Vec::new();
        for (asset, before) in &self.baseline {
            let extra = tx.balance_of(self.zapper, *asset).safe_sub(before)?;
            if !extra.is_zero() {
                tx.transfer(self.zapper, caller, *asset, extra)?;
                refunds.push((*asset, extra));
            }
        }
        Ok(refunds)
    }
}

/// Runs zaps against a weighted pool and an exchanger.
///
/// The coordinator holds no balances between calls. Its custody account
/// only carries value inside a call's transaction.
#[derive(Debug, Clone)]
pub struct ZapCoordinator<C = SystemClock> {
    config: ZapperConfig,
    clock: C,
}

impl<C: Clock> ZapCoordinator<C> {
    /// Creates a coordinator.
    pub const fn new(config: ZapperConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Coordinator settings.
    #[must_use]
    pub const fn config(&self) -> &ZapperConfig {
        &self.config
    }

    /// Custody account callers approve for token inputs.
    #[must_use]
    pub const fn account(&self) -> Account {
        self.config.account()
    }

    /// The deadline clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the deadline clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Zaps native currency into pool shares.
    ///
    /// # Errors
    ///
    /// - [`ZapError::DeadlineExpired`] if `now ≥ deadline`; nothing runs.
    /// - [`ZapError::UnknownPool`] or [`ZapError::UnsupportedPoolKind`] if
    ///   the request names another pool or the wrong kind.
    /// - [`ZapError::InvalidToken`] if the input is not native.
    /// - Any quote, exchange, pool or transfer error; all effects are
    ///   unwound.
    #[instrument(skip_all, fields(caller = %request.caller(), pool = %request.pool()))]
    pub fn buy_and_join<P, X>(
        &self,
        ctx: &mut ZapContext<'_, P, X>,
        request: &ZapRequest,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        self.zap_single(ctx, request, Entry::BuyAndJoin)
    }

    /// Zaps native currency or a caller-approved token into pool shares.
    ///
    /// When the input already is the underlying, no swap happens and the
    /// mint equals a direct join of the same amount.
    ///
    /// # Errors
    ///
    /// As for [`buy_and_join`](Self::buy_and_join), without the native
    /// input restriction.
    #[instrument(skip_all, fields(caller = %request.caller(), pool = %request.pool()))]
    pub fn join_pool<P, X>(
        &self,
        ctx: &mut ZapContext<'_, P, X>,
        request: &ZapRequest,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        self.zap_single(ctx, request, Entry::JoinPool)
    }

    /// Spreads the input over every constituent by weight and joins
    /// proportionally.
    ///
    /// The request's `underlying` and `secondary` fields are ignored. Its
    /// floor, when present, replaces the quoted one.
    ///
    /// # Errors
    ///
    /// - Entry errors as for [`buy_and_join`](Self::buy_and_join).
    /// - [`ZapError::BelowMinimumOutput`] if the bought basket covers
    ///   fewer shares than the floor.
    /// - Any quote, exchange, pool or transfer error; all effects are
    ///   unwound.
    #[instrument(skip_all, fields(caller = %request.caller(), pool = %request.pool()))]
    pub fn buy_basket_and_join<P, X>(
        &self,
        ctx: &mut ZapContext<'_, P, X>,
        request: &ZapRequest,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        let now = self.admit(&*ctx.pool, request)?;
        let slippage = self.slippage_for(request);
        let quote = QuoteEngine::quote_basket(
            &*ctx.pool,
            request.kind(),
            &*ctx.exchanger,
            request.input(),
            slippage,
        )?;
        let min_pool_amount_out = request
            .min_pool_amount_out()
            .unwrap_or(quote.min_pool_amount_out);

        let mut log = CompensationLog::default();
        let mut tx = ctx.ledger.begin();
        let outcome = self.run_basket(
            &mut tx,
            &mut *ctx.pool,
            &mut *ctx.exchanger,
            &mut log,
            request,
            &quote.purchases,
            min_pool_amount_out,
            slippage,
            now,
        );
        settle(tx, log, &mut *ctx.pool, &mut *ctx.exchanger, outcome)
    }

    // -- shared steps ---------------------------------------------------------

    /// Entry checks; no effects.
    fn admit<P>(&self, pool: &P, request: &ZapRequest) -> Result<Timestamp>
    where
        P: WeightedPoolSurface + ?Sized,
    {
        let now = self.clock.now();
        if !now.is_before(request.deadline()) {
            return Err(ZapError::DeadlineExpired {
                now,
                deadline: request.deadline(),
            });
        }
        if pool.id() != request.pool() {
            return Err(ZapError::UnknownPool);
        }
        check_kind(pool, request.kind())?;
        if request.input().amount().is_zero() {
            return Err(ZapError::InvalidQuantity("zap input must be non-zero"));
        }
        Ok(now)
    }

    fn slippage_for(&self, request: &ZapRequest) -> Slippage {
        request
            .slippage()
            .unwrap_or_else(|| self.config.default_slippage())
    }

    fn zap_single<P, X>(
        &self,
        ctx: &mut ZapContext<'_, P, X>,
        request: &ZapRequest,
        entry: Entry,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        let now = self.admit(&*ctx.pool, request)?;
        if entry == Entry::BuyAndJoin && !request.input().asset().is_native() {
            return Err(ZapError::InvalidToken("buy_and_join takes native input"));
        }
        let slippage = self.slippage_for(request);
        let underlying = match request.underlying() {
            Some(token) => token,
            None => QuoteEngine::choose_underlying_token(&*ctx.pool, request.kind())?,
        };
        let min_pool_amount_out = match request.min_pool_amount_out() {
            Some(min) => min,
            None => {
                QuoteEngine::calc_min_pool_amount_out(
                    &*ctx.pool,
                    request.kind(),
                    &*ctx.exchanger,
                    underlying,
                    request.input(),
                    request.secondary(),
                    slippage,
                )?
                .min_pool_amount_out
            }
        };
        let plan = Plan {
            now,
            slippage,
            underlying,
            min_pool_amount_out,
        };
        debug!(?entry, %underlying, floor = %min_pool_amount_out, "zap planned");

        let mut log = CompensationLog::default();
        let mut tx = ctx.ledger.begin();
        let outcome = self.run_single(
            &mut tx,
            &mut *ctx.pool,
            &mut *ctx.exchanger,
            &mut log,
            request,
            &plan,
        );
        settle(tx, log, &mut *ctx.pool, &mut *ctx.exchanger, outcome)
    }

    fn run_single<P, X>(
        &self,
        tx: &mut Transaction<'_>,
        pool: &mut P,
        exchanger: &mut X,
        log: &mut CompensationLog,
        request: &ZapRequest,
        plan: &Plan,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        let zapper = self.account();
        let caller = request.caller();
        let input = request.input();
        let underlying = Asset::Token(plan.underlying);
        let secondary = request.secondary();

        let residue = Residue::capture(
            tx,
            zapper,
            [input.asset(), underlying]
                .into_iter()
                .chain(secondary.map(|leg| Asset::Token(leg.token()))),
        );

        self.pull(tx, caller, input.asset(), input.amount())?;

        let received = if input.asset() == underlying {
            input.amount()
        } else {
            let receipt = self.swap(
                tx,
                exchanger,
                input.asset(),
                input.amount(),
                underlying,
                request.expected_underlying_amount(),
                plan.slippage,
                request.deadline(),
                plan.now,
            )?;
            let out = receipt.amount_out;
            log.push(Compensation::Swap(receipt));
            out
        };

        // With two legs the floor covers their sum, so the first join runs
        // unguarded and the second carries what is left of the floor.
        let first_floor = if secondary.is_some() {
            Amount::ZERO
        } else {
            plan.min_pool_amount_out
        };
        let first = self.join(tx, pool, plan.underlying, received, first_floor)?;
        let mut shares = first.shares;
        log.push(Compensation::Join(first));

        if let Some(leg) = secondary {
            self.pull(tx, caller, Asset::Token(leg.token()), leg.amount())?;
            let floor = plan
                .min_pool_amount_out
                .checked_sub(&shares)
                .unwrap_or(Amount::ZERO);
            let second = self.join(tx, pool, leg.token(), leg.amount(), floor)?;
            shares = shares.safe_add(&second.shares)?;
            log.push(Compensation::Join(second));
        }

        tx.transfer(zapper, caller, Asset::Token(pool.id().share_token()), shares)?;
        let refunds = residue.refund(tx, caller)?;

        Ok(ZapReceipt {
            pool: pool.id(),
            caller,
            input,
            underlying: Some(plan.underlying),
            underlying_amount: received,
            min_pool_amount_out: plan.min_pool_amount_out,
            shares_minted: shares,
            refunds,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run_basket<P, X>(
        &self,
        tx: &mut Transaction<'_>,
        pool: &mut P,
        exchanger: &mut X,
        log: &mut CompensationLog,
        request: &ZapRequest,
        purchases: &[super::BasketPurchase],
        min_pool_amount_out: Amount,
        slippage: Slippage,
        now: Timestamp,
    ) -> Result<ZapReceipt>
    where
        P: WeightedPoolSurface,
        X: Exchanger,
    {
        let zapper = self.account();
        let caller = request.caller();
        let input = request.input();

        let residue = Residue::capture(
            tx,
            zapper,
            std::iter::once(input.asset()).chain(purchases.iter().map(|p| Asset::Token(p.token))),
        );

        self.pull(tx, caller, input.asset(), input.amount())?;

        let mut bought = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            let asset_out = Asset::Token(purchase.token);
            let amount = if input.asset() == asset_out {
                purchase.spend
            } else {
                let receipt = self.swap(
                    tx,
                    exchanger,
                    input.asset(),
                    purchase.spend,
                    asset_out,
                    None,
                    slippage,
                    request.deadline(),
                    now,
                )?;
                let out = receipt.amount_out;
                log.push(Compensation::Swap(receipt));
                out
            };
            bought.push(amount);
        }

        let constituents = pool.constituents();
        let shares = basket_pool_out(&constituents, pool.total_share_supply(), &bought)?;
        if shares < min_pool_amount_out {
            return Err(ZapError::BelowMinimumOutput {
                min_out: min_pool_amount_out,
                minted: shares,
            });
        }

        let spender = pool.id().account();
        for (c, amount) in constituents.iter().zip(&bought) {
            tx.approve(zapper, spender, c.token(), *amount);
        }
        let receipt = pool.join_all(tx, zapper, shares, &bought)?;
        for c in &constituents {
            tx.approve(zapper, spender, c.token(), Amount::ZERO);
        }
        log.push(Compensation::Join(receipt));

        tx.transfer(zapper, caller, Asset::Token(pool.id().share_token()), shares)?;
        let refunds = residue.refund(tx, caller)?;

        Ok(ZapReceipt {
            pool: pool.id(),
            caller,
            input,
            underlying: None,
            underlying_amount: Amount::ZERO,
            min_pool_amount_out,
            shares_minted: shares,
            refunds,
        })
    }

    /// Moves the caller's input into custody.
    fn pull(&self, tx: &mut Transaction<'_>, caller: Account, asset: Asset, amount: Amount) -> Result<()> {
        let zapper = self.account();
        match asset {
            Asset::Native => tx.transfer(caller, zapper, Asset::Native, amount),
            Asset::Token(token) => tx.transfer_from(zapper, caller, zapper, token, amount),
        }
    }

    /// Swaps custody funds for `asset_out`.
    ///
    /// The minimum output is `expected` less slippage. Without an
    /// expectation it falls back to a quote against the reserves the swap
    /// is about to trade on, which bounds only the tolerance arithmetic and
    /// cannot trip; stale-state protection then rests on the share floor.
    #[allow(clippy::too_many_arguments)]
    fn swap<X>(
        &self,
        tx: &mut Transaction<'_>,
        exchanger: &mut X,
        asset_in: Asset,
        amount_in: Amount,
        asset_out: Asset,
        expected: Option<Amount>,
        slippage: Slippage,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<SwapReceipt>
    where
        X: Exchanger,
    {
        let zapper = self.account();
        let expected = match expected {
            Some(amount) => amount,
            None => quote_exchange(&*exchanger, asset_in, amount_in, asset_out)?,
        };
        let min_amount_out = slippage.apply_floor(expected)?;

        let spender = exchanger.account();
        if let Some(token) = asset_in.token() {
            tx.approve(zapper, spender, token, amount_in);
        }
        let receipt = exchanger.swap(
            tx,
            &SwapOrder {
                sender: zapper,
                recipient: zapper,
                asset_in,
                amount_in,
                asset_out,
                min_amount_out,
                deadline,
            },
            now,
        )?;
        if let Some(token) = asset_in.token() {
            tx.approve(zapper, spender, token, Amount::ZERO);
        }
        debug!(%asset_in, %amount_in, %asset_out, amount_out = %receipt.amount_out, "bought underlying");
        Ok(receipt)
    }

    /// Exact approval, single-token join, allowance back to zero.
    fn join<P>(
        &self,
        tx: &mut Transaction<'_>,
        pool: &mut P,
        token: TokenAddress,
        amount: Amount,
        floor: Amount,
    ) -> Result<JoinReceipt>
    where
        P: WeightedPoolSurface,
    {
        let zapper = self.account();
        let spender = pool.id().account();
        tx.approve(zapper, spender, token, amount);
        let receipt = pool.join_single_token(tx, zapper, token, amount, floor)?;
        tx.approve(zapper, spender, token, Amount::ZERO);
        Ok(receipt)
    }
}

/// Commits a successful zap, or unwinds a failed one.
fn settle<P, X>(
    tx: Transaction<'_>,
    log: CompensationLog,
    pool: &mut P,
    exchanger: &mut X,
    outcome: Result<ZapReceipt>,
) -> Result<ZapReceipt>
where
    P: WeightedPoolSurface,
    X: Exchanger,
{
    match outcome {
        Ok(receipt) => {
            tx.commit();
            info!(
                shares = %receipt.shares_minted,
                floor = %receipt.min_pool_amount_out,
                refunds = receipt.refunds.len(),
                "zap completed"
            );
            Ok(receipt)
        }
        Err(err) => {
            let steps = log.len();
            log.unwind(pool, exchanger);
            tx.rollback();
            warn!(error = %err, unwound = steps, "zap aborted");
            Err(err)
        }
    }
}
