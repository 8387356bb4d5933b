//! Caller-facing zap request.

use super::{Account, Amount, Asset, PoolId, PoolKind, Slippage, Timestamp, TokenAddress};

/// The single asset a caller spends on a zap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZapInput {
    /// Native currency attached to the call.
    Native(Amount),
    /// A token the caller has approved the zapper to pull.
    Token {
        /// Token spent.
        token: TokenAddress,
        /// Amount spent.
        amount: Amount,
    },
}

impl ZapInput {
    /// The ledger asset spent.
    #[must_use]
    pub const fn asset(&self) -> Asset {
        match self {
            Self::Native(_) => Asset::Native,
            Self::Token { token, .. } => Asset::Token(*token),
        }
    }

    /// The amount spent.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        match self {
            Self::Native(a) | Self::Token { amount: a, .. } => *a,
        }
    }
}

/// A caller-held constituent deposited right after the main leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecondaryLeg {
    token: TokenAddress,
    amount: Amount,
}

impl SecondaryLeg {
    /// Creates the leg.
    #[must_use]
    pub const fn new(token: TokenAddress, amount: Amount) -> Self {
        Self { token, amount }
    }

    /// Constituent deposited.
    #[must_use]
    pub const fn token(&self) -> TokenAddress {
        self.token
    }

    /// Amount deposited.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }
}

/// Everything one zap call needs. Built fresh per call, never stored.
///
/// Optional fields are derived from live pool state when absent: the
/// underlying token by the quote engine's selection policy, the share
/// floor by quoting and applying the slippage tolerance.
///
/// # Examples
///
/// ```
/// use hydra_zap::domain::{Account, Amount, PoolId, PoolKind, Slippage, Timestamp, ZapRequest};
///
/// let Ok(one_percent) = Slippage::from_bps(100) else { return };
/// let req = ZapRequest::native(
///     Account::from_bytes([1u8; 32]),
///     PoolId::from_bytes([2u8; 32]),
///     PoolKind::Plain,
///     Amount::new(1_000),
///     Timestamp::new(1_000),
/// )
/// .with_slippage(one_percent);
/// assert_eq!(req.slippage(), Some(one_percent));
/// assert_eq!(req.underlying(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZapRequest {
    caller: Account,
    pool: PoolId,
    kind: PoolKind,
    input: ZapInput,
    deadline: Timestamp,
    slippage: Option<Slippage>,
    underlying: Option<TokenAddress>,
    min_pool_amount_out: Option<Amount>,
    expected_underlying_amount: Option<Amount>,
    secondary: Option<SecondaryLeg>,
}

impl ZapRequest {
    /// A zap paid in native currency.
    #[must_use]
    pub const fn native(
        caller: Account,
        pool: PoolId,
        kind: PoolKind,
        amount: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self::new(caller, pool, kind, ZapInput::Native(amount), deadline)
    }

    /// A zap paid with a token the caller has approved.
    #[must_use]
    pub const fn token(
        caller: Account,
        pool: PoolId,
        kind: PoolKind,
        token: TokenAddress,
        amount: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self::new(
            caller,
            pool,
            kind,
            ZapInput::Token { token, amount },
            deadline,
        )
    }

    const fn new(
        caller: Account,
        pool: PoolId,
        kind: PoolKind,
        input: ZapInput,
        deadline: Timestamp,
    ) -> Self {
        Self {
            caller,
            pool,
            kind,
            input,
            deadline,
            slippage: None,
            underlying: None,
            min_pool_amount_out: None,
            expected_underlying_amount: None,
            secondary: None,
        }
    }

    /// Sets the slippage tolerance.
    #[must_use]
    pub const fn with_slippage(mut self, slippage: Slippage) -> Self {
        self.slippage = Some(slippage);
        self
    }

    /// Pins the underlying token instead of letting the engine choose.
    #[must_use]
    pub const fn with_underlying(mut self, token: TokenAddress) -> Self {
        self.underlying = Some(token);
        self
    }

    /// Pins the share floor instead of quoting one.
    #[must_use]
    pub const fn with_min_pool_amount_out(mut self, min: Amount) -> Self {
        self.min_pool_amount_out = Some(min);
        self
    }

    /// Pins the underlying amount the swap is expected to deliver.
    ///
    /// The swap's minimum output becomes this amount less the slippage
    /// tolerance, so a quote taken earlier still bounds the trade after the
    /// exchange has moved.
    #[must_use]
    pub const fn with_expected_underlying_amount(mut self, amount: Amount) -> Self {
        self.expected_underlying_amount = Some(amount);
        self
    }

    /// Adds a second, caller-held constituent to deposit.
    #[must_use]
    pub const fn with_secondary(mut self, leg: SecondaryLeg) -> Self {
        self.secondary = Some(leg);
        self
    }

    /// Caller account.
    #[must_use]
    pub const fn caller(&self) -> Account {
        self.caller
    }

    /// Target pool.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        self.pool
    }

    /// Pool-kind flag claimed by the caller.
    #[must_use]
    pub const fn kind(&self) -> PoolKind {
        self.kind
    }

    /// Input asset and amount.
    #[must_use]
    pub const fn input(&self) -> ZapInput {
        self.input
    }

    /// Deadline.
    #[must_use]
    pub const fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Slippage tolerance, if set.
    #[must_use]
    pub const fn slippage(&self) -> Option<Slippage> {
        self.slippage
    }

    /// Pinned underlying token, if set.
    #[must_use]
    pub const fn underlying(&self) -> Option<TokenAddress> {
        self.underlying
    }

    /// Pinned share floor, if set.
    #[must_use]
    pub const fn min_pool_amount_out(&self) -> Option<Amount> {
        self.min_pool_amount_out
    }

    /// Pinned swap expectation, if set.
    #[must_use]
    pub const fn expected_underlying_amount(&self) -> Option<Amount> {
        self.expected_underlying_amount
    }

    /// Secondary leg, if set.
    #[must_use]
    pub const fn secondary(&self) -> Option<SecondaryLeg> {
        self.secondary
    }
}
