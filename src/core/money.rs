//! Currency precision policy.
//!
//! Every rounding and every "close enough to zero" comparison in the engine
//! goes through [`MoneyPolicy`], so the 2-place / 0.01 convention lives in
//! exactly one place.

use crate::core::error::SettlementError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Order in which the debt simplifier walks creditors and debtors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrder {
    /// Roster order, filtered to each side. The reference behavior.
    #[default]
    Roster,
    /// Largest outstanding magnitude first (stable for ties).
    LargestFirst,
}

impl FromStr for MatchOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "roster" => Ok(MatchOrder::Roster),
            "largest" | "largest-first" | "largest_first" => Ok(MatchOrder::LargestFirst),
            other => Err(format!("unknown match order '{other}' (expected 'roster' or 'largest')")),
        }
    }
}

impl fmt::Display for MatchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOrder::Roster => write!(f, "roster"),
            MatchOrder::LargestFirst => write!(f, "largest"),
        }
    }
}

/// Rounding and tolerance policy for settlement arithmetic.
///
/// # Examples
///
/// ```
/// use trip_settlement::core::money::MoneyPolicy;
/// use rust_decimal_macros::dec;
///
/// let policy = MoneyPolicy::default();
/// assert_eq!(policy.round(dec!(2.345)), dec!(2.35));
/// assert_eq!(policy.round(dec!(-2.345)), dec!(-2.35));
/// assert!(policy.is_negligible(dec!(0.009)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyPolicy {
    /// Decimal places of the currency's minor unit.
    pub scale: u32,
    /// Magnitudes strictly below this count as settled.
    pub epsilon: Decimal,
    pub rounding: RoundingStrategy,
    pub match_order: MatchOrder,
}

impl Default for MoneyPolicy {
    fn default() -> Self {
        Self {
            scale: 2,
            epsilon: dec!(0.01),
            rounding: RoundingStrategy::MidpointAwayFromZero,
            match_order: MatchOrder::Roster,
        }
    }
}

impl MoneyPolicy {
    pub fn with_match_order(mut self, order: MatchOrder) -> Self {
        self.match_order = order;
        self
    }

    /// Round to the currency scale, half away from zero.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale, self.rounding)
    }

    /// True when `amount` is too small to be worth a transfer.
    pub fn is_negligible(&self, amount: Decimal) -> bool {
        amount.abs() < self.epsilon
    }

    /// Maximum drift from zero the sum of `participants` independently
    /// rounded balances may show.
    pub fn zero_sum_tolerance(&self, participants: usize) -> Decimal {
        self.epsilon * Decimal::from(participants)
    }
}

/// Sum amounts, failing with `AmountOverflow` instead of panicking when the
/// total leaves the `Decimal` range.
pub fn checked_sum<I>(amounts: I) -> Result<Decimal, SettlementError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or(SettlementError::AmountOverflow)
    })
}

/// Money goes over the wire as a plain JSON number.
pub(crate) fn serialize_money<S: Serializer>(
    amount: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    rust_decimal::serde::float::serialize(amount, serializer)
}
