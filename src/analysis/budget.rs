use crate::core::error::SettlementError;
use crate::core::money::MoneyPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// How close a trip is to its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetAlert {
    None,
    /// At least 75% used.
    Caution,
    /// At least 90% used.
    Warning,
    /// 100% or more used.
    Exceeded,
}

impl BudgetAlert {
    fn from_percent(percent: Decimal) -> Self {
        if percent >= dec!(100) {
            BudgetAlert::Exceeded
        } else if percent >= dec!(90) {
            BudgetAlert::Warning
        } else if percent >= dec!(75) {
            BudgetAlert::Caution
        } else {
            BudgetAlert::None
        }
    }
}

impl fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetAlert::None => write!(f, "within budget"),
            BudgetAlert::Caution => write!(f, "caution: 75% of the budget is used"),
            BudgetAlert::Warning => write!(f, "warning: 90% of the budget is used"),
            BudgetAlert::Exceeded => write!(f, "budget exceeded"),
        }
    }
}

/// Spend against a trip budget.
///
/// `remaining` never goes below zero and `percent_used` is capped at 100;
/// the alert is computed from the uncapped percentage.
///
/// # Examples
///
/// ```
/// use trip_settlement::analysis::budget::{BudgetAlert, BudgetStatus};
/// use rust_decimal_macros::dec;
///
/// let status = BudgetStatus::evaluate(dec!(1000), dec!(920)).unwrap();
/// assert_eq!(status.remaining, dec!(80));
/// assert_eq!(status.alert, BudgetAlert::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub alert: BudgetAlert,
}

impl BudgetStatus {
    pub fn evaluate(budget: Decimal, total_spent: Decimal) -> Result<Self, SettlementError> {
        if budget <= Decimal::ZERO {
            return Err(SettlementError::InvalidBudget { budget });
        }

        // Out of range only for extreme ratios, which sit far past any threshold.
        let percent = total_spent
            .checked_div(budget)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(if total_spent.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            });
        let remaining = budget
            .checked_sub(total_spent)
            .ok_or(SettlementError::AmountOverflow)?
            .max(Decimal::ZERO);

        Ok(Self {
            budget,
            total_spent,
            remaining,
            percent_used: MoneyPolicy::default().round(percent).min(dec!(100)),
            alert: BudgetAlert::from_percent(percent),
        })
    }

    pub fn is_over_budget(&self) -> bool {
        self.total_spent > self.budget
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Budget ===")?;
        writeln!(f, "Budget:     {:.2}", self.budget)?;
        writeln!(f, "Spent:      {:.2}", self.total_spent)?;
        writeln!(f, "Remaining:  {:.2}", self.remaining)?;
        writeln!(f, "Used:       {:.2}%", self.percent_used)?;
        writeln!(f, "Status:     {}", self.alert)
    }
}
