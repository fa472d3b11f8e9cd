use crate::core::error::SettlementError;
use crate::core::expense::ExpenseRecord;
use crate::core::money::MoneyPolicy;
use rust_decimal::Decimal;
use serde::Serialize;

/// Label used for expenses logged without a category.
pub const UNCATEGORIZED: &str = "Other";

/// Canonical display form of a free-text category.
///
/// Trims, then capitalizes the first character and lowercases the rest, so
/// `"  FOOD "`, `"food"` and `"Food"` all group together.
///
/// ```
/// use trip_settlement::analysis::category::normalize_category;
///
/// assert_eq!(normalize_category("  hOTEL "), "Hotel");
/// assert_eq!(normalize_category(""), "Other");
/// ```
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => UNCATEGORIZED.to_string(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Spend within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

impl CategoryTotal {
    /// This category's share of `grand_total`, in percent (0 when nothing was spent).
    pub fn share_percent(&self, grand_total: Decimal) -> f64 {
        if grand_total == Decimal::ZERO {
            return 0.0;
        }
        let pct = MoneyPolicy::default().round(self.amount / grand_total * Decimal::ONE_HUNDRED);
        pct.to_string().parse::<f64>().unwrap_or(0.0)
    }
}

/// Per-category spend for a trip, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    totals: Vec<CategoryTotal>,
    grand_total: Decimal,
}

impl CategoryBreakdown {
    /// Group expenses by normalized category.
    ///
    /// Fails with `AmountOverflow` when a total leaves the `Decimal` range.
    pub fn from_expenses(expenses: &[ExpenseRecord]) -> Result<Self, SettlementError> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut grand_total = Decimal::ZERO;

        for expense in expenses {
            let category = normalize_category(expense.category().unwrap_or(""));
            match totals.iter_mut().find(|t| t.category == category) {
                Some(total) => {
                    total.amount = total
                        .amount
                        .checked_add(expense.amount())
                        .ok_or(SettlementError::AmountOverflow)?;
                    total.count += 1;
                }
                None => totals.push(CategoryTotal {
                    category,
                    amount: expense.amount(),
                    count: 1,
                }),
            }
            grand_total = grand_total
                .checked_add(expense.amount())
                .ok_or(SettlementError::AmountOverflow)?;
        }

        Ok(Self { totals, grand_total })
    }

    pub fn totals(&self) -> &[CategoryTotal] {
        &self.totals
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        let key = normalize_category(category);
        self.totals.iter().find(|t| t.category == key)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The category with the largest spend; earliest wins ties.
    pub fn top(&self) -> Option<&CategoryTotal> {
        self.totals
            .iter()
            .fold(None, |best: Option<&CategoryTotal>, t| match best {
                Some(b) if b.amount >= t.amount => Some(b),
                _ => Some(t),
            })
    }
}

impl std::fmt::Display for CategoryBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Spend by Category ===")?;
        if self.totals.is_empty() {
            writeln!(f, "  No expenses recorded.")?;
        }
        for t in &self.totals {
            writeln!(
                f,
                "  {:<16} {:>10.2}  ({:.1}%)",
                t.category,
                t.amount,
                t.share_percent(self.grand_total)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::TripId;
    use crate::core::participant::ParticipantId;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn expense(category: Option<&str>, amount: Decimal) -> ExpenseRecord {
        let record = ExpenseRecord::new(TripId::new("t1"), ParticipantId::new("a"), amount);
        match category {
            Some(c) => record.with_category(c),
            None => record,
        }
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("FOOD"), "Food");
        assert_eq!(normalize_category("  travel  "), "Travel");
        assert_eq!(normalize_category("   "), UNCATEGORIZED);
        assert_eq!(normalize_category("éTÉ"), "Été");
    }

    #[test]
    fn test_groups_case_insensitively() {
        let breakdown = CategoryBreakdown::from_expenses(&[
            expense(Some("Food"), dec!(20)),
            expense(Some("TRAVEL"), dec!(50)),
            expense(Some(" food "), dec!(10)),
        ])
        .unwrap();

        let labels: Vec<&str> = breakdown.totals().iter().map(|t| t.category.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Travel"]);
        assert_eq!(breakdown.get("food").unwrap().amount, dec!(30));
        assert_eq!(breakdown.get("food").unwrap().count, 2);
        assert_eq!(breakdown.grand_total(), dec!(80));
    }

    #[test]
    fn test_missing_category_goes_to_other() {
        let breakdown = CategoryBreakdown::from_expenses(&[expense(None, dec!(5))]).unwrap();
        assert_eq!(breakdown.totals()[0].category, UNCATEGORIZED);
    }

    #[test]
    fn test_share_percent() {
        let breakdown = CategoryBreakdown::from_expenses(&[
            expense(Some("Food"), dec!(1)),
            expense(Some("Hotel"), dec!(2)),
        ])
        .unwrap();
        let food = breakdown.get("Food").unwrap();
        assert_relative_eq!(food.share_percent(breakdown.grand_total()), 33.33);
        assert_relative_eq!(food.share_percent(Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_top_category() {
        let breakdown = CategoryBreakdown::from_expenses(&[
            expense(Some("Food"), dec!(40)),
            expense(Some("Hotel"), dec!(40)),
            expense(Some("Fuel"), dec!(10)),
        ])
        .unwrap();
        assert_eq!(breakdown.top().unwrap().category, "Food");
        assert!(CategoryBreakdown::default().top().is_none());
    }

    #[test]
    fn test_overflowing_totals_are_an_error() {
        let result = CategoryBreakdown::from_expenses(&[
            expense(Some("Hotel"), Decimal::MAX),
            expense(Some("Food"), Decimal::ONE),
        ]);
        assert_eq!(result.unwrap_err(), SettlementError::AmountOverflow);
    }

    #[test]
    fn test_share_percent_of_huge_amounts() {
        let breakdown = CategoryBreakdown::from_expenses(&[
            expense(Some("Hotel"), Decimal::MAX - Decimal::ONE),
            expense(Some("Food"), Decimal::ONE),
        ])
        .unwrap();
        let hotel = breakdown.get("Hotel").unwrap();
        assert_relative_eq!(hotel.share_percent(breakdown.grand_total()), 100.0);
    }
}
