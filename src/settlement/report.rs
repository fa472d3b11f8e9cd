use crate::core::error::SettlementError;
use crate::core::money::{serialize_money, MoneyPolicy};
use crate::core::snapshot::{SettlementRequest, TripSnapshot};
use crate::settlement::balance::{Balance, BalanceSheet};
use crate::settlement::ledger::PaidLedger;
use crate::settlement::simplifier::{DebtSimplifier, Transfer};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of settling one trip.
///
/// Every amount is rounded to the policy scale for display. Serializes to
/// the JSON response shape:
///
/// ```json
/// {
///   "totalExpense": 90.0,
///   "averageShare": 30.0,
///   "balances": [{ "id": "a", "name": "Alice", "paid": 90.0, "balance": 60.0 }],
///   "transfers": [{ "from": "Bob", "to": "Alice", "amount": 30.0 }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    #[serde(serialize_with = "serialize_money")]
    total_expense: Decimal,
    #[serde(serialize_with = "serialize_money")]
    average_share: Decimal,
    balances: Vec<Balance>,
    transfers: Vec<Transfer>,
}

impl SettlementResult {
    /// Assemble the report from the pipeline outputs.
    pub fn build(sheet: BalanceSheet, transfers: Vec<Transfer>, policy: &MoneyPolicy) -> Self {
        let total_expense = policy.round(sheet.grand_total());
        let average_share = policy.round(sheet.fair_share());
        let balances = sheet
            .into_balances()
            .into_iter()
            .map(|b| Balance {
                paid: policy.round(b.paid),
                net: policy.round(b.net),
                ..b
            })
            .collect();
        let transfers = transfers
            .into_iter()
            .map(|t| Transfer {
                amount: policy.round(t.amount),
                ..t
            })
            .collect();

        Self {
            total_expense,
            average_share,
            balances,
            transfers,
        }
    }

    pub fn total_expense(&self) -> Decimal {
        self.total_expense
    }

    pub fn average_share(&self) -> Decimal {
        self.average_share
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// True when nobody needs to pay anybody.
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Sum of all transfer amounts.
    pub fn total_transferred(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Whether the reported balances sum to zero within rounding tolerance.
    pub fn is_balanced(&self, policy: &MoneyPolicy) -> bool {
        let sum: Decimal = self.balances.iter().map(|b| b.net).sum();
        sum.abs() <= policy.zero_sum_tolerance(self.balances.len())
    }
}

/// The settlement pipeline: aggregate, balance, simplify, report.
///
/// Holds only its [`MoneyPolicy`]; every call recomputes from the snapshot,
/// so one engine can serve concurrent callers.
///
/// # Examples
///
/// ```
/// use trip_settlement::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let trip = TripId::new("lisbon");
/// let roster = Roster::new(vec![
///     Participant::new("a", "Alice"),
///     Participant::new("b", "Bob"),
/// ]).unwrap();
/// let expenses = vec![ExpenseRecord::new(trip.clone(), ParticipantId::new("a"), dec!(50))];
///
/// let result = SettlementEngine::new()
///     .settle(&TripSnapshot::new(trip, roster, expenses))
///     .unwrap();
///
/// assert_eq!(result.average_share(), dec!(25));
/// assert_eq!(result.transfers()[0].from, "Bob");
/// assert_eq!(result.transfers()[0].amount, dec!(25));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    policy: MoneyPolicy,
}

impl SettlementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MoneyPolicy) -> Self {
        Self { policy }
    }

    /// Settle one trip snapshot.
    ///
    /// Returns a complete result or the first error; nothing partial.
    pub fn settle(&self, snapshot: &TripSnapshot) -> Result<SettlementResult, SettlementError> {
        if snapshot.roster().is_empty() {
            return Err(SettlementError::EmptyRoster);
        }

        let ledger = PaidLedger::aggregate(snapshot.trip_id(), snapshot.roster(), snapshot.expenses())?;
        let sheet = BalanceSheet::compute(snapshot.roster(), &ledger, &self.policy)?;
        let transfers = DebtSimplifier::simplify(sheet.balances(), &self.policy);

        debug!(
            "settled trip {}: total {}, {} transfers",
            snapshot.trip_id(),
            sheet.grand_total(),
            transfers.len()
        );

        Ok(SettlementResult::build(sheet, transfers, &self.policy))
    }

    /// Convert a wire request and settle it.
    pub fn settle_request(
        &self,
        request: SettlementRequest,
    ) -> Result<SettlementResult, SettlementError> {
        // An empty roster outranks any problem with the expense rows.
        if request.participants.is_empty() {
            return Err(SettlementError::EmptyRoster);
        }
        self.settle(&request.into_snapshot()?)
    }
}

impl std::fmt::Display for SettlementResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Settlement Summary ===")?;
        writeln!(f, "Total Expense:  {:.2}", self.total_expense)?;
        writeln!(f, "Average Share:  {:.2} per person", self.average_share)?;

        writeln!(f, "\n--- Balances ---")?;
        for b in &self.balances {
            writeln!(f, "  {:<20} paid {:>10.2}  balance {:>10.2}", b.name, b.paid, b.net)?;
        }

        writeln!(f, "\n--- Suggested Payments ---")?;
        if self.transfers.is_empty() {
            writeln!(f, "  All balances are settled!")?;
        }
        for t in &self.transfers {
            writeln!(f, "  {} pays {} {:.2}", t.from, t.to, t.amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::{ExpenseRecord, TripId};
    use crate::core::participant::{Participant, ParticipantId, Roster};
    use rust_decimal_macros::dec;

    fn snapshot(ids: &[&str], expenses: &[(&str, Decimal)]) -> TripSnapshot {
        let trip = TripId::new("t1");
        let roster =
            Roster::new(ids.iter().map(|id| Participant::new(*id, id.to_uppercase())).collect())
                .unwrap();
        let records = expenses
            .iter()
            .map(|(payer, amount)| ExpenseRecord::new(trip.clone(), ParticipantId::new(*payer), *amount))
            .collect();
        TripSnapshot::new(trip, roster, records)
    }

    #[test]
    fn test_settle_single_payer() {
        let result = SettlementEngine::new()
            .settle(&snapshot(&["a", "b", "c"], &[("a", dec!(90))]))
            .unwrap();

        assert_eq!(result.total_expense(), dec!(90));
        assert_eq!(result.average_share(), dec!(30));
        assert_eq!(result.transfers().len(), 2);
        assert_eq!(result.total_transferred(), dec!(60));
        assert!(result.is_balanced(&MoneyPolicy::default()));
        assert!(!result.is_settled());
    }

    #[test]
    fn test_display_rounds_average_share() {
        let result = SettlementEngine::new()
            .settle(&snapshot(&["a", "b", "c"], &[("a", dec!(100))]))
            .unwrap();
        assert_eq!(result.average_share(), dec!(33.33));
        assert_eq!(result.total_expense(), dec!(100));
    }

    #[test]
    fn test_paid_rounded_for_display() {
        let result = SettlementEngine::new()
            .settle(&snapshot(&["a", "b"], &[("a", dec!(10.005))]))
            .unwrap();
        assert_eq!(result.balances()[0].paid, dec!(10.01));
    }

    #[test]
    fn test_empty_roster_fails_before_aggregation() {
        let result = SettlementEngine::new().settle(&snapshot(&[], &[("z", dec!(10))]));
        assert_eq!(result.unwrap_err(), SettlementError::EmptyRoster);
    }

    #[test]
    fn test_settled_text_output() {
        let result = SettlementEngine::new()
            .settle(&snapshot(&["a", "b"], &[]))
            .unwrap();
        let text = result.to_string();
        assert!(text.contains("All balances are settled!"));
        assert!(text.contains("Total Expense:  0.00"));
    }

    #[test]
    fn test_serializes_response_shape() {
        let result = SettlementEngine::new()
            .settle(&snapshot(&["a", "b"], &[("a", dec!(20))]))
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["totalExpense"], 20.0);
        assert_eq!(json["averageShare"], 10.0);
        assert_eq!(json["balances"][1]["id"], "b");
        assert_eq!(json["balances"][1]["balance"], -10.0);
        assert_eq!(json["transfers"][0]["from"], "B");
        assert_eq!(json["transfers"][0]["to"], "A");
        assert_eq!(json["transfers"][0]["amount"], 10.0);
        assert!(json["transfers"][0].get("from_id").is_none());
    }

    #[test]
    fn test_request_with_empty_roster_reports_empty_roster() {
        let request = SettlementRequest {
            trip_id: "t1".to_string(),
            participants: Vec::new(),
            expenses: vec![crate::core::snapshot::ExpenseInput {
                payer_id: "z".to_string(),
                amount: f64::NAN,
                category: None,
                description: None,
            }],
        };
        assert_eq!(
            SettlementEngine::new().settle_request(request).unwrap_err(),
            SettlementError::EmptyRoster
        );
    }
}
