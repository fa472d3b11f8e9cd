use crate::core::error::SettlementError;
use crate::core::expense::{ExpenseRecord, TripId};
use crate::core::participant::{ParticipantId, Roster};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// How much each participant paid, and the trip's grand total.
///
/// Built once by [`PaidLedger::aggregate`] and never mutated afterwards.
/// Every roster member has an entry, defaulting to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaidLedger {
    paid: HashMap<ParticipantId, Decimal>,
    grand_total: Decimal,
}

impl PaidLedger {
    /// Sum a trip's expense records per payer.
    ///
    /// All records are validated before anything is summed: a record from
    /// another trip, a negative amount, or a payer missing from the roster
    /// fails the whole aggregation. Amounts are summed exactly as supplied;
    /// no rounding happens here. Totals beyond the `Decimal` range fail with
    /// `AmountOverflow`.
    pub fn aggregate(
        trip_id: &TripId,
        roster: &Roster,
        expenses: &[ExpenseRecord],
    ) -> Result<Self, SettlementError> {
        for expense in expenses {
            if expense.trip_id() != trip_id {
                return Err(SettlementError::ForeignExpense {
                    expected: trip_id.clone(),
                    found: expense.trip_id().clone(),
                });
            }
            expense.validate()?;
            if !roster.contains(expense.payer()) {
                return Err(SettlementError::UnknownPayer {
                    payer: expense.payer().clone(),
                });
            }
        }

        let mut paid: HashMap<ParticipantId, Decimal> = roster
            .iter()
            .map(|p| (p.id.clone(), Decimal::ZERO))
            .collect();
        let mut grand_total = Decimal::ZERO;

        for expense in expenses {
            let entry = paid.entry(expense.payer().clone()).or_insert(Decimal::ZERO);
            *entry = entry
                .checked_add(expense.amount())
                .ok_or(SettlementError::AmountOverflow)?;
            grand_total = grand_total
                .checked_add(expense.amount())
                .ok_or(SettlementError::AmountOverflow)?;
        }

        debug!(
            "aggregated {} expenses for trip {} across {} participants: total {}",
            expenses.len(),
            trip_id,
            roster.len(),
            grand_total
        );

        Ok(Self { paid, grand_total })
    }

    /// Total paid by `participant`; zero for ids outside the roster.
    pub fn paid(&self, participant: &ParticipantId) -> Decimal {
        self.paid.get(participant).copied().unwrap_or(Decimal::ZERO)
    }

    /// Sum of every expense amount.
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn all_paid(&self) -> &HashMap<ParticipantId, Decimal> {
        &self.paid
    }

    pub fn len(&self) -> usize {
        self.paid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paid.is_empty()
    }
}
