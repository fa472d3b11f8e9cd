use crate::core::error::SettlementError;
use crate::core::expense::{ExpenseRecord, TripId};
use crate::core::money::checked_sum;
use crate::core::participant::{Participant, ParticipantId, Roster};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the engine needs for one trip: roster plus expense log.
///
/// Snapshots are fetched by the caller before settlement starts; the engine
/// only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSnapshot {
    trip_id: TripId,
    roster: Roster,
    expenses: Vec<ExpenseRecord>,
}

impl TripSnapshot {
    pub fn new(trip_id: TripId, roster: Roster, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            trip_id,
            roster,
            expenses,
        }
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Sum of every expense amount on the trip.
    pub fn total_spent(&self) -> Result<Decimal, SettlementError> {
        checked_sum(self.expenses.iter().map(|e| e.amount()))
    }
}

fn default_trip_id() -> String {
    "trip".to_string()
}

/// Wire form of a participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantInput {
    pub id: String,
    pub name: String,
}

/// Wire form of an expense row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub payer_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// JSON request accepted by the settlement handler.
///
/// ```json
/// {
///   "participants": [{ "id": "a", "name": "Alice" }],
///   "expenses": [{ "payer_id": "a", "amount": 90 }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    #[serde(default = "default_trip_id")]
    pub trip_id: String,
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub expenses: Vec<ExpenseInput>,
}

impl SettlementRequest {
    /// Validate identities and amounts and build the engine input.
    pub fn into_snapshot(self) -> Result<TripSnapshot, SettlementError> {
        let trip_id = TripId::new(self.trip_id);
        let roster = Roster::new(
            self.participants
                .into_iter()
                .map(|p| Participant::new(p.id, p.name))
                .collect(),
        )?;

        let expenses = self
            .expenses
            .into_iter()
            .map(|e| {
                let mut record =
                    ExpenseRecord::from_f64(trip_id.clone(), ParticipantId::new(e.payer_id), e.amount)?;
                if let Some(category) = e.category {
                    record = record.with_category(category);
                }
                if let Some(description) = e.description {
                    record = record.with_description(description);
                }
                Ok(record)
            })
            .collect::<Result<Vec<_>, SettlementError>>()?;

        Ok(TripSnapshot::new(trip_id, roster, expenses))
    }
}
