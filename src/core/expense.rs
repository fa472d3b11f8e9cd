use crate::core::error::SettlementError;
use crate::core::participant::ParticipantId;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One logged expense: `payer` paid `amount` on behalf of the whole trip.
///
/// Records are a read-only snapshot handed over by the expense log. The
/// amount is not validated on construction; the ledger aggregator rejects
/// negative amounts before summing anything.
///
/// # Examples
///
/// ```
/// use trip_settlement::core::expense::{ExpenseRecord, TripId};
/// use trip_settlement::core::participant::ParticipantId;
/// use rust_decimal_macros::dec;
///
/// let dinner = ExpenseRecord::new(TripId::new("goa-2024"), ParticipantId::new("u-1"), dec!(84.50))
///     .with_category("Food")
///     .with_description("Beach shack dinner");
///
/// assert_eq!(dinner.amount(), dec!(84.50));
/// assert_eq!(dinner.category(), Some("Food"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    trip_id: TripId,
    payer: ParticipantId,
    amount: Decimal,
    category: Option<String>,
    description: Option<String>,
}

impl ExpenseRecord {
    pub fn new(trip_id: TripId, payer: ParticipantId, amount: Decimal) -> Self {
        Self {
            trip_id,
            payer,
            amount,
            category: None,
            description: None,
        }
    }

    /// Create a record from a floating-point wire amount.
    ///
    /// NaN and infinities have no decimal representation and are rejected.
    pub fn from_f64(
        trip_id: TripId,
        payer: ParticipantId,
        amount: f64,
    ) -> Result<Self, SettlementError> {
        let decimal = if amount.is_finite() {
            Decimal::from_f64(amount)
        } else {
            None
        };
        match decimal {
            Some(value) => Ok(Self::new(trip_id, payer, value)),
            None => Err(SettlementError::InvalidAmount {
                payer,
                amount: amount.to_string(),
            }),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // --- Accessors ---

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn payer(&self) -> &ParticipantId {
        &self.payer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fails with `InvalidAmount` if the amount is negative.
    pub fn validate(&self) -> Result<(), SettlementError> {
        if self.amount < Decimal::ZERO {
            return Err(SettlementError::InvalidAmount {
                payer: self.payer.clone(),
                amount: self.amount.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(amount: Decimal) -> ExpenseRecord {
        ExpenseRecord::new(TripId::new("t1"), ParticipantId::new("a"), amount)
    }

    #[test]
    fn test_expense_creation() {
        let ex = record(dec!(12.34)).with_category("Travel");
        assert_eq!(ex.trip_id().as_str(), "t1");
        assert_eq!(ex.payer().as_str(), "a");
        assert_eq!(ex.amount(), dec!(12.34));
        assert_eq!(ex.category(), Some("Travel"));
        assert_eq!(ex.description(), None);
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(record(Decimal::ZERO).validate().is_ok());
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let err = record(dec!(-5)).validate().unwrap_err();
        assert!(matches!(err, SettlementError::InvalidAmount { .. }));
    }

    #[test]
    fn test_from_f64_keeps_short_representation() {
        let ex = ExpenseRecord::from_f64(TripId::new("t1"), ParticipantId::new("a"), 0.1).unwrap();
        assert_eq!(ex.amount(), dec!(0.1));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = ExpenseRecord::from_f64(TripId::new("t1"), ParticipantId::new("a"), bad);
            assert!(matches!(result, Err(SettlementError::InvalidAmount { .. })));
        }
    }
}
