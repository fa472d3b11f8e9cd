use crate::core::expense::TripId;
use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a settlement computation.
///
/// The engine is pure: retrying with the same snapshot reproduces the same
/// error, so every variant is reported straight to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    #[error("cannot settle a trip with no participants")]
    EmptyRoster,

    #[error("expense paid by unknown participant '{payer}'")]
    UnknownPayer { payer: ParticipantId },

    #[error("invalid expense amount {amount} paid by '{payer}': must be finite and non-negative")]
    InvalidAmount { payer: ParticipantId, amount: String },

    #[error("participant '{id}' appears more than once in the roster")]
    DuplicateParticipant { id: ParticipantId },

    #[error("expense belongs to trip '{found}', expected trip '{expected}'")]
    ForeignExpense { expected: TripId, found: TripId },

    #[error("expense amounts add up beyond the representable range")]
    AmountOverflow,

    #[error("budget must be positive, got {budget}")]
    InvalidBudget { budget: Decimal },
}

impl SettlementError {
    /// Whether the failure stems from the caller's request (4xx-equivalent)
    /// rather than from inconsistent stored data.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            SettlementError::UnknownPayer { .. } | SettlementError::ForeignExpense { .. }
        )
    }
}
