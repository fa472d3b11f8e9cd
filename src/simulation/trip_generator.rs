//! Random trip generation for benchmarks and demos.
//!
//! Produces rosters with randomly distributed expenses so the settlement
//! pipeline can be exercised at sizes no hand-written fixture covers.

use crate::core::expense::{ExpenseRecord, TripId};
use crate::core::participant::{Participant, ParticipantId, Roster};
use crate::core::snapshot::{ExpenseInput, ParticipantInput, SettlementRequest, TripSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const NAMES: [&str; 12] = [
    "Asha", "Ben", "Chen", "Dara", "Eli", "Farah", "Gio", "Hana", "Ivan", "Jo", "Kofi", "Lena",
];

const CATEGORIES: [&str; 6] = ["Food", "Travel", "Hotel", "Fuel", "Tickets", "Shopping"];

/// Configuration for generating a random trip.
#[derive(Debug, Clone)]
pub struct TripConfig {
    pub trip_id: TripId,
    pub participant_count: usize,
    /// Average number of expenses logged per participant.
    pub expenses_per_participant: usize,
    /// Smallest expense, in minor units (cents).
    pub min_cents: i64,
    /// Largest expense, in minor units (cents).
    pub max_cents: i64,
    /// Fixed seed for reproducible trips; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            trip_id: TripId::new("generated"),
            participant_count: 6,
            expenses_per_participant: 3,
            min_cents: 100,
            max_cents: 50_000,
            seed: None,
        }
    }
}

fn participant_name(index: usize) -> String {
    let base = NAMES[index % NAMES.len()];
    match index / NAMES.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Generate a random trip snapshot.
///
/// Payers are drawn uniformly from the roster, so some participants may
/// pay nothing at all. Amounts are whole cents.
pub fn generate_random_trip(config: &TripConfig) -> TripSnapshot {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let participants: Vec<Participant> = (0..config.participant_count)
        .map(|i| Participant::new(ParticipantId::new(format!("P-{:03}", i)), participant_name(i)))
        .collect();

    let total_expenses = config.participant_count * config.expenses_per_participant;
    let low = config.min_cents.max(0);
    let high = config.max_cents.max(low);

    let mut expenses = Vec::with_capacity(total_expenses);
    if !participants.is_empty() {
        for _ in 0..total_expenses {
            let payer = &participants[rng.gen_range(0..participants.len())];
            let cents = rng.gen_range(low..=high);
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            expenses.push(
                ExpenseRecord::new(config.trip_id.clone(), payer.id.clone(), Decimal::new(cents, 2))
                    .with_category(category),
            );
        }
    }

    // Ids are generated unique, so the roster cannot be rejected.
    let roster = Roster::new(participants).unwrap_or_default();
    TripSnapshot::new(config.trip_id.clone(), roster, expenses)
}

/// Generate a random trip in its JSON request form.
pub fn generate_random_request(config: &TripConfig) -> SettlementRequest {
    let snapshot = generate_random_trip(config);
    SettlementRequest {
        trip_id: snapshot.trip_id().to_string(),
        participants: snapshot
            .roster()
            .iter()
            .map(|p| ParticipantInput {
                id: p.id.to_string(),
                name: p.name.clone(),
            })
            .collect(),
        expenses: snapshot
            .expenses()
            .iter()
            .map(|e| ExpenseInput {
                payer_id: e.payer().to_string(),
                amount: e.amount().to_f64().unwrap_or(0.0),
                category: e.category().map(str::to_string),
                description: None,
            })
            .collect(),
    }
}
