//! Basic trip settlement example.
//!
//! Three friends share a weekend trip; one books the cabin, one buys food,
//! one pays for nothing. The engine works out who owes whom.

use rust_decimal_macros::dec;
use trip_settlement::analysis::category::CategoryBreakdown;
use trip_settlement::core::expense::{ExpenseRecord, TripId};
use trip_settlement::core::participant::{Participant, ParticipantId, Roster};
use trip_settlement::core::snapshot::TripSnapshot;
use trip_settlement::settlement::report::SettlementEngine;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  trip-settlement: Basic Weekend Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    let trip = TripId::new("lake-weekend");
    let roster = Roster::new(vec![
        Participant::new("u1", "Asha"),
        Participant::new("u2", "Ben"),
        Participant::new("u3", "Chen"),
    ])
    .expect("roster ids are unique");

    let expenses = vec![
        ExpenseRecord::new(trip.clone(), ParticipantId::new("u1"), dec!(240))
            .with_category("Hotel")
            .with_description("Cabin, two nights"),
        ExpenseRecord::new(trip.clone(), ParticipantId::new("u2"), dec!(84.60))
            .with_category("food"),
        ExpenseRecord::new(trip.clone(), ParticipantId::new("u2"), dec!(15.40))
            .with_category("FOOD"),
    ];

    println!("Expenses:");
    for e in &expenses {
        println!(
            "  {:<4} paid {:>8}  {}",
            e.payer(),
            e.amount(),
            e.description().unwrap_or("")
        );
    }
    println!();

    let snapshot = TripSnapshot::new(trip, roster, expenses);
    let result = SettlementEngine::new()
        .settle(&snapshot)
        .expect("snapshot is valid");

    println!("{}", result);
    let breakdown = CategoryBreakdown::from_expenses(snapshot.expenses()).expect("amounts are small");
    println!("{}", breakdown);

    println!(
        "JSON response:\n{}",
        serde_json::to_string_pretty(&result).expect("result serializes")
    );
}
