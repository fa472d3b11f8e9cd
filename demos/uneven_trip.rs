//! Roster order versus largest-first matching.
//!
//! The greedy simplifier walks creditors and debtors in roster order by
//! default. This example settles the same randomly generated trip both ways
//! and compares the payment plans.

use rust_decimal_macros::dec;
use trip_settlement::analysis::budget::BudgetStatus;
use trip_settlement::core::money::{MatchOrder, MoneyPolicy};
use trip_settlement::settlement::report::SettlementEngine;
use trip_settlement::simulation::trip_generator::{generate_random_trip, TripConfig};

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  trip-settlement: Matching Order Comparison   ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let config = TripConfig {
        participant_count: 9,
        expenses_per_participant: 2,
        seed: Some(2024),
        ..Default::default()
    };
    let trip = generate_random_trip(&config);

    for order in [MatchOrder::Roster, MatchOrder::LargestFirst] {
        let engine = SettlementEngine::with_policy(MoneyPolicy::default().with_match_order(order));
        let result = engine.settle(&trip).expect("generated trip is valid");

        println!("━━━ Order: {} ━━━\n", order);
        for t in result.transfers() {
            println!("  {:<8} → {:<8} {:>10.2}", t.from, t.to, t.amount);
        }
        println!(
            "\n  {} transfers moving {:.2} in total\n",
            result.transfers().len(),
            result.total_transferred()
        );
    }

    let spent = trip.total_spent().expect("generated amounts are small");
    match BudgetStatus::evaluate(dec!(12000), spent) {
        Ok(status) => println!("{}", status),
        Err(e) => eprintln!("budget: {}", e),
    }
}
