use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use trip_settlement::core::expense::{ExpenseRecord, TripId};
use trip_settlement::core::money::{MatchOrder, MoneyPolicy};
use trip_settlement::core::participant::{Participant, ParticipantId, Roster};
use trip_settlement::core::snapshot::TripSnapshot;
use trip_settlement::settlement::report::SettlementEngine;

const IDS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

/// Generate a random expense amount in cents (0.00 to 5,000.00).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate a random trip: 1..=8 participants, 0..40 expenses paid by them.
fn arb_trip() -> impl Strategy<Value = TripSnapshot> {
    (1usize..=IDS.len()).prop_flat_map(|n| {
        prop::collection::vec((0..n, arb_amount()), 0..40).prop_map(move |rows| {
            let trip_id = TripId::new("prop");
            let roster = Roster::new(
                IDS[..n]
                    .iter()
                    .map(|id| Participant::new(*id, id.to_uppercase()))
                    .collect(),
            )
            .unwrap();
            let expenses = rows
                .into_iter()
                .map(|(payer, amount)| {
                    ExpenseRecord::new(trip_id.clone(), ParticipantId::new(IDS[payer]), amount)
                })
                .collect();
            TripSnapshot::new(trip_id, roster, expenses)
        })
    })
}

fn arb_order() -> impl Strategy<Value = MatchOrder> {
    prop::sample::select(vec![MatchOrder::Roster, MatchOrder::LargestFirst])
}

fn engine(order: MatchOrder) -> SettlementEngine {
    SettlementEngine::with_policy(MoneyPolicy::default().with_match_order(order))
}

proptest! {
    // ===================================================================
    // Zero-sum: rounded balances sum to zero within n * 0.01.
    // ===================================================================
    #[test]
    fn balances_sum_to_zero(trip in arb_trip()) {
        let result = SettlementEngine::new().settle(&trip).unwrap();
        let sum: Decimal = result.balances().iter().map(|b| b.net).sum();
        let tolerance = MoneyPolicy::default().zero_sum_tolerance(trip.roster().len());
        prop_assert!(
            sum.abs() <= tolerance,
            "balance sum {} exceeds tolerance {}",
            sum,
            tolerance
        );
    }

    // ===================================================================
    // Conservation: money moved equals total surplus, up to rounding.
    // ===================================================================
    #[test]
    fn transfers_conserve_surplus(trip in arb_trip(), order in arb_order()) {
        let result = engine(order).settle(&trip).unwrap();
        let surplus: Decimal = result
            .balances()
            .iter()
            .map(|b| b.net.max(Decimal::ZERO))
            .sum();
        let moved = result.total_transferred();
        let tolerance = MoneyPolicy::default().zero_sum_tolerance(trip.roster().len());
        prop_assert!(
            (surplus - moved).abs() <= tolerance,
            "moved {} but surplus is {}",
            moved,
            surplus
        );
    }

    // ===================================================================
    // Per-participant: nobody pays or receives more than their balance.
    // ===================================================================
    #[test]
    fn transfers_never_overshoot_a_balance(trip in arb_trip(), order in arb_order()) {
        let result = engine(order).settle(&trip).unwrap();
        let mut flow: HashMap<&ParticipantId, Decimal> = HashMap::new();
        for t in result.transfers() {
            *flow.entry(&t.from_id).or_insert(Decimal::ZERO) -= t.amount;
            *flow.entry(&t.to_id).or_insert(Decimal::ZERO) += t.amount;
        }
        for b in result.balances() {
            let settled = flow.get(&b.id).copied().unwrap_or(Decimal::ZERO);
            // Debtors pay out at most what they owe; creditors receive at most what they are owed.
            prop_assert!(settled.abs() <= b.net.abs(), "{} settled {} of {}", b.id, settled, b.net);
            prop_assert!(settled.is_zero() || settled.is_sign_negative() == b.is_debtor());
        }
    }

    // ===================================================================
    // Boundedness: at most creditors + debtors - 1 transfers.
    // ===================================================================
    #[test]
    fn transfer_count_is_bounded(trip in arb_trip(), order in arb_order()) {
        let result = engine(order).settle(&trip).unwrap();
        let creditors = result.balances().iter().filter(|b| b.is_creditor()).count();
        let debtors = result.balances().iter().filter(|b| b.is_debtor()).count();
        let bound = (creditors + debtors).saturating_sub(1);
        prop_assert!(
            result.transfers().len() <= bound,
            "{} transfers for {} creditors and {} debtors",
            result.transfers().len(),
            creditors,
            debtors
        );
    }

    // ===================================================================
    // Idempotence: identical snapshots give byte-identical output.
    // ===================================================================
    #[test]
    fn settlement_is_deterministic(trip in arb_trip()) {
        let first = serde_json::to_string(&SettlementEngine::new().settle(&trip).unwrap()).unwrap();
        let second = serde_json::to_string(&SettlementEngine::new().settle(&trip).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // No self-payment, and no zero or negative transfers.
    // ===================================================================
    #[test]
    fn transfers_are_between_distinct_people(trip in arb_trip(), order in arb_order()) {
        let result = engine(order).settle(&trip).unwrap();
        for t in result.transfers() {
            prop_assert_ne!(&t.from_id, &t.to_id);
            prop_assert!(t.amount > Decimal::ZERO);
        }
    }

    // ===================================================================
    // Grand total equals the exact sum of expense amounts.
    // ===================================================================
    #[test]
    fn total_matches_expense_sum(trip in arb_trip()) {
        let result = SettlementEngine::new().settle(&trip).unwrap();
        let manual: Decimal = trip.expenses().iter().map(|e| e.amount()).sum();
        prop_assert_eq!(result.total_expense(), manual);
    }
}
