use crate::core::money::{serialize_money, MatchOrder, MoneyPolicy};
use crate::core::participant::ParticipantId;
use crate::settlement::balance::Balance;
use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A single settle-up payment: `from` pays `to` the given `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from_id: ParticipantId,
    pub from: String,
    pub to_id: ParticipantId,
    pub to: String,
    pub amount: Decimal,
}

/// Wire form of a payment: names only, ids stay internal.
#[derive(Serialize)]
struct TransferRow<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(serialize_with = "serialize_money")]
    amount: Decimal,
}

impl Serialize for Transfer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TransferRow {
            from: &self.from,
            to: &self.to,
            amount: self.amount,
        }
        .serialize(serializer)
    }
}

/// Scratch entry for one side of the matching. `remaining` is bookkeeping
/// only; the caller's balances are never touched.
struct Outstanding<'a> {
    balance: &'a Balance,
    remaining: Decimal,
}

/// Greedy settle-up planner.
///
/// Splits balances into creditors and debtors, then repeatedly pairs the
/// current head of each side and moves `min(debt, credit)` between them.
/// A side's head advances once its remaining magnitude drops below the
/// policy epsilon.
///
/// Every step exhausts at least one head, so at most
/// `creditors + debtors - 1` transfers are emitted. The result is not
/// guaranteed to use the fewest possible transfers.
pub struct DebtSimplifier;

impl DebtSimplifier {
    pub fn simplify(balances: &[Balance], policy: &MoneyPolicy) -> Vec<Transfer> {
        let mut creditors: Vec<Outstanding<'_>> = balances
            .iter()
            .filter(|b| b.is_creditor())
            .map(|b| Outstanding {
                balance: b,
                remaining: b.net,
            })
            .collect();
        let mut debtors: Vec<Outstanding<'_>> = balances
            .iter()
            .filter(|b| b.is_debtor())
            .map(|b| Outstanding {
                balance: b,
                remaining: -b.net,
            })
            .collect();

        if policy.match_order == MatchOrder::LargestFirst {
            // sort_by is stable, so ties keep roster order
            creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
            debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        }

        let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
        let (mut i, mut j) = (0, 0);

        // Skip heads that rounding already left negligible.
        while i < debtors.len() && policy.is_negligible(debtors[i].remaining) {
            i += 1;
        }
        while j < creditors.len() && policy.is_negligible(creditors[j].remaining) {
            j += 1;
        }

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];
            let amount = debtor.remaining.min(creditor.remaining);

            trace!(
                "{} pays {} {} (owes {}, owed {})",
                debtor.balance.id,
                creditor.balance.id,
                amount,
                debtor.remaining,
                creditor.remaining
            );

            transfers.push(Transfer {
                from_id: debtor.balance.id.clone(),
                from: debtor.balance.name.clone(),
                to_id: creditor.balance.id.clone(),
                to: creditor.balance.name.clone(),
                amount: policy.round(amount),
            });

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if policy.is_negligible(debtor.remaining) {
                i += 1;
            }
            if policy.is_negligible(creditor.remaining) {
                j += 1;
            }
        }

        debug!(
            "{} transfers for {} creditors and {} debtors ({} order)",
            transfers.len(),
            creditors.len(),
            debtors.len(),
            policy.match_order
        );

        transfers
    }
}
