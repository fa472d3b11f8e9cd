use crate::core::error::SettlementError;
use crate::core::money::{serialize_money, MoneyPolicy};
use crate::core::participant::{ParticipantId, Roster};
use crate::settlement::ledger::PaidLedger;
use log::debug;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A participant's standing after equal-share splitting.
///
/// Positive `net` means the participant is owed money (creditor);
/// negative means they owe (debtor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub id: ParticipantId,
    pub name: String,
    /// Total the participant paid, as aggregated.
    pub paid: Decimal,
    /// `paid - fair_share`, rounded once to the policy scale.
    pub net: Decimal,
}

impl Balance {
    pub fn is_creditor(&self) -> bool {
        self.net > Decimal::ZERO
    }

    pub fn is_debtor(&self) -> bool {
        self.net < Decimal::ZERO
    }
}

/// Wire form of a balance row.
#[derive(Serialize)]
struct BalanceRow<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(serialize_with = "serialize_money")]
    paid: Decimal,
    #[serde(serialize_with = "serialize_money")]
    balance: Decimal,
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BalanceRow {
            id: self.id.as_str(),
            name: &self.name,
            paid: self.paid,
            balance: self.net,
        }
        .serialize(serializer)
    }
}

/// Fair share plus every participant's balance, in roster order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    grand_total: Decimal,
    fair_share: Decimal,
    balances: Vec<Balance>,
}

impl BalanceSheet {
    /// Split the grand total equally and derive each net balance.
    ///
    /// The fair share itself is kept unrounded; only each net balance is
    /// rounded, once. Independent rounding means the balances may miss
    /// zero-sum by up to half a minor unit per participant.
    ///
    /// # Errors
    ///
    /// `EmptyRoster` when there is nobody to split between.
    pub fn compute(
        roster: &Roster,
        ledger: &PaidLedger,
        policy: &MoneyPolicy,
    ) -> Result<Self, SettlementError> {
        if roster.is_empty() {
            return Err(SettlementError::EmptyRoster);
        }

        let grand_total = ledger.grand_total();
        let fair_share = grand_total / Decimal::from(roster.len());

        let balances: Vec<Balance> = roster
            .iter()
            .map(|p| {
                let paid = ledger.paid(&p.id);
                Balance {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    paid,
                    net: policy.round(paid - fair_share),
                }
            })
            .collect();

        debug!(
            "fair share {} over {} participants ({} creditors, {} debtors)",
            fair_share,
            roster.len(),
            balances.iter().filter(|b| b.is_creditor()).count(),
            balances.iter().filter(|b| b.is_debtor()).count()
        );

        Ok(Self {
            grand_total,
            fair_share,
            balances,
        })
    }

    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    pub fn fair_share(&self) -> Decimal {
        self.fair_share
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    pub fn into_balances(self) -> Vec<Balance> {
        self.balances
    }

    /// Sum of all rounded net balances. Ideally zero.
    pub fn net_sum(&self) -> Decimal {
        self.balances.iter().map(|b| b.net).sum()
    }

    /// Whether the balances sum to zero within the rounding tolerance.
    pub fn is_balanced(&self, policy: &MoneyPolicy) -> bool {
        self.net_sum().abs() <= policy.zero_sum_tolerance(self.balances.len())
    }

    /// Sum of positive balances: the money that has to move.
    pub fn total_surplus(&self) -> Decimal {
        self.balances
            .iter()
            .filter(|b| b.is_creditor())
            .map(|b| b.net)
            .sum()
    }
}
