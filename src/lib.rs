//! # trip-settlement
//!
//! Settlement engine for group-travel expenses.
//!
//! Given a trip's participants and the expenses they logged, the engine
//! splits the total equally, computes each participant's net balance and
//! proposes a short list of peer-to-peer payments that settles every debt.
//!
//! ## Architecture
//!
//! - **core** — Identities, expense records, trip snapshots, money policy, errors
//! - **settlement** — Ledger aggregation, balances, greedy debt simplification, reporting
//! - **analysis** — Category breakdown and budget status of a trip's spend
//! - **simulation** — Random trip generation for benchmarks and demos

pub mod analysis;
pub mod core;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::error::SettlementError;
    pub use crate::core::expense::{ExpenseRecord, TripId};
    pub use crate::core::money::{MatchOrder, MoneyPolicy};
    pub use crate::core::participant::{Participant, ParticipantId, Roster};
    pub use crate::core::snapshot::{SettlementRequest, TripSnapshot};
    pub use crate::settlement::balance::{Balance, BalanceSheet};
    pub use crate::settlement::ledger::PaidLedger;
    pub use crate::settlement::report::{SettlementEngine, SettlementResult};
    pub use crate::settlement::simplifier::{DebtSimplifier, Transfer};
}
