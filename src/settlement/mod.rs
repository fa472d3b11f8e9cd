pub mod balance;
pub mod ledger;
pub mod report;
pub mod simplifier;
