//! Expense engine: admits expenses into the shared ledger and answers
//! balance queries.

pub mod config;
pub mod manager;

pub use config::EngineConfig;
pub use manager::ExpenseManager;

pub use splitledger_core::{DomainError, DomainResult, ExpenseId, Money, UserId};
pub use splitledger_ledger::Posting;
pub use splitledger_splits::{Expense, RemainderPolicy, Split, SplitKind, SplitPolicy};
pub use splitledger_users::{InMemoryUserDirectory, User, UserDirectory};
