//! Split policies, expenses, and the resolver that turns an expense's splits
//! into concrete per-participant amounts.
//!
//! Pure domain logic only: no IO, no locking, no ledger access.

pub mod expense;
pub mod resolver;
pub mod split;

pub use expense::Expense;
pub use resolver::{RemainderPolicy, SplitResolver};
pub use split::{Split, SplitKind, SplitPolicy};
