//! Balance ledger: who owes whom, and how much.
//!
//! Debts are stored in both directions so that per-user lookups need no
//! secondary index. The table itself does no locking; its owner decides how
//! it is shared.

pub mod matrix;

pub use matrix::{DebtMatrix, Posting};
