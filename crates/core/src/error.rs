//! Domain error model.

use thiserror::Error;

use crate::id::{ExpenseId, UserId};
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic, local validation failure. None of them
/// are retried: the caller corrects the input and submits a new expense.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An expense was submitted without any participants.
    #[error("expense has no participants")]
    EmptyParticipants,

    /// Exact shares do not add up to the expense total.
    #[error("exact shares sum to {actual}, expected {expected}")]
    AmountMismatch { expected: Money, actual: Money },

    /// Percent shares do not add up to 100.
    #[error("percentages sum to {actual}, expected 100")]
    PercentageMismatch { actual: rust_decimal::Decimal },

    /// The split policy tag is unknown, or the splits carry a different policy.
    #[error("unknown split policy: {0}")]
    UnknownSplitPolicy(String),

    /// Payer or participant is not present in the user directory.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// An amount failed validation (e.g. zero total).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A split's amount was read before the owning expense was resolved.
    #[error("split for {0} has not been resolved")]
    Unresolved(UserId),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found.
    #[error("not found")]
    NotFound,

    /// The expense already has a compensating expense.
    #[error("expense {0} is already reversed")]
    AlreadyReversed(ExpenseId),

    /// Shared state could not be accessed (e.g. poisoned lock).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn amount_mismatch(expected: Money, actual: Money) -> Self {
        Self::AmountMismatch { expected, actual }
    }

    pub fn unknown_policy(tag: impl Into<String>) -> Self {
        Self::UnknownSplitPolicy(tag.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
