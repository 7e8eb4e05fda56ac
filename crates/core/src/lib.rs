//! `splitledger-core` — shared domain building blocks.
//!
//! Identifiers, money, and the error taxonomy used by every other crate.
//! No IO, no locking.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ExpenseId, UserId};
pub use money::{Money, TOLERANCE, round2, within_tolerance};
pub use value_object::ValueObject;

pub use rust_decimal::Decimal;
