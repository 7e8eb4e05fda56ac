//! Currency amounts and the tolerance used to compare them.
//!
//! All money is kept as a `Decimal` so sums of cents are exact. Rounding to
//! the minor unit always uses round-half-away-from-zero.
//!
//! Arithmetic is checked: an overflow surfaces as `InvalidAmount`, never a panic.

use core::fmt;
use core::ops::Neg;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Decimal places of the currency's minor unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// One minor currency unit (0.01).
///
/// Shared by split validation and by the ledger's settled-balance filter.
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, MINOR_UNIT_SCALE);

/// Round a raw decimal to the currency's minor unit.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether two raw decimals agree within [`TOLERANCE`].
///
/// A difference too large to represent is never within tolerance.
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b).is_some_and(|diff| diff.abs() <= TOLERANCE)
}

fn overflow(op: &str) -> DomainError {
    DomainError::invalid_amount(format!("amount overflow in {op}"))
}

/// A signed currency amount.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from minor units (cents).
    pub fn from_minor(units: i64) -> Self {
        Self(Decimal::new(units, MINOR_UNIT_SCALE))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Equal to `other` within one minor unit.
    pub fn approx_eq(&self, other: Money) -> bool {
        within_tolerance(self.0, other.0)
    }

    /// A balance this small is treated as zero.
    pub fn is_settled(&self) -> bool {
        self.0.abs() <= TOLERANCE
    }

    pub fn checked_add(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_add(rhs.0).map(Money).ok_or_else(|| overflow("addition"))
    }

    pub fn checked_sub(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_sub(rhs.0).map(Money).ok_or_else(|| overflow("subtraction"))
    }

    /// `self * factor`, unrounded.
    pub fn checked_mul(self, factor: Decimal) -> DomainResult<Money> {
        self.0.checked_mul(factor).map(Money).ok_or_else(|| overflow("multiplication"))
    }

    /// Sum of `amounts`, failing on the first overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> DomainResult<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// `self / parts`, rounded to the minor unit. `parts` must be non-zero.
    pub fn share_of(self, parts: usize) -> DomainResult<Money> {
        self.0
            .checked_div(Decimal::from(parts))
            .map(|share| Money(round2(share)))
            .ok_or_else(|| overflow("division"))
    }

    /// `self * percent / 100`, rounded to the minor unit.
    pub fn percent(self, percent: Decimal) -> DomainResult<Money> {
        self.checked_mul(percent)?
            .0
            .checked_div(Decimal::ONE_HUNDRED)
            .map(|share| Money(round2(share)))
            .ok_or_else(|| overflow("division"))
    }

    /// `self * n`, unrounded.
    pub fn times(self, n: usize) -> DomainResult<Money> {
        self.checked_mul(Decimal::from(n))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}
