//! Validation and share computation for each split policy.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use splitledger_core::{Decimal, DomainError, DomainResult, Money, within_tolerance};

use crate::expense::Expense;
use crate::split::{Split, SplitKind, SplitPolicy};

/// What to do with the cents left over when an equal split does not divide
/// the total evenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Every participant gets the rounded share; the leftover is not assigned.
    #[default]
    Drop,
    /// The first participant absorbs the leftover so shares sum to the total.
    FirstParticipant,
}

impl FromStr for RemainderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(RemainderPolicy::Drop),
            "first" | "first_participant" => Ok(RemainderPolicy::FirstParticipant),
            other => Err(format!("unknown remainder policy: {other}")),
        }
    }
}

/// Computes concrete per-participant amounts for an expense.
///
/// Resolution is all-or-nothing: amounts are computed first and only written
/// into the splits when every check passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitResolver {
    remainder: RemainderPolicy,
}

impl SplitResolver {
    pub fn new(remainder: RemainderPolicy) -> Self {
        Self { remainder }
    }

    /// Validate `expense` and populate each split's resolved amount.
    pub fn resolve(&self, expense: &mut Expense) -> DomainResult<()> {
        let amounts = self.compute(expense)?;

        for (split, amount) in expense.splits_mut().iter_mut().zip(amounts) {
            split.set_resolved(amount);
        }

        tracing::debug!(
            expense_id = %expense.id_typed(),
            policy = %expense.policy(),
            participants = expense.splits().len(),
            "resolved expense splits"
        );
        Ok(())
    }

    /// Per-split amounts in split order, without touching the expense.
    pub fn compute(&self, expense: &Expense) -> DomainResult<Vec<Money>> {
        let total = expense.total();
        let splits = expense.splits();

        // A reversal of shares that netted to zero is a legitimate no-op.
        if total.is_zero() && expense.reverses().is_none() {
            return Err(DomainError::invalid_amount("expense total must be non-zero"));
        }
        if splits.is_empty() {
            return Err(DomainError::EmptyParticipants);
        }
        if let Some(stray) = splits.iter().find(|s| s.policy() != expense.policy()) {
            return Err(DomainError::unknown_policy(format!(
                "{} split in a {} expense",
                stray.policy(),
                expense.policy()
            )));
        }

        match expense.policy() {
            SplitPolicy::Equal => self.equal(total, splits.len()),
            SplitPolicy::Exact => exact(total, splits),
            SplitPolicy::Percent => percent(total, splits),
        }
    }

    fn equal(&self, total: Money, participants: usize) -> DomainResult<Vec<Money>> {
        let share = total.share_of(participants)?;
        let mut amounts = vec![share; participants];

        if self.remainder == RemainderPolicy::FirstParticipant {
            let leftover = total.checked_sub(share.times(participants)?)?;
            amounts[0] = amounts[0].checked_add(leftover)?;
        }
        Ok(amounts)
    }
}

fn exact(total: Money, splits: &[Split]) -> DomainResult<Vec<Money>> {
    let amounts = splits
        .iter()
        .map(|s| match s.kind() {
            SplitKind::Exact { amount } => Ok(*amount),
            other => Err(DomainError::unknown_policy(other.policy().as_str())),
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let actual = Money::checked_sum(amounts.iter().copied())?;
    if !actual.approx_eq(total) {
        return Err(DomainError::amount_mismatch(total, actual));
    }
    Ok(amounts)
}

fn percent(total: Money, splits: &[Split]) -> DomainResult<Vec<Money>> {
    let percents = splits
        .iter()
        .map(|s| match s.kind() {
            SplitKind::Percent { percent } => Ok(*percent),
            other => Err(DomainError::unknown_policy(other.policy().as_str())),
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let actual = percents
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(*p))
        .ok_or_else(|| DomainError::invalid_amount("percentage overflow"))?;
    if !within_tolerance(actual, Decimal::ONE_HUNDRED) {
        return Err(DomainError::PercentageMismatch { actual });
    }
    percents.into_iter().map(|p| total.percent(p)).collect()
}
