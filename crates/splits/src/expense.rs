use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{Decimal, DomainError, DomainResult, Entity, ExpenseId, Money, UserId};

use crate::split::{Split, SplitPolicy};

/// An amount paid by one user on behalf of several.
///
/// Immutable once accepted by the engine. Corrections are new expenses
/// (see [`Expense::reversal_of`]), never in-place edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    total: Money,
    description: String,
    paid_by: UserId,
    policy: SplitPolicy,
    splits: Vec<Split>,
    reverses: Option<ExpenseId>,
    created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        paid_by: UserId,
        total: Money,
        description: impl Into<String>,
        policy: SplitPolicy,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            total,
            description: description.into(),
            paid_by,
            policy,
            splits,
            reverses: None,
            created_at: Utc::now(),
        }
    }

    /// Build an expense from `(participant, scalar)` pairs and a policy tag.
    ///
    /// The scalar is ignored for `Equal`, is the amount for `Exact`, and the
    /// percentage for `Percent`; the latter two require it.
    pub fn from_shares(
        paid_by: UserId,
        total: Money,
        description: impl Into<String>,
        policy: SplitPolicy,
        shares: &[(UserId, Option<Decimal>)],
    ) -> DomainResult<Self> {
        let splits = shares
            .iter()
            .map(|&(user, scalar)| match (policy, scalar) {
                (SplitPolicy::Equal, _) => Ok(Split::equal(user)),
                (SplitPolicy::Exact, Some(amount)) => Ok(Split::exact(user, Money::new(amount))),
                (SplitPolicy::Percent, Some(pct)) => Ok(Split::percent(user, pct)),
                (_, None) => Err(DomainError::invalid_amount(format!(
                    "{policy} split for {user} needs a value"
                ))),
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self::new(paid_by, total, description, policy, splits))
    }

    /// Compensating expense that cancels every share of `original`.
    ///
    /// The original must already be resolved. The reversal carries the negated
    /// shares as exact amounts, and its total is the negated sum of those
    /// shares, so it cancels exactly what the original posted.
    pub fn reversal_of(original: &Expense, description: impl Into<String>) -> DomainResult<Self> {
        if original.reverses.is_some() {
            return Err(DomainError::invalid_amount(format!(
                "expense {} is itself a reversal",
                original.id
            )));
        }

        let splits = original
            .splits
            .iter()
            .map(|s| Ok(Split::exact(s.participant_id(), -s.resolved_amount()?)))
            .collect::<DomainResult<Vec<_>>>()?;

        let mut reversal = Self::new(
            original.paid_by,
            -original.resolved_total()?,
            description,
            SplitPolicy::Exact,
            splits,
        );
        reversal.reverses = Some(original.id);
        Ok(reversal)
    }

    pub fn id_typed(&self) -> ExpenseId {
        self.id
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn paid_by(&self) -> UserId {
        self.paid_by
    }

    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub(crate) fn splits_mut(&mut self) -> &mut [Split] {
        &mut self.splits
    }

    /// The expense this one compensates, if any.
    pub fn reverses(&self) -> Option<ExpenseId> {
        self.reverses
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn participants(&self) -> impl Iterator<Item = UserId> + '_ {
        self.splits.iter().map(Split::participant_id)
    }

    /// Whether `user` paid for or takes part in this expense.
    pub fn involves(&self, user: UserId) -> bool {
        self.paid_by == user || self.participants().any(|p| p == user)
    }

    pub fn is_resolved(&self) -> bool {
        !self.splits.is_empty() && self.splits.iter().all(Split::is_resolved)
    }

    /// Sum of the resolved shares.
    pub fn resolved_total(&self) -> DomainResult<Money> {
        self.splits
            .iter()
            .try_fold(Money::ZERO, |acc, s| acc.checked_add(s.resolved_amount()?))
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
