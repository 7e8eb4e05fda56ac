use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use splitledger_core::{DomainResult, Money, UserId};

/// One debt movement: `debtor` now owes `creditor` an extra `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub debtor: UserId,
    pub creditor: UserId,
    pub amount: Money,
}

impl Posting {
    pub fn new(debtor: UserId, creditor: UserId, amount: Money) -> Self {
        Self {
            debtor,
            creditor,
            amount,
        }
    }

    /// A debt to oneself has no effect.
    pub fn is_self_debt(&self) -> bool {
        self.debtor == self.creditor
    }
}

/// Pairwise debt table.
///
/// Invariant: `balance(a, b) == -balance(b, a)` for every pair. Both
/// directions are staged and written by the same `post_all` call, so an
/// entry never exists in only one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtMatrix {
    entries: HashMap<UserId, HashMap<UserId, Money>>,
}

impl DebtMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to what `debtor` owes `creditor`.
    pub fn update(&mut self, debtor: UserId, creditor: UserId, amount: Money) -> DomainResult<()> {
        self.post_all(&[Posting::new(debtor, creditor, amount)])
    }

    /// Apply a batch of postings completely or not at all.
    ///
    /// Every new cell is computed with checked arithmetic before anything is
    /// written, so an overflow leaves the table untouched.
    pub fn post_all(&mut self, postings: &[Posting]) -> DomainResult<()> {
        let mut staged: HashMap<(UserId, UserId), Money> = HashMap::new();

        for posting in postings.iter().filter(|p| !p.is_self_debt()) {
            let (d, c) = (posting.debtor, posting.creditor);
            let forward = staged.get(&(d, c)).copied().unwrap_or_else(|| self.balance(d, c));
            let reverse = staged.get(&(c, d)).copied().unwrap_or_else(|| self.balance(c, d));

            staged.insert((d, c), forward.checked_add(posting.amount)?);
            staged.insert((c, d), reverse.checked_sub(posting.amount)?);
        }

        for ((d, c), amount) in staged {
            self.entries.entry(d).or_default().insert(c, amount);
        }
        Ok(())
    }

    /// Signed amount `a` owes `b`; zero when the pair has never transacted.
    pub fn balance(&self, a: UserId, b: UserId) -> Money {
        self.entries
            .get(&a)
            .and_then(|row| row.get(&b))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// Unsettled counterparts of `user`: positive means `user` owes them,
    /// negative means they owe `user`.
    pub fn balances_for(&self, user: UserId) -> BTreeMap<UserId, Money> {
        self.entries
            .get(&user)
            .map(|row| {
                row.iter()
                    .filter(|(_, amount)| !amount.is_settled())
                    .map(|(other, amount)| (*other, *amount))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every unsettled debt, keyed debtor → creditor, positive direction only.
    pub fn all_debts(&self) -> BTreeMap<UserId, BTreeMap<UserId, Money>> {
        let mut debts: BTreeMap<UserId, BTreeMap<UserId, Money>> = BTreeMap::new();

        for (debtor, row) in &self.entries {
            for (creditor, amount) in row {
                if amount.is_positive() && !amount.is_settled() {
                    debts.entry(*debtor).or_default().insert(*creditor, *amount);
                }
            }
        }
        debts
    }

    /// Sum of everything `user` still owes to others.
    pub fn total_owed_by(&self, user: UserId) -> DomainResult<Money> {
        Money::checked_sum(
            self.balances_for(user)
                .into_values()
                .filter(Money::is_positive),
        )
    }

    /// Sum of everything others still owe `user`.
    pub fn total_owed_to(&self, user: UserId) -> DomainResult<Money> {
        let owed = Money::checked_sum(
            self.balances_for(user)
                .into_values()
                .filter(|amount| !amount.is_positive()),
        )?;
        Ok(-owed)
    }
}
