//! Expense manager: validates expenses and admits them into the ledger.
//!
//! The accepted-expense log and the debt table live together behind a single
//! `RwLock`. Admitting an expense is one write-locked critical section, so a
//! reader sees either all of an expense's postings plus its log entry, or
//! none of them. Manager code never holds more than that one lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use splitledger_core::{DomainError, DomainResult, ExpenseId, Money, UserId};
use splitledger_ledger::{DebtMatrix, Posting};
use splitledger_splits::{Expense, SplitResolver};
use splitledger_users::UserDirectory;

use crate::config::EngineConfig;

#[derive(Debug, Default)]
struct Books {
    expenses: Vec<Expense>,
    index: HashMap<ExpenseId, usize>,
    /// original expense -> compensating expense
    reversals: HashMap<ExpenseId, ExpenseId>,
    ledger: DebtMatrix,
}

impl Books {
    fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.index.get(&id).map(|&i| &self.expenses[i])
    }

    /// Checks that depend on the current log; run under the write lock.
    fn admissible(&self, expense: &Expense) -> DomainResult<()> {
        let id = expense.id_typed();
        if self.index.contains_key(&id) {
            return Err(DomainError::conflict(format!("expense {id} already recorded")));
        }

        if let Some(original) = expense.reverses() {
            if self.get(original).is_none() {
                return Err(DomainError::not_found());
            }
            if self.reversals.contains_key(&original) {
                return Err(DomainError::AlreadyReversed(original));
            }
        }
        Ok(())
    }

    /// Postings first: if the ledger rejects the batch, the log is not touched.
    fn commit(&mut self, expense: Expense, postings: &[Posting]) -> DomainResult<()> {
        self.ledger.post_all(postings)?;

        let id = expense.id_typed();
        if let Some(original) = expense.reverses() {
            self.reversals.insert(original, id);
        }
        self.index.insert(id, self.expenses.len());
        self.expenses.push(expense);
        Ok(())
    }
}

/// Orchestrates split resolution and ledger updates for accepted expenses.
#[derive(Debug)]
pub struct ExpenseManager<D>
where
    D: UserDirectory,
{
    directory: D,
    resolver: SplitResolver,
    books: RwLock<Books>,
}

impl<D> ExpenseManager<D>
where
    D: UserDirectory,
{
    pub fn new(directory: D, config: EngineConfig) -> Self {
        Self {
            directory,
            resolver: SplitResolver::new(config.remainder),
            books: RwLock::new(Books::default()),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Books>> {
        self.books
            .read()
            .map_err(|_| DomainError::conflict("expense books lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Books>> {
        self.books
            .write()
            .map_err(|_| DomainError::conflict("expense books lock poisoned"))
    }

    fn ensure_known_users(&self, expense: &Expense) -> DomainResult<()> {
        let unknown = core::iter::once(expense.paid_by())
            .chain(expense.participants())
            .find(|user| !self.directory.contains(user));

        match unknown {
            Some(user) => Err(DomainError::UnknownUser(user)),
            None => Ok(()),
        }
    }

    /// Validate, resolve, and record `expense`.
    ///
    /// On any failure the log and the ledger are left untouched.
    pub fn add_expense(&self, mut expense: Expense) -> DomainResult<ExpenseId> {
        let id = expense.id_typed();

        let validated = self
            .ensure_known_users(&expense)
            .and_then(|()| self.resolver.resolve(&mut expense));
        if let Err(e) = validated {
            tracing::warn!(expense_id = %id, error = %e, "expense rejected");
            return Err(e);
        }

        let payer = expense.paid_by();
        let postings = expense
            .splits()
            .iter()
            .filter(|s| s.participant_id() != payer)
            .map(|s| Ok(Posting::new(s.participant_id(), payer, s.resolved_amount()?)))
            .collect::<DomainResult<Vec<_>>>()?;

        let (total, policy, reverses) = (expense.total(), expense.policy(), expense.reverses());

        let mut books = self.write()?;
        let committed = match books.admissible(&expense) {
            Ok(()) => books.commit(expense, &postings),
            Err(e) => Err(e),
        };
        if let Err(e) = committed {
            tracing::warn!(expense_id = %id, error = %e, "expense rejected");
            return Err(e);
        }

        tracing::info!(
            expense_id = %id,
            payer = %payer,
            total = %total,
            policy = %policy,
            postings = postings.len(),
            reverses = ?reverses,
            "expense recorded"
        );
        Ok(id)
    }

    /// Record a compensating expense that cancels every share of `id`.
    pub fn reverse_expense(
        &self,
        id: ExpenseId,
        description: impl Into<String>,
    ) -> DomainResult<ExpenseId> {
        let original = self.expense(id)?;
        let reversal = Expense::reversal_of(&original, description)?;
        self.add_expense(reversal)
    }

    pub fn expense(&self, id: ExpenseId) -> DomainResult<Expense> {
        self.read()?.get(id).cloned().ok_or(DomainError::NotFound)
    }

    /// Accepted expenses in admission order.
    pub fn expenses(&self) -> DomainResult<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    /// Accepted expenses that `user` paid for or took part in.
    pub fn expenses_for(&self, user: UserId) -> DomainResult<Vec<Expense>> {
        Ok(self
            .read()?
            .expenses
            .iter()
            .filter(|e| e.involves(user))
            .cloned()
            .collect())
    }

    pub fn is_reversed(&self, id: ExpenseId) -> DomainResult<bool> {
        Ok(self.read()?.reversals.contains_key(&id))
    }

    pub fn expense_count(&self) -> DomainResult<usize> {
        Ok(self.read()?.expenses.len())
    }

    /// Unsettled counterparts of `user`; positive means `user` owes them.
    pub fn balances_for(&self, user: UserId) -> DomainResult<BTreeMap<UserId, Money>> {
        Ok(self.read()?.ledger.balances_for(user))
    }

    /// Every unsettled debt, debtor -> creditor -> amount.
    pub fn all_debts(&self) -> DomainResult<BTreeMap<UserId, BTreeMap<UserId, Money>>> {
        Ok(self.read()?.ledger.all_debts())
    }

    /// Signed amount `a` owes `b`.
    pub fn balance_between(&self, a: UserId, b: UserId) -> DomainResult<Money> {
        Ok(self.read()?.ledger.balance(a, b))
    }

    /// Totals for `user`: (owes others, owed by others).
    pub fn summary_for(&self, user: UserId) -> DomainResult<(Money, Money)> {
        let books = self.read()?;
        Ok((books.ledger.total_owed_by(user)?, books.ledger.total_owed_to(user)?))
    }
}
