use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::BudgetError,
    storage::StorageBackend,
};

use super::{
    expense::Expense,
    forecast::{generate_forecast, LedgerEntry},
    income::Income,
    interval::DateInterval,
    state::BudgetState,
};

/// Owns the single mutable [`BudgetState`] per process and wraps every
/// mutation in a synchronous persist, so a read after any mutator returns
/// the same state a restart would load.
pub struct BudgetRepository<S: StorageBackend> {
    state: BudgetState,
    backend: S,
}

impl<S: StorageBackend> BudgetRepository<S> {
    /// Loads the persisted state once; absent state starts empty.
    pub fn open(backend: S) -> Result<Self, BudgetError> {
        let state = backend.load()?.unwrap_or_default();
        tracing::debug!(
            expenses = state.recurring_expenses.len(),
            incomes = state.incomes.len(),
            snapshots = state.balance_history.len(),
            "budget state loaded"
        );
        Ok(Self { state, backend })
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn add_or_update_expense(&mut self, expense: Expense) -> Result<(), BudgetError> {
        self.state.upsert_expense(expense);
        self.persist()
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<(), BudgetError> {
        self.state.remove_expense(id);
        self.persist()
    }

    pub fn add_or_update_income(&mut self, income: Income) -> Result<(), BudgetError> {
        self.state.upsert_income(income);
        self.persist()
    }

    pub fn remove_income(&mut self, id: Uuid) -> Result<(), BudgetError> {
        self.state.remove_income(id);
        self.persist()
    }

    /// `Some` records or updates the manual balance for `date`, `None`
    /// removes it.
    pub fn set_manual_balance(
        &mut self,
        date: NaiveDate,
        balance: Option<f64>,
    ) -> Result<(), BudgetError> {
        self.state.set_manual_balance(date, balance);
        self.persist()
    }

    pub fn clear_all(&mut self) -> Result<(), BudgetError> {
        self.state.clear();
        self.persist()
    }

    /// Runs the forecast engine over the current state.
    pub fn forecast(&self, interval: DateInterval) -> Vec<LedgerEntry> {
        generate_forecast(&self.state, interval)
    }

    fn persist(&mut self) -> Result<(), BudgetError> {
        self.backend.save(&self.state)?;
        tracing::debug!("budget state persisted");
        Ok(())
    }
}
