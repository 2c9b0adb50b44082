use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{expense::Expense, income::Income, snapshot::BalanceSnapshot};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Most recent snapshot dates retained; older ones are pruned on insert.
const BALANCE_HISTORY_CAP: usize = 10;

/// The aggregate budget: recurring expenses, incomes, and balance history.
///
/// One mutable instance is owned per process (see
/// [`BudgetRepository`](super::repository::BudgetRepository)); the forecast
/// engine only ever borrows it. Serialized with the canonical camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    #[serde(default)]
    pub recurring_expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default, rename = "accountBalanceHistory")]
    pub balance_history: Vec<BalanceSnapshot>,
    #[serde(default = "BudgetState::schema_version_default")]
    pub schema_version: u8,
}

impl Default for BudgetState {
    fn default() -> Self {
        Self {
            recurring_expenses: Vec::new(),
            incomes: Vec::new(),
            balance_history: Vec::new(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl BudgetState {
    /// Replaces the expense with a matching id, or appends a new one.
    pub fn upsert_expense(&mut self, expense: Expense) {
        match self
            .recurring_expenses
            .iter_mut()
            .find(|existing| existing.id == expense.id)
        {
            Some(existing) => {
                existing.label = expense.label;
                existing.amount = expense.amount;
                existing.recurring = expense.recurring;
            }
            None => self.recurring_expenses.push(expense),
        }
    }

    pub fn remove_expense(&mut self, id: Uuid) {
        self.recurring_expenses.retain(|expense| expense.id != id);
    }

    /// Replaces the first income with a matching id, or appends a new one.
    pub fn upsert_income(&mut self, income: Income) {
        match self
            .incomes
            .iter_mut()
            .find(|existing| existing.id == income.id)
        {
            Some(existing) => {
                existing.name = income.name;
                existing.total_in = income.total_in;
                existing.total_retained = income.total_retained;
                existing.day_of_month = income.day_of_month;
            }
            None => self.incomes.push(income),
        }
    }

    pub fn remove_income(&mut self, id: Uuid) {
        self.incomes.retain(|income| income.id != id);
    }

    /// Upserts (`Some`) or removes (`None`) the manual balance for `date`,
    /// then re-sorts the history descending and prunes to the cap.
    pub fn set_manual_balance(&mut self, date: NaiveDate, balance: Option<f64>) {
        match balance {
            Some(value) => {
                match self
                    .balance_history
                    .iter_mut()
                    .find(|snapshot| snapshot.date == date)
                {
                    Some(existing) => existing.balance = value,
                    None => self.balance_history.push(BalanceSnapshot::new(date, value)),
                }
            }
            None => self.balance_history.retain(|snapshot| snapshot.date != date),
        }
        self.normalize_history();
    }

    /// Resets every collection to its empty default.
    pub fn clear(&mut self) {
        *self = BudgetState::default();
    }

    /// Restores the history invariants: unique dates, descending order,
    /// at most [`BALANCE_HISTORY_CAP`] entries.
    pub(crate) fn normalize_history(&mut self) {
        self.balance_history
            .sort_by(|a, b| b.date.cmp(&a.date));
        self.balance_history
            .dedup_by_key(|snapshot| snapshot.date);
        self.balance_history.truncate(BALANCE_HISTORY_CAP);
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
