//! The forecast engine: a pure function from a budget state and a closed
//! date interval to one ledger entry per day.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{
    interval::{days_through, DateInterval},
    state::BudgetState,
};

/// An expense recognized on a forecast day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpenseOccurrence {
    pub label: String,
    pub amount: f64,
}

/// An income recognized on a forecast day (a payday).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeOccurrence {
    pub name: String,
    pub total_in: f64,
    pub total_retained: f64,
}

/// Whether a day's closing balance was projected or pinned by a snapshot.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Manual,
    Forecast,
}

/// One day's computed balances plus that day's occurrences.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub starting_balance: f64,
    pub closing_balance: f64,
    pub expenses: Vec<ExpenseOccurrence>,
    pub incomes: Vec<IncomeOccurrence>,
    /// Signed net outflow: expenses add to it, income nets subtract from it.
    pub total_expense_cost: f64,
    pub kind: EntryKind,
    pub is_payday: bool,
}

/// Projects the daily balance trajectory over `interval`.
///
/// The walk starts at the most recent snapshot dated at or before
/// `interval.start` (balance 0 and the interval start when none exists), so
/// recurring items between the anchor and the interval start are folded into
/// the running balance. Days before `interval.start` are computed but not
/// emitted. Deterministic: identical inputs yield identical output.
pub fn generate_forecast(state: &BudgetState, interval: DateInterval) -> Vec<LedgerEntry> {
    let mut history = state.balance_history.clone();
    history.sort_by(|a, b| b.date.cmp(&a.date));

    let anchor = history.iter().find(|snap| snap.date <= interval.start);
    let mut balance = anchor.map(|snap| snap.balance).unwrap_or(0.0);
    let walk_start = anchor.map(|snap| snap.date).unwrap_or(interval.start);

    let mut entries = Vec::with_capacity(interval.num_days() as usize);
    for day in days_through(walk_start, interval.end) {
        let starting_balance = balance;

        let expenses: Vec<ExpenseOccurrence> = state
            .recurring_expenses
            .iter()
            .filter(|expense| expense.recurring.matches(day))
            .map(|expense| ExpenseOccurrence {
                label: expense.label.clone(),
                amount: expense.amount,
            })
            .collect();

        let mut incomes = Vec::new();
        let mut income_net = 0.0;
        for income in &state.incomes {
            if income.payday_in(day.year(), day.month()) == day {
                income_net += income.net();
                incomes.push(IncomeOccurrence {
                    name: income.name.clone(),
                    total_in: income.total_in,
                    total_retained: income.total_retained,
                });
            }
        }
        let is_payday = !incomes.is_empty();

        let total_expense_cost =
            expenses.iter().map(|e| e.amount).sum::<f64>() - income_net;

        // A manual snapshot wins over the computed projection and resets the
        // running balance for the days that follow.
        let (closing_balance, kind) = match history.iter().find(|snap| snap.date == day) {
            Some(snapshot) => {
                balance = snapshot.balance;
                (snapshot.balance, EntryKind::Manual)
            }
            None => {
                balance -= total_expense_cost;
                (balance, EntryKind::Forecast)
            }
        };

        if interval.contains(day) {
            entries.push(LedgerEntry {
                date: day,
                starting_balance,
                closing_balance,
                expenses,
                incomes,
                total_expense_cost,
                kind,
                is_payday,
            });
        }
    }

    entries
}
