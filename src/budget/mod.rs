//! Budget domain models, the forecast engine, and the owning repository.

pub mod expense;
pub mod forecast;
pub mod income;
pub mod interval;
pub mod repository;
pub mod snapshot;
pub mod state;

pub use expense::{Expense, Recurrence};
pub use forecast::{
    generate_forecast, EntryKind, ExpenseOccurrence, IncomeOccurrence, LedgerEntry,
};
pub use income::Income;
pub use interval::{days_in_month, DateInterval};
pub use repository::BudgetRepository;
pub use snapshot::BalanceSnapshot;
pub use state::{BudgetState, CURRENT_SCHEMA_VERSION};
