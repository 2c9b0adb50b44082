use chrono::NaiveDate;
use thiserror::Error;

/// Error type that captures common budget and forecast failures.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid interval: end {end} precedes start {start}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },
    #[error("Storage error: {0}")]
    Storage(String),
}
