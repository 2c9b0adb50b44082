use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A manually recorded account balance for a specific day.
///
/// Snapshots are user corrections, not derived values; during a forecast they
/// override whatever the running projection computed for their date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BalanceSnapshot {
    pub date: NaiveDate,
    pub balance: f64,
}

impl BalanceSnapshot {
    pub fn new(date: NaiveDate, balance: f64) -> Self {
        Self { date, balance }
    }
}
