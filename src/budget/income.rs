use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::days_in_month;

/// A recurring monthly income, e.g. a salary.
///
/// `total_in` is the gross amount, `total_retained` the part withheld; only
/// the difference reaches the account balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: Uuid,
    pub name: String,
    pub total_in: f64,
    pub total_retained: f64,
    pub day_of_month: u32,
}

impl Income {
    pub fn new(
        name: impl Into<String>,
        total_in: f64,
        total_retained: f64,
        day_of_month: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_in,
            total_retained,
            day_of_month,
        }
    }

    /// Net contribution to the balance.
    pub fn net(&self) -> f64 {
        self.total_in - self.total_retained
    }

    /// Resolves the payday for the given month.
    ///
    /// The nominal day is clamped to the month's length, then rolled backward
    /// one day at a time while it lands on a Saturday or Sunday. The rollback
    /// never leaves the month: it stops at day 1 even if still on a weekend.
    pub fn payday_in(&self, year: i32, month: u32) -> NaiveDate {
        let nominal = self.day_of_month.min(days_in_month(year, month)).max(1);
        let mut date = NaiveDate::from_ymd_opt(year, month, nominal)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 1).unwrap());
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && date.day() > 1 {
            date -= Duration::days(1);
        }
        date
    }
}
