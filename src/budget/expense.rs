use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring outgoing amount, e.g. rent or a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub label: String,
    pub amount: f64,
    pub recurring: Recurrence,
}

impl Expense {
    pub fn new(label: impl Into<String>, amount: f64, recurring: Recurrence) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
            recurring,
        }
    }
}

/// Pattern determining which calendar days an expense repeats on.
///
/// Serialized with a `type` tag matching the persisted budget shape. A tag
/// this build does not recognize decodes as [`Recurrence::Unknown`] so one
/// bad rule cannot block loading or forecasting the rest of the budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Recurrence {
    #[serde(rename_all = "camelCase")]
    Monthly { day_of_month: u32 },
    /// ISO weekday, Monday = 1 through Sunday = 7.
    #[serde(rename_all = "camelCase")]
    Weekly { day_of_week: u32 },
    #[serde(rename_all = "camelCase")]
    Yearly { month: u32, day_of_month: u32 },
    #[serde(other)]
    Unknown,
}

impl Recurrence {
    /// Exact-match test: months shorter than a monthly rule's day simply
    /// never match that cycle (no rollover to the last day).
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Recurrence::Monthly { day_of_month } => date.day() == *day_of_month,
            Recurrence::Weekly { day_of_week } => {
                date.weekday().number_from_monday() == *day_of_week
            }
            Recurrence::Yearly {
                month,
                day_of_month,
            } => date.month() == *month && date.day() == *day_of_month,
            Recurrence::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_rule_does_not_roll_over_in_short_months() {
        let rule = Recurrence::Monthly { day_of_month: 31 };
        assert!(rule.matches(date(2024, 1, 31)));
        assert!(!rule.matches(date(2024, 2, 29)));
        assert!(!rule.matches(date(2024, 4, 30)));
    }

    #[test]
    fn weekly_rule_matches_iso_weekday() {
        let rule = Recurrence::Weekly { day_of_week: 2 };
        // 2024-01-02 is a Tuesday
        assert!(rule.matches(date(2024, 1, 2)));
        assert!(rule.matches(date(2024, 1, 9)));
        assert!(!rule.matches(date(2024, 1, 3)));
    }

    #[test]
    fn yearly_rule_requires_month_and_day() {
        let rule = Recurrence::Yearly {
            month: 1,
            day_of_month: 28,
        };
        assert!(rule.matches(date(2024, 1, 28)));
        assert!(!rule.matches(date(2024, 2, 28)));
        assert!(!rule.matches(date(2024, 1, 27)));
    }

    #[test]
    fn unrecognized_rule_tag_decodes_as_unknown() {
        let rule: Recurrence =
            serde_json::from_str(r#"{ "type": "fortnightly", "dayOfWeek": 3 }"#).unwrap();
        assert_eq!(rule, Recurrence::Unknown);
        assert!(!rule.matches(date(2024, 1, 3)));
    }

    #[test]
    fn recurrence_uses_tagged_camel_case_shape() {
        let rule = Recurrence::Yearly {
            month: 3,
            day_of_month: 15,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "yearly");
        assert_eq!(json["dayOfMonth"], 15);
    }
}
