//! Load-time translation of persisted budget state into the canonical shape.
//!
//! Three on-disk generations exist: the canonical camelCase shape carrying a
//! `schemaVersion`, the same camelCase shape without the version field, and
//! an older mixed shape with snake_case top-level keys.
//! Loading always goes through [`from_json`], so the rest of the crate only
//! ever sees the canonical [`BudgetState`].

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    budget::{
        BalanceSnapshot, BudgetState, Expense, Income, Recurrence, CURRENT_SCHEMA_VERSION,
    },
    errors::BudgetError,
};

use super::Result;

/// Decodes persisted JSON, migrating legacy files when necessary.
pub fn from_json(data: &str) -> Result<BudgetState> {
    let value: Value = serde_json::from_str(data)?;
    let version = value
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if version > CURRENT_SCHEMA_VERSION as u64 {
        return Err(BudgetError::Storage(format!(
            "persisted budget state has schema version {} but this build understands up to {}",
            version, CURRENT_SCHEMA_VERSION
        )));
    }
    let mut state = if version == 0 && has_legacy_keys(&value) {
        decode_legacy(value)?
    } else if version == 0 {
        // Unversioned camelCase files predate the version field but already
        // use the canonical keys; serde defaults fill in the version. A
        // legacy file whose top-level keys give no hint (only `incomes`)
        // lands here too, so fall back to the legacy decode before failing.
        match serde_json::from_value(value.clone()) {
            Ok(state) => state,
            Err(_) => decode_legacy(value)?,
        }
    } else {
        serde_json::from_value(value)?
    };
    state.normalize_history();
    Ok(state)
}

fn has_legacy_keys(value: &Value) -> bool {
    value.get("recurring_expenses").is_some() || value.get("account_balance_history").is_some()
}

fn decode_legacy(value: Value) -> Result<BudgetState> {
    let legacy: LegacyBudgetState = serde_json::from_value(value)?;
    tracing::debug!(
        "migrating legacy budget state to schema version {}",
        CURRENT_SCHEMA_VERSION
    );
    Ok(legacy.into_canonical())
}

/// The pre-versioning file shape, keyed in snake_case at the top level.
#[derive(Debug, Deserialize)]
struct LegacyBudgetState {
    #[serde(default)]
    recurring_expenses: Vec<LegacyExpense>,
    #[serde(default)]
    incomes: Vec<LegacyIncome>,
    #[serde(default)]
    account_balance_history: Vec<LegacySnapshot>,
}

#[derive(Debug, Deserialize)]
struct LegacyExpense {
    id: Uuid,
    label: String,
    amount: f64,
    recurring: LegacyRecurrence,
}

// Observed legacy files mix conventions: top-level keys and income totals
// are snake_case while recurrence fields and the income day keep camelCase,
// so every renamed field accepts both spellings.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LegacyRecurrence {
    Monthly {
        #[serde(alias = "dayOfMonth")]
        day_of_month: u32,
    },
    Weekly {
        #[serde(alias = "dayOfWeek")]
        day_of_week: u32,
    },
    Yearly {
        month: u32,
        #[serde(alias = "dayOfMonth")]
        day_of_month: u32,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct LegacyIncome {
    id: Uuid,
    name: String,
    #[serde(alias = "totalIn")]
    total_in: f64,
    #[serde(alias = "totalRetained")]
    total_retained: f64,
    #[serde(alias = "dayOfMonth")]
    day_of_month: u32,
}

#[derive(Debug, Deserialize)]
struct LegacySnapshot {
    date: NaiveDate,
    balance: f64,
}

impl LegacyBudgetState {
    fn into_canonical(self) -> BudgetState {
        BudgetState {
            recurring_expenses: self
                .recurring_expenses
                .into_iter()
                .map(|expense| Expense {
                    id: expense.id,
                    label: expense.label,
                    amount: expense.amount,
                    recurring: expense.recurring.into_canonical(),
                })
                .collect(),
            incomes: self
                .incomes
                .into_iter()
                .map(|income| Income {
                    id: income.id,
                    name: income.name,
                    total_in: income.total_in,
                    total_retained: income.total_retained,
                    day_of_month: income.day_of_month,
                })
                .collect(),
            balance_history: self
                .account_balance_history
                .into_iter()
                .map(|snapshot| BalanceSnapshot::new(snapshot.date, snapshot.balance))
                .collect(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl LegacyRecurrence {
    fn into_canonical(self) -> Recurrence {
        match self {
            LegacyRecurrence::Monthly { day_of_month } => Recurrence::Monthly { day_of_month },
            LegacyRecurrence::Weekly { day_of_week } => Recurrence::Weekly { day_of_week },
            LegacyRecurrence::Yearly {
                month,
                day_of_month,
            } => Recurrence::Yearly {
                month,
                day_of_month,
            },
            LegacyRecurrence::Unknown => Recurrence::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_state_loads_unchanged() {
        let json = r#"{
            "schemaVersion": 1,
            "recurringExpenses": [
                { "id": "00000000-0000-0000-0000-000000000001",
                  "label": "Rent", "amount": 800.0,
                  "recurring": { "type": "monthly", "dayOfMonth": 1 } }
            ],
            "incomes": [],
            "accountBalanceHistory": [
                { "date": "2024-01-01", "balance": 1000.0 }
            ]
        }"#;
        let state = from_json(json).expect("canonical load");
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.recurring_expenses.len(), 1);
        assert_eq!(
            state.recurring_expenses[0].recurring,
            Recurrence::Monthly { day_of_month: 1 }
        );
    }

    #[test]
    fn legacy_snake_case_state_is_migrated() {
        let json = r#"{
            "recurring_expenses": [
                { "id": "00000000-0000-0000-0000-000000000001",
                  "label": "Rent", "amount": 800.0,
                  "recurring": { "type": "monthly", "day_of_month": 31 } }
            ],
            "incomes": [
                { "id": "00000000-0000-0000-0000-000000000002",
                  "name": "Salary", "total_in": 2000.0,
                  "total_retained": 300.0, "day_of_month": 28 }
            ],
            "account_balance_history": [
                { "date": "2024-01-03", "balance": 900.0 },
                { "date": "2024-01-01", "balance": 1000.0 }
            ]
        }"#;
        let state = from_json(json).expect("legacy load");
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(
            state.recurring_expenses[0].recurring,
            Recurrence::Monthly { day_of_month: 31 }
        );
        assert_eq!(state.incomes[0].day_of_month, 28);
        // history sorted descending after migration
        assert_eq!(state.balance_history[0].balance, 900.0);
    }

    #[test]
    fn legacy_mixed_case_state_is_migrated() {
        // the shape real legacy files carry: snake_case top-level keys and
        // income totals, camelCase recurrence fields and income day
        let json = r#"{
            "recurring_expenses": [
                { "id": "00000000-0000-0000-0000-000000000001",
                  "label": "Rent", "amount": 800.0,
                  "recurring": { "type": "monthly", "dayOfMonth": 1 } },
                { "id": "00000000-0000-0000-0000-000000000003",
                  "label": "Coffee", "amount": 10.0,
                  "recurring": { "type": "weekly", "dayOfWeek": 2 } }
            ],
            "incomes": [
                { "id": "00000000-0000-0000-0000-000000000002",
                  "name": "Salary", "total_in": 2000.0,
                  "total_retained": 300.0, "dayOfMonth": 28 }
            ],
            "account_balance_history": [
                { "date": "2024-01-01", "balance": 1000.0 }
            ]
        }"#;
        let state = from_json(json).expect("mixed-case legacy load");
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(
            state.recurring_expenses[0].recurring,
            Recurrence::Monthly { day_of_month: 1 }
        );
        assert_eq!(
            state.recurring_expenses[1].recurring,
            Recurrence::Weekly { day_of_week: 2 }
        );
        assert_eq!(state.incomes[0].total_in, 2000.0);
        assert_eq!(state.incomes[0].day_of_month, 28);
    }

    #[test]
    fn legacy_incomes_only_file_falls_back_to_legacy_decode() {
        // no snake_case top-level key betrays this file's generation
        let json = r#"{
            "incomes": [
                { "id": "00000000-0000-0000-0000-000000000002",
                  "name": "Salary", "total_in": 2000.0,
                  "total_retained": 300.0, "dayOfMonth": 28 }
            ]
        }"#;
        let state = from_json(json).expect("incomes-only legacy load");
        assert_eq!(state.incomes.len(), 1);
        assert_eq!(state.incomes[0].total_in, 2000.0);
    }

    #[test]
    fn legacy_unknown_rule_survives_as_inert() {
        let json = r#"{
            "recurring_expenses": [
                { "id": "00000000-0000-0000-0000-000000000001",
                  "label": "Mystery", "amount": 5.0,
                  "recurring": { "type": "fortnightly" } }
            ]
        }"#;
        let state = from_json(json).expect("legacy load");
        assert_eq!(state.recurring_expenses[0].recurring, Recurrence::Unknown);
    }

    #[test]
    fn unversioned_camel_case_state_loads_as_canonical() {
        let json = r#"{
            "recurringExpenses": [],
            "incomes": [
                { "id": "00000000-0000-0000-0000-000000000002",
                  "name": "Salary", "totalIn": 2000.0,
                  "totalRetained": 300.0, "dayOfMonth": 28 }
            ],
            "accountBalanceHistory": []
        }"#;
        let state = from_json(json).expect("unversioned camelCase load");
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(state.incomes.len(), 1);
        assert_eq!(state.incomes[0].total_retained, 300.0);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let json = r#"{ "schemaVersion": 99 }"#;
        let err = from_json(json).unwrap_err();
        assert!(matches!(err, BudgetError::Storage(_)));
    }

    #[test]
    fn empty_object_is_an_empty_state() {
        let state = from_json("{}").expect("empty load");
        assert_eq!(state, BudgetState::default());
    }
}
