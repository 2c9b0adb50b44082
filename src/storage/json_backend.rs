use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{budget::BudgetState, utils};

use super::{migration, Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Stores the budget state as a single pretty-printed JSON file, written
/// atomically by staging to a temporary sibling and renaming.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the managed data directory (`~/.forecast_core/budget.json`).
    pub fn new_default() -> Self {
        Self::new(utils::budget_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, state: &BudgetState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "budget state saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<BudgetState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let state = migration::from_json(&data)?;
        Ok(Some(state))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{Expense, Recurrence};
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().join("budget.json"));
        (storage, temp)
    }

    #[test]
    fn load_before_first_save_is_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load().expect("load").is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut state = BudgetState::default();
        state.upsert_expense(Expense::new(
            "Rent",
            800.0,
            Recurrence::Monthly { day_of_month: 1 },
        ));
        storage.save(&state).expect("save state");
        assert!(storage.path().exists());
        let loaded = storage.load().expect("load state").expect("state present");
        assert_eq!(loaded, state);
    }

    #[test]
    fn save_replaces_existing_file() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut state = BudgetState::default();
        storage.save(&state).expect("first save");
        state.upsert_expense(Expense::new(
            "Gym",
            30.0,
            Recurrence::Weekly { day_of_week: 3 },
        ));
        storage.save(&state).expect("second save");
        let loaded = storage.load().expect("load state").expect("state present");
        assert_eq!(loaded.recurring_expenses.len(), 1);
    }
}
