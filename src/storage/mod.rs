pub mod json_backend;
pub mod migration;

use crate::{budget::BudgetState, errors::BudgetError};

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Abstraction over persistence backends holding the serialized budget state.
pub trait StorageBackend: Send + Sync {
    fn save(&self, state: &BudgetState) -> Result<()>;

    /// Returns `None` when nothing has been persisted yet; callers default
    /// to an empty state.
    fn load(&self) -> Result<Option<BudgetState>>;
}

pub use json_backend::JsonStorage;
