//! Storage traits for persisted visitor state.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::PersistedState;

/// Durable string key/value storage, the local-storage analogue.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a key. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes several keys as one update.
    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes every key.
    async fn clear(&self) -> Result<()>;
}

/// Repository for the state carried between sessions.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Loads the persisted state, defaulting absent or invalid fields.
    async fn load_state(&self) -> Result<PersistedState>;

    /// Saves the full persisted state.
    async fn save_state(&self, state: &PersistedState) -> Result<()>;

    /// Forgets everything that was persisted.
    async fn reset_state(&self) -> Result<()>;
}
