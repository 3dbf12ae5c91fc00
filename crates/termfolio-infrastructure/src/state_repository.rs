//! State repository on top of a key/value store.

use async_trait::async_trait;
use std::sync::Arc;

use termfolio_core::error::Result;
use termfolio_core::state::{
    KeyValueStore, PersistedState, StateRepository, EASTER_EGG_KEY, POINTS_KEY, THEME_KEY,
};

/// Reads and writes [`PersistedState`] under the `theme`, `points` and
/// `easterEggFound` keys.
#[derive(Clone)]
pub struct KeyValueStateRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueStateRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StateRepository for KeyValueStateRepository {
    async fn load_state(&self) -> Result<PersistedState> {
        let mut raw = Vec::with_capacity(3);
        for key in [THEME_KEY, POINTS_KEY, EASTER_EGG_KEY] {
            if let Some(value) = self.store.get(key).await? {
                raw.push((key, value));
            }
        }

        let state = PersistedState::from_entries(
            |key| {
                raw.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| v.clone())
            },
            |key, value| {
                tracing::warn!(
                    "[Storage] Ignoring unparseable value for '{}': {:?}",
                    key,
                    value
                );
            },
        );
        tracing::debug!("[Storage] Restored state: {:?}", state);
        Ok(state)
    }

    async fn save_state(&self, state: &PersistedState) -> Result<()> {
        let entries = state.to_entries();
        let borrowed: Vec<(&str, String)> = entries
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        self.store.set_many(&borrowed).await
    }

    async fn reset_state(&self) -> Result<()> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use termfolio_core::state::Theme;

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let repo = KeyValueStateRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert_eq!(repo.load_state().await.unwrap(), PersistedState::default());
    }

    #[tokio::test]
    async fn test_save_writes_string_encoded_values() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValueStateRepository::new(store.clone());
        repo.save_state(&PersistedState {
            theme: Theme::Dark,
            points: 10,
            easter_egg_found: true,
        })
        .await
        .unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(snapshot.get("points").map(String::as_str), Some("10"));
        assert_eq!(
            snapshot.get("easterEggFound").map(String::as_str),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_garbage_points_default_to_zero() {
        let store = InMemoryKeyValueStore::with_entries([("points", "lots"), ("theme", "dark")]);
        let repo = KeyValueStateRepository::new(Arc::new(store));
        let state = repo.load_state().await.unwrap();
        assert_eq!(state.points, 0);
        assert_eq!(state.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_reset_forgets_everything() {
        let store = InMemoryKeyValueStore::with_entries([("points", "10")]);
        let repo = KeyValueStateRepository::new(Arc::new(store));
        repo.reset_state().await.unwrap();
        assert_eq!(repo.load_state().await.unwrap().points, 0);
    }
}
