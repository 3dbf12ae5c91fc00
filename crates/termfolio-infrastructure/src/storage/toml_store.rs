//! File-backed key/value store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use termfolio_core::error::{FolioError, Result};
use termfolio_core::state::KeyValueStore;

use super::atomic_toml::AtomicTomlFile;

type Table = BTreeMap<String, String>;

/// Stores every key as a string in one TOML table.
///
/// Blocking file work runs on the blocking pool.
#[derive(Clone)]
pub struct TomlKeyValueStore {
    file: Arc<AtomicTomlFile<Table>>,
}

impl TomlKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<Table>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| FolioError::internal(format!("Failed to join storage task: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for TomlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            let table = file.load()?.unwrap_or_default();
            Ok(table.get(&key).cloned())
        })
        .await
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let owned: Vec<(String, String)> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.blocking(move |file| {
            file.update(Table::new(), |table| table.extend(owned))?;
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| {
            file.update(Table::new(), |table| table.clear())?;
            Ok(())
        })
        .await
    }
}
