//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` (optional) and layers
//! environment overrides on top.

use crate::paths::FolioPaths;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use termfolio_core::config::RootConfig;
use termfolio_core::error::{FolioError, Result};

/// Loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Self {
        Self {
            path: FolioPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading it on first access.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn get_config(&self) -> Result<RootConfig> {
        if let Ok(guard) = self.config.read() {
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }

        let from_file = match &self.path {
            Some(path) => Self::load_file(path)?,
            None => {
                tracing::warn!("[Config] No config directory available, using defaults");
                RootConfig::default()
            }
        };
        let loaded = apply_env_overrides(from_file, |key| std::env::var(key).ok());

        if let Ok(mut guard) = self.config.write() {
            *guard = Some(loaded.clone());
        }
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut guard) = self.config.write() {
            *guard = None;
        }
    }

    fn load_file(path: &PathBuf) -> Result<RootConfig> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[Config] {} not found, using defaults", path.display());
                return Ok(RootConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content).map_err(|e| {
            FolioError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Applies environment overrides to a loaded configuration.
///
/// Empty values are ignored so an exported-but-blank variable does not
/// erase a file setting.
pub fn apply_env_overrides<F>(mut config: RootConfig, get_env: F) -> RootConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get("CHAT_WEBHOOK_URL") {
        config.relay.chat_webhook_url = Some(url);
    }
    if let Some(url) = get("DISCORD_WEBHOOK_URL") {
        config.relay.fingerprint_webhook_url = Some(url);
    }
    if let Some(host) = get("SMTP_HOST") {
        config.smtp.host = Some(host);
    }
    if let Some(port) = get("SMTP_PORT") {
        match port.trim().parse() {
            Ok(port) => config.smtp.port = port,
            Err(_) => tracing::warn!("[Config] Ignoring invalid SMTP_PORT: {}", port),
        }
    }
    if let Some(user) = get("SMTP_USER") {
        config.smtp.user = Some(user);
    }
    if let Some(pass) = get("SMTP_PASS") {
        config.smtp.pass = Some(pass);
    }
    if let Some(url) = get("TERMFOLIO_RELAY_URL") {
        config.shell.relay_url = url;
    }
    if let Some(bind) = get("TERMFOLIO_BIND") {
        config.server.bind_addr = bind;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_win() {
        let config = apply_env_overrides(
            RootConfig::default(),
            env(&[
                ("CHAT_WEBHOOK_URL", "https://hooks.example/chat"),
                ("SMTP_HOST", "smtp.example.com"),
                ("SMTP_PORT", "465"),
                ("TERMFOLIO_BIND", "0.0.0.0:9000"),
            ]),
        );
        assert_eq!(
            config.relay.chat_webhook_url.as_deref(),
            Some("https://hooks.example/chat")
        );
        assert_eq!(config.smtp.host.as_deref(), Some("smtp.example.com"));
        assert_eq!(config.smtp.port, 465);
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_bad_port_and_blank_values_are_ignored() {
        let mut base = RootConfig::default();
        base.smtp.user = Some("me".into());
        let config = apply_env_overrides(base, env(&[("SMTP_PORT", "abc"), ("SMTP_USER", " ")]));
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.user.as_deref(), Some("me"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));
        let config = service.get_config().unwrap();
        assert!(!config.relay.enable_fingerprint_relay);
    }

    #[test]
    fn test_file_values_are_loaded_and_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[relay]\nenable_fingerprint_relay = true\n[shell]\nclear_mode = \"welcome\"\n",
        )
        .unwrap();
        let service = ConfigService::with_path(path.clone());
        assert!(service.get_config().unwrap().relay.enable_fingerprint_relay);

        std::fs::write(&path, "[relay]\nenable_fingerprint_relay = false\n").unwrap();
        assert!(service.get_config().unwrap().relay.enable_fingerprint_relay);
        service.invalidate_cache();
        assert!(!service.get_config().unwrap().relay.enable_fingerprint_relay);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[relay\n").unwrap();
        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_config());
    }
}
