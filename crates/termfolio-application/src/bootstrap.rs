//! Wiring of concrete adapters from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use termfolio_core::config::RootConfig;
use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::WebhookSender;
use termfolio_core::state::StateRepository;
use termfolio_infrastructure::{
    FolioPaths, InMemoryKeyValueStore, KeyValueStateRepository, TomlKeyValueStore,
};
use termfolio_interaction::{IpApiClient, SmtpMailer, WebhookClient};

use crate::relay_service::RelayService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    /// `<config_dir>/termfolio/storage.toml`
    Default,
    File(PathBuf),
    /// Nothing outlives the process.
    Ephemeral,
}

pub fn open_state_repository(mode: StorageMode) -> Result<Arc<dyn StateRepository>> {
    let repository = match mode {
        StorageMode::Ephemeral => {
            tracing::info!("[Bootstrap] Using in-memory storage");
            KeyValueStateRepository::new(Arc::new(InMemoryKeyValueStore::new()))
        }
        StorageMode::Default => {
            let path = FolioPaths::storage_file().map_err(|e| FolioError::config(e.to_string()))?;
            tracing::info!("[Bootstrap] Using storage at {}", path.display());
            KeyValueStateRepository::new(Arc::new(TomlKeyValueStore::new(path)))
        }
        StorageMode::File(path) => {
            tracing::info!("[Bootstrap] Using storage at {}", path.display());
            KeyValueStateRepository::new(Arc::new(TomlKeyValueStore::new(path)))
        }
    };
    Ok(Arc::new(repository))
}

/// Builds the relay service. Missing settings leave the matching endpoint
/// answering with its configuration error instead of failing startup.
pub fn build_relay_service(config: &RootConfig) -> RelayService {
    let relay = &config.relay;
    let mut service = RelayService::new();

    match &relay.chat_webhook_url {
        Some(url) => service = service.with_chat_webhook(Arc::new(WebhookClient::new(url))),
        None => tracing::warn!("[Bootstrap] CHAT_WEBHOOK_URL not set, /api/chat will fail"),
    }

    match SmtpMailer::from_config(&config.smtp, &relay.email_recipient) {
        Ok(mailer) => service = service.with_mailer(Arc::new(mailer)),
        Err(e) => tracing::warn!("[Bootstrap] Email relay disabled: {}", e),
    }

    if relay.enable_fingerprint_relay {
        tracing::warn!(
            "[Bootstrap] Visitor report relay is ENABLED; browser, IP and location data will be forwarded"
        );
        let sender = relay
            .fingerprint_webhook_url
            .as_ref()
            .map(|url| Arc::new(WebhookClient::new(url)) as Arc<dyn WebhookSender>);
        service = service.with_fingerprint_relay(sender);
    }

    if relay.ip_geolocation {
        service = service.with_ip_lookup(Arc::new(IpApiClient::new(&relay.ip_lookup_url)));
    }

    service
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_leaves_fingerprint_disabled() {
        let service = build_relay_service(&RootConfig::default());
        assert!(!service.fingerprint_enabled());
    }

    #[tokio::test]
    async fn test_opt_in_enables_fingerprint() {
        let mut config = RootConfig::default();
        config.relay.enable_fingerprint_relay = true;
        assert!(build_relay_service(&config).fingerprint_enabled());
    }

    #[tokio::test]
    async fn test_ephemeral_repository_starts_empty() {
        let repo = open_state_repository(StorageMode::Ephemeral).unwrap();
        assert_eq!(repo.load_state().await.unwrap().points, 0);
    }
}
