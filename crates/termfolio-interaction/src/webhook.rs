//! Chat webhook client (Discord-style `{"content": ...}` payloads).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::WebhookSender;

use crate::{request_failed, REQUEST_TIMEOUT};

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WebhookSender for WebhookClient {
    async fn send_content(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| request_failed("webhook", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::upstream(
                "webhook",
                format!("responded with status: {}", status.as_u16()),
            ));
        }

        tracing::debug!("[Webhook] Delivered {} bytes", content.len());
        Ok(())
    }
}
