//! Relay client used by the contact and chat forms.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::{ContactChannel, ContactRequest};

use crate::{request_failed, REQUEST_TIMEOUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRoute {
    /// `/api/chat`, forwarded to the chat webhook
    Chat,
    /// `/api/send-email`, delivered over SMTP
    Email,
}

impl ContactRoute {
    pub fn path(self) -> &'static str {
        match self {
            ContactRoute::Chat => "/api/chat",
            ContactRoute::Email => "/api/send-email",
        }
    }
}

/// Posts form submissions to a running relay server.
#[derive(Clone)]
pub struct HttpContactChannel {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpContactChannel {
    pub fn new(relay_url: &str, route: ContactRoute) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", relay_url.trim_end_matches('/'), route.path()),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactChannel for HttpContactChannel {
    async fn submit(&self, request: &ContactRequest) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| request_failed("relay", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::upstream(
                "relay",
                format!("responded with status: {}", status.as_u16()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let channel = HttpContactChannel::new("http://127.0.0.1:8787/", ContactRoute::Email);
        assert_eq!(channel.endpoint(), "http://127.0.0.1:8787/api/send-email");
    }
}
