//! Outbound ports used by the relay endpoints and the contact form.
//!
//! Implementations live in `termfolio-interaction`.

use async_trait::async_trait;

use crate::error::Result;
use crate::relay::model::{ContactRequest, IpDetails, OutboundEmail};

/// Posts a `{"content": ...}` message to a chat webhook.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn send_content(&self, content: &str) -> Result<()>;
}

/// Delivers an email to the configured recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_email(&self, email: OutboundEmail) -> Result<()>;
}

/// Resolves an IP address to location and provider details.
#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> Result<IpDetails>;
}

/// Where a contact form submission goes.
#[async_trait]
pub trait ContactChannel: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<()>;
}
