//! Outbound adapters: chat webhooks, SMTP, IP geolocation and the relay
//! client used by the shell's contact forms.

pub mod contact_channel;
pub mod ip_lookup;
pub mod mailer;
pub mod webhook;

pub use contact_channel::{ContactRoute, HttpContactChannel};
pub use ip_lookup::IpApiClient;
pub use mailer::SmtpMailer;
pub use webhook::WebhookClient;

use std::time::Duration;

use termfolio_core::error::FolioError;

/// Default ceiling for every outbound HTTP request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn request_failed(target: &str, err: reqwest::Error) -> FolioError {
    if err.is_timeout() {
        FolioError::upstream(target, "request timed out")
    } else {
        FolioError::upstream(target, format!("request failed: {err}"))
    }
}
