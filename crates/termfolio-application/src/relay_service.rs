//! Relay endpoints: chat webhook, email, visitor report and IP lookup.
//!
//! Every operation answers with a [`RelayResponse`]; error detail is logged
//! here and never leaves the server.

use std::net::IpAddr;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use termfolio_core::relay::user_agent::{detect_browser, detect_os};
use termfolio_core::relay::{
    ContactRequest, FingerprintReport, IpLookup, MailTransport, RelayResponse, WebhookSender,
};
use termfolio_core::FolioError;

const CONFIG_ERROR: &str = "Server configuration error";
const WEBHOOK_ERROR: &str = "Error sending data to webhook";

/// Transport-neutral view of an incoming HTTP request.
#[derive(Debug, Clone, Default)]
pub struct RelayRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
    pub user_agent: Option<String>,
    pub forwarded_for: Option<String>,
    pub peer_addr: Option<String>,
}

impl RelayRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

#[derive(Default, Clone)]
pub struct RelayService {
    chat_webhook: Option<Arc<dyn WebhookSender>>,
    fingerprint_webhook: Option<Arc<dyn WebhookSender>>,
    fingerprint_enabled: bool,
    mailer: Option<Arc<dyn MailTransport>>,
    ip_lookup: Option<Arc<dyn IpLookup>>,
}

impl RelayService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_webhook(mut self, sender: Arc<dyn WebhookSender>) -> Self {
        self.chat_webhook = Some(sender);
        self
    }

    /// Enables `/api/webhook`. Without a sender it answers with a
    /// configuration error.
    pub fn with_fingerprint_relay(mut self, sender: Option<Arc<dyn WebhookSender>>) -> Self {
        self.fingerprint_enabled = true;
        self.fingerprint_webhook = sender;
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MailTransport>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_ip_lookup(mut self, lookup: Arc<dyn IpLookup>) -> Self {
        self.ip_lookup = Some(lookup);
        self
    }

    pub fn fingerprint_enabled(&self) -> bool {
        self.fingerprint_enabled
    }

    /// Routes a request to its endpoint.
    pub async fn dispatch(&self, request: RelayRequest) -> RelayResponse {
        match (request.method.as_str(), request.path.as_str()) {
            ("POST", "/api/chat") => match parse_body::<ContactRequest>(&request.body) {
                Ok(form) => self.relay_contact(&form).await,
                Err(response) => response,
            },
            ("POST", "/api/send-email") => match parse_body::<ContactRequest>(&request.body) {
                Ok(form) => self.send_email(&form).await,
                Err(response) => response,
            },
            ("POST", "/api/webhook") if self.fingerprint_enabled => {
                match parse_body::<FingerprintReport>(&request.body) {
                    Ok(report) => {
                        self.relay_fingerprint(report, request.user_agent.as_deref())
                            .await
                    }
                    Err(response) => response,
                }
            }
            ("GET", "/api/ip") => {
                self.lookup_ip(
                    request.forwarded_for.as_deref(),
                    request.peer_addr.as_deref(),
                )
                .await
            }
            (method, path) => {
                tracing::debug!("[Relay] No route for {} {}", method, path);
                RelayResponse::error(404, "Not found")
            }
        }
    }

    /// Forwards a contact request to the chat webhook.
    pub async fn relay_contact(&self, form: &ContactRequest) -> RelayResponse {
        let Some(webhook) = &self.chat_webhook else {
            tracing::error!("[Relay] Chat webhook URL is not configured");
            return RelayResponse::message(500, CONFIG_ERROR);
        };
        match webhook.send_content(&form.webhook_content()).await {
            Ok(()) => RelayResponse::message(200, "Data sent to webhook successfully"),
            Err(e) => {
                tracing::error!("[Relay] Chat webhook delivery failed: {}", e);
                RelayResponse::message(500, WEBHOOK_ERROR)
            }
        }
    }

    /// Emails a contact request to the site owner.
    pub async fn send_email(&self, form: &ContactRequest) -> RelayResponse {
        tracing::info!("[Relay] Contact email requested");
        let Some(mailer) = &self.mailer else {
            tracing::error!("[Relay] SMTP is not configured");
            return RelayResponse::error(500, "Failed to send email");
        };
        match mailer.send_email(form.to_email()).await {
            Ok(()) => {
                tracing::info!("[Relay] Email sent");
                RelayResponse::message(200, "Email sent successfully")
            }
            Err(e) => {
                tracing::error!("[Relay] Email delivery failed: {}", e);
                RelayResponse::error(500, "Failed to send email")
            }
        }
    }

    /// Forwards a visitor report. Delivery failures are logged only.
    pub async fn relay_fingerprint(
        &self,
        mut report: FingerprintReport,
        user_agent: Option<&str>,
    ) -> RelayResponse {
        if !self.fingerprint_enabled {
            return RelayResponse::error(404, "Not found");
        }
        let Some(webhook) = &self.fingerprint_webhook else {
            tracing::error!("[Relay] Fingerprint webhook URL is not configured");
            return RelayResponse::message(500, CONFIG_ERROR);
        };

        if let Some(ua) = user_agent {
            if report.browser.is_none() {
                report.browser = detect_browser(ua);
            }
            if report.os.is_none() {
                report.os = detect_os(ua);
            }
        }

        if let Err(e) = webhook.send_content(&report.webhook_content()).await {
            tracing::warn!("[Relay] Visitor report delivery failed: {}", e);
        }
        RelayResponse::message(200, "Report received")
    }

    /// Resolves the caller's address, geolocating it when a lookup is set.
    pub async fn lookup_ip(
        &self,
        forwarded_for: Option<&str>,
        peer_addr: Option<&str>,
    ) -> RelayResponse {
        let Some(ip) = client_ip(forwarded_for, peer_addr) else {
            return RelayResponse::error(400, "Unable to fetch IP");
        };

        let details = match &self.ip_lookup {
            Some(lookup) => match lookup.lookup(&ip).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::error!("[Relay] IP lookup for {} failed: {}", ip, e);
                    return RelayResponse::error(500, "Error fetching IP details");
                }
            },
            None => termfolio_core::relay::IpDetails::bare(ip),
        };

        match serde_json::to_value(&details) {
            Ok(body) => RelayResponse::new(200, body),
            Err(e) => {
                tracing::error!("[Relay] Failed to encode IP details: {}", e);
                RelayResponse::error(500, "Error fetching IP details")
            }
        }
    }
}

/// First `x-forwarded-for` entry, else the peer address.
///
/// Values that do not parse as an IP address are skipped, since the header
/// is client-controlled and ends up in the geolocation URL.
fn client_ip(forwarded_for: Option<&str>, peer_addr: Option<&str>) -> Option<String> {
    let parse = |raw: &str| raw.trim().parse::<IpAddr>().ok();
    let forwarded = forwarded_for
        .and_then(|header| header.split(',').next())
        .and_then(|first| {
            let ip = parse(first);
            if ip.is_none() && !first.trim().is_empty() {
                tracing::warn!("[Relay] Ignoring malformed x-forwarded-for: {:?}", first);
            }
            ip
        });
    forwarded
        .or_else(|| peer_addr.and_then(parse))
        .map(|ip| ip.to_string())
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RelayResponse> {
    serde_json::from_slice(body).map_err(|e| {
        let err: FolioError = e.into();
        tracing::warn!("[Relay] Rejected request body: {}", err);
        RelayResponse::message(400, "Invalid request")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use termfolio_core::error::Result;
    use termfolio_core::relay::{IpDetails, OutboundEmail};

    #[derive(Default)]
    struct RecordingWebhook {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl WebhookSender for RecordingWebhook {
        async fn send_content(&self, content: &str) -> Result<()> {
            self.sent.lock().unwrap().push(content.to_string());
            if self.fail {
                return Err(FolioError::upstream("webhook", "responded with status: 500"));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingMailer {
        async fn send_email(&self, email: OutboundEmail) -> Result<()> {
            if self.fail {
                return Err(FolioError::upstream("smtp", "connection refused"));
            }
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct FixedLookup(Option<IpDetails>);

    #[async_trait]
    impl IpLookup for FixedLookup {
        async fn lookup(&self, ip: &str) -> Result<IpDetails> {
            match &self.0 {
                Some(details) => Ok(IpDetails {
                    ip: ip.to_string(),
                    ..details.clone()
                }),
                None => Err(FolioError::upstream("ipapi", "timeout")),
            }
        }
    }

    fn form_body() -> Vec<u8> {
        br#"{"name":"Ada","company":"Analytical","project":"Engine","email":"ada@example.com"}"#
            .to_vec()
    }

    #[tokio::test]
    async fn test_chat_forwards_template() {
        let webhook = Arc::new(RecordingWebhook::default());
        let service = RelayService::new().with_chat_webhook(webhook.clone());

        let response = service
            .dispatch(RelayRequest::new("POST", "/api/chat").with_body(form_body()))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["message"], "Data sent to webhook successfully");
        let sent = webhook.sent.lock().unwrap();
        assert!(sent[0].contains("**New Contact Request**"));
        assert!(sent[0].contains("- Company: Analytical"));
    }

    #[tokio::test]
    async fn test_chat_without_webhook_is_config_error() {
        let response = RelayService::new()
            .dispatch(RelayRequest::new("POST", "/api/chat").with_body(form_body()))
            .await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["message"], "Server configuration error");
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_hides_detail() {
        let webhook = Arc::new(RecordingWebhook {
            fail: true,
            ..Default::default()
        });
        let response = RelayService::new()
            .with_chat_webhook(webhook)
            .relay_contact(&ContactRequest::default())
            .await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["message"], "Error sending data to webhook");
        assert!(!response.body.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let webhook = Arc::new(RecordingWebhook::default());
        let service = RelayService::new().with_chat_webhook(webhook.clone());
        let response = service
            .dispatch(RelayRequest::new("POST", "/api/chat").with_body("{not json"))
            .await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["message"], "Invalid request");
        assert!(webhook.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_email_success_and_failure() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = RelayService::new().with_mailer(mailer.clone());
        let ok = service
            .dispatch(RelayRequest::new("POST", "/api/send-email").with_body(form_body()))
            .await;
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body["message"], "Email sent successfully");
        assert_eq!(
            mailer.sent.lock().unwrap()[0].subject,
            "New Contact Form Submission"
        );

        let failing = RelayService::new().with_mailer(Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        }));
        let err = failing.send_email(&ContactRequest::default()).await;
        assert_eq!(err.status, 500);
        assert_eq!(err.body["error"], "Failed to send email");
    }

    #[tokio::test]
    async fn test_fingerprint_disabled_is_not_found() {
        let response = RelayService::new()
            .dispatch(RelayRequest::new("POST", "/api/webhook").with_body("{}"))
            .await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_fingerprint_fills_from_user_agent_and_ignores_failure() {
        let webhook = Arc::new(RecordingWebhook {
            fail: true,
            ..Default::default()
        });
        let service = RelayService::new().with_fingerprint_relay(Some(webhook.clone()));
        let mut request = RelayRequest::new("POST", "/api/webhook").with_body(r#"{"ip":"1.2.3.4"}"#);
        request.user_agent = Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into(),
        );

        let response = service.dispatch(request).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["message"], "Report received");
        let sent = webhook.sent.lock().unwrap();
        assert!(sent[0].contains("- OS: Windows"));
        assert!(sent[0].contains("- Coordinates: Not available"));
    }

    #[tokio::test]
    async fn test_fingerprint_without_target_is_config_error() {
        let response = RelayService::new()
            .with_fingerprint_relay(None)
            .relay_fingerprint(FingerprintReport::default(), None)
            .await;
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_ip_prefers_first_forwarded_entry() {
        let mut request = RelayRequest::new("GET", "/api/ip");
        request.forwarded_for = Some("203.0.113.7, 10.0.0.1".into());
        request.peer_addr = Some("127.0.0.1".into());

        let response = RelayService::new().dispatch(request).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["ip"], "203.0.113.7");
        assert!(response.body.get("location").is_none());
    }

    #[tokio::test]
    async fn test_ip_malformed_forwarded_entry_falls_back_to_peer() {
        let lookup = Arc::new(FixedLookup(Some(IpDetails::bare(""))));
        let service = RelayService::new().with_ip_lookup(lookup);
        let mut request = RelayRequest::new("GET", "/api/ip");
        request.forwarded_for = Some("8.8.8.8/json/?x=, 10.0.0.1".into());
        request.peer_addr = Some("198.51.100.2".into());

        let response = service.dispatch(request).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["ip"], "198.51.100.2");

        let response = service.lookup_ip(Some("../other"), None).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "Unable to fetch IP");
    }

    #[tokio::test]
    async fn test_ip_missing_everywhere_is_bad_request() {
        let response = RelayService::new().lookup_ip(None, None).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "Unable to fetch IP");
    }

    #[tokio::test]
    async fn test_ip_lookup_details_and_failure() {
        let found = RelayService::new().with_ip_lookup(Arc::new(FixedLookup(Some(IpDetails {
            ip: String::new(),
            location: Some("Oslo, Oslo, Norway".into()),
            isp: Some("Telenor".into()),
        }))));
        let response = found.lookup_ip(None, Some("198.51.100.2")).await;
        assert_eq!(response.body["location"], "Oslo, Oslo, Norway");
        assert_eq!(response.body["isp"], "Telenor");

        let broken = RelayService::new().with_ip_lookup(Arc::new(FixedLookup(None)));
        let response = broken.lookup_ip(None, Some("198.51.100.2")).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Error fetching IP details");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = RelayService::new()
            .dispatch(RelayRequest::new("GET", "/api/nope"))
            .await;
        assert_eq!(response.status, 404);
    }
}
