//! Relay request/response models and outbound message templates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

/// Contact form submission shared by the chat and email relays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        project: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            company: Some(company.into()),
            project: Some(project.into()),
            email: Some(email.into()),
        }
    }

    /// Multi-line summary posted as the webhook `content` field.
    pub fn webhook_content(&self) -> String {
        format!(
            "\n**New Contact Request**\n- Name: {}\n- Email: {}\n- Company: {}\n- Project: {}\n",
            or_unknown(&self.name),
            or_unknown(&self.email),
            or_unknown(&self.company),
            or_unknown(&self.project),
        )
    }

    /// Builds the notification email.
    pub fn to_email(&self) -> OutboundEmail {
        let (name, company, project, email) = (
            or_unknown(&self.name),
            or_unknown(&self.company),
            or_unknown(&self.project),
            or_unknown(&self.email),
        );
        OutboundEmail {
            subject: "New Contact Form Submission".to_string(),
            text: format!(
                "Name: {}\nCompany: {}\nProject: {}\nEmail: {}\n",
                name, company, project, email
            ),
            html: format!(
                "<h1>New Contact Form Submission</h1>\n\
                 <p><strong>Name:</strong> {}</p>\n\
                 <p><strong>Company:</strong> {}</p>\n\
                 <p><strong>Project:</strong> {}</p>\n\
                 <p><strong>Email:</strong> {}</p>\n",
                escape_html(name),
                escape_html(company),
                escape_html(project),
                escape_html(email)
            ),
        }
    }
}

/// A message handed to the mail transport. Sender and recipient are transport
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Free-form visitor report accepted by the fingerprint relay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FingerprintReport {
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Any other fields the page sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FingerprintReport {
    pub fn webhook_content(&self) -> String {
        let isp = match self.isp.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => "ISP information unavailable",
        };
        let coordinates = match self.coordinates {
            Some(c) => format!("- Coordinates: {}, {}", c.latitude, c.longitude),
            None => "- Coordinates: Not available".to_string(),
        };
        format!(
            "\n**Visitor Report**\n- Browser: {}\n- IP: {}\n- ISP: {}\n- Device: {}\n- OS: {}\n{}\n",
            or_unknown(&self.browser),
            or_unknown(&self.ip),
            isp,
            or_unknown(&self.device),
            or_unknown(&self.os),
            coordinates,
        )
    }
}

/// Answer of the IP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpDetails {
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
}

impl IpDetails {
    pub fn bare(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            location: None,
            isp: None,
        }
    }
}

/// HTTP-shaped answer of a relay endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayResponse {
    pub status: u16,
    pub body: Value,
}

impl RelayResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn message(status: u16, message: &str) -> Self {
        Self::new(status, serde_json::json!({ "message": message }))
    }

    pub fn error(status: u16, error: &str) -> Self {
        Self::new(status, serde_json::json!({ "error": error }))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_quotes() {
        assert_eq!(
            escape_html(r#"O'Brien "Bob" & <co>"#),
            "O&#39;Brien &quot;Bob&quot; &amp; &lt;co&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_contact_content_template() {
        let request = ContactRequest::new("Ada", "Analytical", "Engine", "ada@example.com");
        assert_eq!(
            request.webhook_content(),
            "\n**New Contact Request**\n- Name: Ada\n- Email: ada@example.com\n- Company: Analytical\n- Project: Engine\n"
        );
    }

    #[test]
    fn test_contact_missing_fields_are_unknown() {
        let request: ContactRequest = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        let content = request.webhook_content();
        assert!(content.contains("- Name: Unknown"));
        assert!(content.contains("- Project: Unknown"));
    }

    #[test]
    fn test_email_html_is_escaped() {
        let request = ContactRequest::new("<b>x</b>", "A&B", "p", "e@x.io");
        let email = request.to_email();
        assert_eq!(email.subject, "New Contact Form Submission");
        assert!(email.html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(email.html.contains("A&amp;B"));
        assert!(email.text.contains("Name: <b>x</b>"));
    }

    #[test]
    fn test_fingerprint_keeps_extra_fields() {
        let report: FingerprintReport = serde_json::from_str(
            r#"{"browser": "Firefox", "screen": "1920x1080", "coordinates": {"latitude": 19.07, "longitude": 72.87}}"#,
        )
        .unwrap();
        assert_eq!(report.extra.get("screen").unwrap(), "1920x1080");
        let content = report.webhook_content();
        assert!(content.contains("- Browser: Firefox"));
        assert!(content.contains("- ISP: ISP information unavailable"));
        assert!(content.contains("- Coordinates: 19.07, 72.87"));
    }

    #[test]
    fn test_fingerprint_without_coordinates() {
        let content = FingerprintReport::default().webhook_content();
        assert!(content.contains("- Coordinates: Not available"));
        assert!(content.contains("- OS: Unknown"));
    }

    #[test]
    fn test_ip_details_bare_skips_missing() {
        let json = serde_json::to_value(IpDetails::bare("1.2.3.4")).unwrap();
        assert_eq!(json, serde_json::json!({ "ip": "1.2.3.4" }));
    }
}
