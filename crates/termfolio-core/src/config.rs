//! Configuration model (`config.toml`).

use serde::{Deserialize, Serialize};

use crate::portfolio::content::CONTACT_EMAIL;
use crate::session::ClearMode;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipapi.co";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub shell: ShellConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Target of `/api/chat`
    #[serde(default)]
    pub chat_webhook_url: Option<String>,
    /// Target of `/api/webhook`
    #[serde(default)]
    pub fingerprint_webhook_url: Option<String>,
    /// `/api/webhook` answers 404 unless this is set.
    #[serde(default)]
    pub enable_fingerprint_relay: bool,
    /// Proxy geolocation lookups from `/api/ip`
    #[serde(default = "default_true")]
    pub ip_geolocation: bool,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
    #[serde(default = "default_recipient")]
    pub email_recipient: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chat_webhook_url: None,
            fingerprint_webhook_url: None,
            enable_fingerprint_relay: false,
            ip_geolocation: true,
            ip_lookup_url: default_ip_lookup_url(),
            email_recipient: default_recipient(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_SMTP_PORT,
            user: None,
            pass: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Base URL of a running relay server, used by the contact forms
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    #[serde(default)]
    pub clear_mode: ClearMode,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            clear_mode: ClearMode::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ip_lookup_url() -> String {
    DEFAULT_IP_LOOKUP_URL.to_string()
}

fn default_recipient() -> String {
    CONTACT_EMAIL.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_relay_url() -> String {
    format!("http://{}", DEFAULT_BIND_ADDR)
}
