//! ipapi.co geolocation client.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use termfolio_core::error::{FolioError, Result};
use termfolio_core::relay::{IpDetails, IpLookup};

use crate::{request_failed, REQUEST_TIMEOUT};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    org: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

impl IpApiResponse {
    fn into_details(self, queried: &str) -> IpDetails {
        let parts: Vec<String> = [self.city, self.region, self.country_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        IpDetails {
            ip: self.ip.unwrap_or_else(|| queried.to_string()),
            location: (!parts.is_empty()).then(|| parts.join(", ")),
            isp: self.org,
        }
    }
}

#[derive(Clone)]
pub struct IpApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl IpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl IpLookup for IpApiClient {
    async fn lookup(&self, ip: &str) -> Result<IpDetails> {
        // Only a literal address may become a path segment.
        let addr: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| FolioError::upstream("ipapi", format!("not an IP address: {ip:?}")))?;
        let url = format!("{}/{}/json/", self.base_url, addr);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| request_failed("ipapi", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::upstream(
                "ipapi",
                format!("responded with status: {}", status.as_u16()),
            ));
        }

        let parsed: IpApiResponse = response
            .json()
            .await
            .map_err(|err| FolioError::upstream("ipapi", format!("invalid body: {err}")))?;
        if parsed.error {
            return Err(FolioError::upstream(
                "ipapi",
                parsed.reason.unwrap_or_else(|| "lookup refused".into()),
            ));
        }
        Ok(parsed.into_details(&addr.to_string()))
    }
}
