use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    infra::{config::AvailabilityConfig, error::AppError},
    usecases::contracts::{AvailabilityError, AvailabilityReport, AvailabilitySource},
};

const USER_AGENT: &str = concat!("domain-finder/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the WhoisXML domain availability API.
pub struct WhoisXmlClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    credits: String,
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(rename = "DomainInfo")]
    domain_info: Option<DomainInfo>,
}

#[derive(Debug, Deserialize)]
struct DomainInfo {
    #[serde(rename = "domainAvailability")]
    domain_availability: Option<String>,
}

impl WhoisXmlClient {
    pub fn new(config: &AvailabilityConfig) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(AppError::HttpClientInit)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            credits: config.credits.clone(),
        })
    }

    async fn do_check(&self, domain: &str) -> Result<AvailabilityReport, AvailabilityError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("credits", self.credits.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvailabilityError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        parse_availability(&body)
    }
}

#[async_trait]
impl AvailabilitySource for WhoisXmlClient {
    async fn check(&self, domain: &str) -> Result<AvailabilityReport, AvailabilityError> {
        self.do_check(domain).await
    }
}

// The request URL carries the API key, so it is stripped before the error
// is rendered anywhere.
fn transport_error(error: reqwest::Error) -> AvailabilityError {
    AvailabilityError::Transport(error.without_url().to_string())
}

fn parse_availability(body: &[u8]) -> Result<AvailabilityReport, AvailabilityError> {
    let parsed: AvailabilityResponse = serde_json::from_slice(body)
        .map_err(|error| AvailabilityError::Decode(error.to_string()))?;

    Ok(AvailabilityReport {
        status: parsed
            .domain_info
            .and_then(|info| info.domain_availability),
    })
}
