use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::LeadError;
use crate::models::payload::SubmissionPayload;
use crate::services::transport::LeadTransport;

pub const DEFAULT_API_BASE_URL: &str = "https://api.medbankr.ai";

/// Client for the Medbankr waitlist API
#[derive(Clone)]
pub struct MedbankrClient {
    client: Client,
    base_url: String,
}

impl Default for MedbankrClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl MedbankrClient {
    /// Create a client talking to `base_url` (scheme and host, no trailing path)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a lead to its waitlist endpoint.
    ///
    /// The response body has to be JSON, but its contents are not used.
    pub async fn post_lead(&self, payload: &SubmissionPayload) -> Result<Value, LeadError> {
        let url = format!("{}{}", self.base_url, payload.endpoint().path());

        info!("Making request to register lead");
        debug!("API URL: {}", url);

        let res = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| LeadError::Network(err.to_string()))?;
        info!("Response received with status: {}", res.status());

        let status = res.status();
        if !status.is_success() {
            return Err(LeadError::Request {
                status: status.as_u16(),
            });
        }

        let body = res
            .json::<Value>()
            .await
            .map_err(|err| LeadError::Network(format!("invalid response body: {}", err)))?;
        debug!("Response body: {}", body);
        Ok(body)
    }
}

#[async_trait]
impl LeadTransport for MedbankrClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), LeadError> {
        self.post_lead(payload).await.map(|_| ())
    }
}
