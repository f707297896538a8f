/// Matcher Client — the single point of contact with the external matching service.
///
/// No other module issues outbound HTTP. Each upload produces exactly one POST;
/// failures are reported, never retried.
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::relay::payload::OutboundPayload;

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("Failed to reach the matching service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Matching service returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Matching service returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("Matching service returned an unexpected response: {0}")]
    UnexpectedShape(String),
}

/// Wraps the configured webhook URL and a shared HTTP client.
/// Cheap to clone; every relay invocation borrows the same connection pool.
#[derive(Clone)]
pub struct MatcherClient {
    client: Client,
    url: Url,
}

impl MatcherClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, MatcherError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Posts the payload as JSON and returns the parsed response body.
    /// Non-2xx responses carry their status and body text back to the caller.
    pub async fn submit(&self, payload: &OutboundPayload) -> Result<Value, MatcherError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        info!(status = status.as_u16(), bytes = body.len(), "Matching service responded");

        if !status.is_success() {
            return Err(MatcherError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Matching service body: {body}");
        serde_json::from_str(&body).map_err(MatcherError::Parse)
    }
}
