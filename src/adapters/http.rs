use crate::domain::ports::TransportClient;
use crate::utils::error::{DomainError, Result};
use crate::utils::validation::parse_http_url;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`TransportClient`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// The timeout covers the whole request, body included. Expiry is
    /// reported as [`DomainError::TransportFailure`].
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn parse_endpoint(url: &str) -> std::result::Result<Url, DomainError> {
    parse_http_url(url).map_err(|reason| {
        tracing::debug!("Rejected endpoint {:?}: {}", url, reason);
        DomainError::InvalidEndpoint {
            url: url.to_string(),
        }
    })
}

#[async_trait]
impl TransportClient for ReqwestTransport {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, DomainError> {
        let endpoint = parse_endpoint(url)?;

        tracing::debug!("GET {}", endpoint);
        let response = self.client.get(endpoint).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", url, e);
            DomainError::transport_failure(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!("Response status from {}: {}", url, status);
        if status != StatusCode::OK {
            return Err(DomainError::InvalidResponse {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport_failure(format!("reading body: {}", e)))?;

        if body.is_empty() {
            return Err(DomainError::invalid_payload("empty response body"));
        }

        Ok(body.to_vec())
    }
}
