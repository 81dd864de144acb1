use crate::utils::error::DomainError;
use async_trait::async_trait;
use std::time::Duration;

/// Issues a single GET and hands back the raw response body.
///
/// Implementations never retry and never cache. Every failure is reported as
/// one of the [`DomainError`] kinds.
#[async_trait]
pub trait TransportClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn concurrent_requests(&self) -> usize;
}
