use crate::core::{CatalogRecord, CatalogResponse, TransportClient};
use crate::utils::error::DomainError;
use std::collections::HashSet;
use std::sync::Arc;

pub const CATALOG_PATH: &str = "appetizers";

/// Fetches the appetizer catalog from `<base>/appetizers`.
///
/// Results are not cached; every call goes to the network.
pub struct RecordFetcher<T: TransportClient> {
    transport: Arc<T>,
    endpoint: String,
}

impl<T: TransportClient> RecordFetcher<T> {
    pub fn new(transport: Arc<T>, base_url: &str) -> Self {
        Self {
            transport,
            endpoint: catalog_endpoint(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogRecord>, DomainError> {
        tracing::debug!("Fetching catalog from {}", self.endpoint);

        let body = self.transport.fetch(&self.endpoint).await.map_err(|e| {
            tracing::warn!("Catalog request failed: {}", e);
            e
        })?;

        let records = decode_catalog(&body)?;
        tracing::info!("Fetched {} catalog records", records.len());
        Ok(records)
    }
}

fn catalog_endpoint(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), CATALOG_PATH)
}

/// Decodes a catalog body, preserving server order.
///
/// Any shape mismatch, a negative or non-finite price, or a repeated id is
/// reported as [`DomainError::InvalidPayload`].
pub fn decode_catalog(body: &[u8]) -> Result<Vec<CatalogRecord>, DomainError> {
    let response: CatalogResponse = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Catalog body did not decode: {}", e);
        DomainError::invalid_payload(format!("catalog decode failed: {}", e))
    })?;

    let mut seen = HashSet::with_capacity(response.request.len());
    for record in &response.request {
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(DomainError::invalid_payload(format!(
                "record {} has invalid price {}",
                record.id, record.price
            )));
        }
        if !seen.insert(record.id) {
            return Err(DomainError::invalid_payload(format!(
                "duplicate record id {}",
                record.id
            )));
        }
    }

    Ok(response.request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SPRING_ROLL: &str = r#"{"request":[{"id":1,"name":"Spring Roll","description":"d","price":5.5,"imageURL":"http://x/img1.png","calories":100,"protein":2,"carbs":10}]}"#;

    struct StubTransport {
        responses: HashMap<String, Result<Vec<u8>, DomainError>>,
        requested: Mutex<Vec<String>>,
    }

    impl StubTransport {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn respond(mut self, url: &str, response: Result<Vec<u8>, DomainError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }
    }

    #[async_trait]
    impl TransportClient for StubTransport {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .unwrap_or(Err(DomainError::InvalidResponse { status: 404 }))
        }
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let transport = Arc::new(StubTransport::new());
        let with_slash = RecordFetcher::new(Arc::clone(&transport), "https://api.test/v1/");
        let without_slash = RecordFetcher::new(transport, "https://api.test/v1");

        assert_eq!(with_slash.endpoint(), "https://api.test/v1/appetizers");
        assert_eq!(without_slash.endpoint(), "https://api.test/v1/appetizers");
    }

    #[tokio::test]
    async fn test_fetch_catalog_decodes_records() {
        let transport = Arc::new(
            StubTransport::new().respond("base/appetizers", Ok(SPRING_ROLL.as_bytes().to_vec())),
        );
        let fetcher = RecordFetcher::new(Arc::clone(&transport), "base");

        let records = fetcher.fetch_catalog().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].name, "Spring Roll");
        assert_eq!(records[0].price, 5.5);
        assert_eq!(
            *transport.requested.lock().unwrap(),
            vec!["base/appetizers".to_string()]
        );
    }

    #[tokio::test]
    async fn test_request_not_an_array_is_invalid_payload() {
        let transport = Arc::new(StubTransport::new().respond(
            "base/appetizers",
            Ok(br#"{"request": "not-an-array"}"#.to_vec()),
        ));
        let fetcher = RecordFetcher::new(transport, "base");

        let err = fetcher.fetch_catalog().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload);
    }

    #[tokio::test]
    async fn test_transport_errors_pass_through() {
        let transport = Arc::new(StubTransport::new().respond(
            "base/appetizers",
            Err(DomainError::InvalidResponse { status: 500 }),
        ));
        let fetcher = RecordFetcher::new(transport, "base");

        assert_eq!(
            fetcher.fetch_catalog().await.unwrap_err(),
            DomainError::InvalidResponse { status: 500 }
        );
    }

    #[tokio::test]
    async fn test_fetch_is_not_cached() {
        let transport = Arc::new(
            StubTransport::new().respond("base/appetizers", Ok(SPRING_ROLL.as_bytes().to_vec())),
        );
        let fetcher = RecordFetcher::new(Arc::clone(&transport), "base");

        fetcher.fetch_catalog().await.unwrap();
        fetcher.fetch_catalog().await.unwrap();

        assert_eq!(transport.requested.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_preserves_server_order() {
        let body = r#"{"request":[
            {"id":3,"name":"c","description":"","price":1,"imageURL":"u3","calories":0,"protein":0,"carbs":0},
            {"id":1,"name":"a","description":"","price":2,"imageURL":"u1","calories":0,"protein":0,"carbs":0},
            {"id":2,"name":"b","description":"","price":0,"imageURL":"u2","calories":0,"protein":0,"carbs":0}
        ]}"#;

        let ids: Vec<i64> = decode_catalog(body.as_bytes())
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_decode_empty_catalog() {
        assert!(decode_catalog(br#"{"request":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        let cases: [&[u8]; 5] = [
            b"not json",
            br#"{}"#,
            br#"[{"id":1}]"#,
            br#"{"request":[{"id":1,"name":"a","description":"","price":1,"imageURL":"u","calories":0,"protein":0}]}"#,
            br#"{"request":[{"id":"1","name":"a","description":"","price":1,"imageURL":"u","calories":0,"protein":0,"carbs":0}]}"#,
        ];

        for body in cases {
            let err = decode_catalog(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPayload);
        }
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let body = br#"{"request":[{"id":1,"name":"a","description":"","price":-0.5,"imageURL":"u","calories":0,"protein":0,"carbs":0}]}"#;

        let err = decode_catalog(body).unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let body = br#"{"request":[
            {"id":1,"name":"a","description":"","price":1,"imageURL":"u","calories":0,"protein":0,"carbs":0},
            {"id":1,"name":"b","description":"","price":2,"imageURL":"v","calories":0,"protein":0,"carbs":0}
        ]}"#;

        let err = decode_catalog(body).unwrap_err();
        assert_eq!(err, DomainError::invalid_payload("duplicate record id 1"));
    }
}
