//! HTTP implementation of the metadata lookup

use super::{LookupResult, MetadataLookup};
use crate::types::{BookMetadata, Isbn};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("shelfscan/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire shape of the lookup service's reply
#[derive(Debug, Deserialize)]
struct LookupResponse {
    success: bool,
    data: Option<BookMetadata>,
    error: Option<String>,
}

/// Lookup client talking to the book metadata service over HTTP.
///
/// Issues one GET per call, keyed by the identifier. The request timeout is
/// configured once at construction; individual calls cannot override it.
pub struct HttpLookupClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLookupClient {
    /// Create a client for the service at `base_url` (no trailing slash
    /// required; one is trimmed if present).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl MetadataLookup for HttpLookupClient {
    async fn lookup(&self, isbn: &Isbn) -> LookupResult {
        let url = format!("{}/api/lookup/{}", self.base_url, isbn);

        tracing::debug!(isbn = %isbn, url = %url, "Querying metadata service");

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(isbn = %isbn, error = %e, "Metadata request failed");
                return LookupResult::TransportError {
                    detail: e.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(isbn = %isbn, status = %status, "Metadata service returned failure status");
            return LookupResult::TransportError {
                detail: format!("service responded with status {}", status),
            };
        }

        let body: LookupResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(isbn = %isbn, error = %e, "Undecodable metadata response");
                return LookupResult::TransportError {
                    detail: format!("malformed service response: {}", e),
                };
            }
        };

        classify(body, isbn)
    }
}

/// Map a decoded service reply into the result union.
///
/// A reply only counts as success if it reports success and carries a
/// non-empty title; anything else from a 2xx body is a negative result, not
/// a transport failure.
fn classify(body: LookupResponse, isbn: &Isbn) -> LookupResult {
    if let Some(error) = &body.error {
        tracing::debug!(isbn = %isbn, error = %error, "Service reported lookup error");
    }

    match body.data {
        Some(metadata) if body.success && !metadata.title.is_empty() => {
            tracing::info!(isbn = %isbn, title = %metadata.title, "Resolved metadata");
            LookupResult::Success(metadata)
        }
        _ => LookupResult::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::normalize;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn isbn() -> Isbn {
        normalize("9780596520687").unwrap()
    }

    /// Serve exactly one connection with a canned HTTP response
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn response(json: &str) -> LookupResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = HttpLookupClient::new("http://localhost:3000/");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_transport_error() {
        // Bind to grab a free port, then drop so nothing listens on it
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpLookupClient::new(format!("http://{}", addr)).unwrap();

        match client.lookup(&isbn()).await {
            LookupResult::TransportError { detail } => assert!(!detail.is_empty()),
            other => panic!("expected TransportError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_status_maps_to_transport_error() {
        let base_url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
        )
        .await;

        let client = HttpLookupClient::new(base_url).unwrap();

        match client.lookup(&isbn()).await {
            LookupResult::TransportError { detail } => assert!(detail.contains("500")),
            other => panic!("expected TransportError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_transport_error() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\nConnection: close\r\nContent-Type: application/json\r\nContent-Length: 8\r\n\r\nnot json",
        )
        .await;

        let client = HttpLookupClient::new(base_url).unwrap();

        match client.lookup(&isbn()).await {
            LookupResult::TransportError { detail } => assert!(detail.contains("malformed")),
            other => panic!("expected TransportError, got {:?}", other),
        }
    }

    #[test]
    fn success_with_title_is_success() {
        let body = response(r#"{"success":true,"data":{"title":"Programming JavaScript"}}"#);

        match classify(body, &isbn()) {
            LookupResult::Success(metadata) => {
                assert_eq!(metadata.title, "Programming JavaScript");
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[test]
    fn success_without_title_is_not_found() {
        let body = response(r#"{"success":true,"data":{"title":""}}"#);
        assert_eq!(classify(body, &isbn()), LookupResult::NotFound);
    }

    #[test]
    fn success_without_data_is_not_found() {
        let body = response(r#"{"success":true}"#);
        assert_eq!(classify(body, &isbn()), LookupResult::NotFound);
    }

    #[test]
    fn reported_failure_is_not_found() {
        let body = response(r#"{"success":false,"error":"no record"}"#);
        assert_eq!(classify(body, &isbn()), LookupResult::NotFound);
    }

    #[test]
    fn data_without_success_flag_is_not_found() {
        // A record the service itself does not vouch for is not a match
        let body = response(r#"{"success":false,"data":{"title":"Dune"}}"#);
        assert_eq!(classify(body, &isbn()), LookupResult::NotFound);
    }

    #[test]
    fn full_record_deserializes() {
        let body = response(
            r#"{
                "success": true,
                "data": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "isbn": "9780441013593",
                    "publisher": "Ace",
                    "language": "en",
                    "format": "paperback",
                    "cover_url": "https://covers.example/dune.jpg",
                    "published_date": "1965",
                    "page_count": 412,
                    "average_rating": 4.3,
                    "ratings_count": 1000000
                }
            }"#,
        );

        match classify(body, &isbn()) {
            LookupResult::Success(metadata) => {
                assert_eq!(metadata.authors, vec!["Frank Herbert"]);
                assert_eq!(metadata.page_count, Some(412));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }
}
