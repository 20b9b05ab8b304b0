//! Catalog endpoint client.
//!
//! One GET per call, no retries. Only the transport status decides success;
//! the body is handed to the caller as the server's card objects.

use crate::types::{Card, CardPage};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .tcp_nodelay(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Network response was not ok ({0})")]
    Status(StatusCode),
    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of card pages. The terminal app talks to the HTTP implementation;
/// tests substitute their own.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Card>, FetchError>;
}

/// Catalog reached over HTTP(S) at a fixed base URL.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Per-request timeout. `None` waits for the server indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CatalogClient for HttpCatalog {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Card>, FetchError> {
        log::info!(
            "[catalog] GET {} page={} pageSize={}",
            self.base_url,
            page,
            page_size
        );

        let mut request = http_client()
            .get(&self.base_url)
            .query(&[("page", page), ("pageSize", page_size)]);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("[catalog] non-OK status {status}");
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let cards = decode_page(&body)?;
        log::info!("[catalog] received {} cards", cards.len());
        Ok(cards)
    }
}

/// Decode a 200 body into the card sequence, preserving server order.
///
/// A body without a `data` property decodes to an empty page. That hides a
/// contract violation upstream, so it is logged rather than rejected.
pub fn decode_page(body: &[u8]) -> Result<Vec<Card>, FetchError> {
    let page: CardPage = serde_json::from_slice(body)?;
    match page.data {
        Some(cards) => Ok(cards),
        None => {
            log::warn!("[catalog] response has no `data` property; showing an empty list");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_server_order() {
        let body = br#"{"data":[{"id":"b2","name":"Zubat"},{"id":"a1","name":"Abra"}]}"#;
        let cards = decode_page(body).unwrap();
        let ids: Vec<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b2", "a1"]);
    }

    #[test]
    fn decode_reads_optional_fields() {
        let body = br#"{"data":[{"id":"x","name":"Onix","type":"Fighting","rarity":"Common",
            "images":{"small":"https://img/x.png","large":"https://img/x_hires.png"},
            "hp":"90"}],"page":1,"pageSize":10}"#;
        let cards = decode_page(body).unwrap();
        assert_eq!(cards[0].card_type.as_deref(), Some("Fighting"));
        assert_eq!(cards[0].rarity.as_deref(), Some("Common"));
        assert_eq!(cards[0].small_image(), Some("https://img/x.png"));
    }

    #[test]
    fn missing_data_is_an_empty_page() {
        let cards = decode_page(br#"{"cards":[]}"#).unwrap();
        assert!(cards.is_empty());
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = decode_page(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(err.to_string().starts_with("Malformed catalog response"));
    }

    #[test]
    fn status_error_message_names_the_status() {
        let err = FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Network response was not ok (500 Internal Server Error)"
        );
    }
}
