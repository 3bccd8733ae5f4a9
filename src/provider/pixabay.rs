//! Pixabay image search API client.
//!
//! Builds `GET https://pixabay.com/api/` requests and decodes their JSON
//! responses. Transport is left to the caller: the plugin shim hands the
//! [`WebRequest`] to Zellij's `web_request` and passes the status and body of
//! the resulting `WebRequestResult` event to [`decode_response`].
//!
//! # Response Format
//!
//! ```json
//! {
//!   "total": 4692,
//!   "totalHits": 500,
//!   "hits": [
//!     {
//!       "id": 195893,
//!       "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
//!       "tags": "blossom, bloom, flower",
//!       "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
//!       "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
//!       "imageWidth": 4000,
//!       "imageHeight": 2250
//!     }
//!   ]
//! }
//! ```
//!
//! `totalHits` (the number of hits the API will actually serve) is used as the
//! session total rather than `total`.

use super::context::RequestContext;
use super::{ImageSearchProvider, WebRequest};
use crate::domain::{ImageBatch, ImageResult, Result, ZpixError};
use crate::search::FetchTag;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Default number of hits per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Smallest `per_page` the API accepts.
const MIN_PAGE_SIZE: u32 = 3;

/// Largest `per_page` the API accepts.
const MAX_PAGE_SIZE: u32 = 200;

/// Longest slice of an error body quoted in provider errors.
const ERROR_SNIPPET_LEN: usize = 120;

#[derive(Debug, Deserialize)]
struct PixabayResponse {
    #[serde(rename = "totalHits")]
    total_hits: u64,
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(default)]
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    tags: String,
    #[serde(rename = "pageURL", default)]
    page_url: Option<String>,
    #[serde(rename = "imageWidth", default)]
    image_width: Option<u32>,
    #[serde(rename = "imageHeight", default)]
    image_height: Option<u32>,
}

impl From<PixabayHit> for ImageResult {
    fn from(hit: PixabayHit) -> Self {
        Self {
            id: hit.id,
            preview_url: hit.webformat_url,
            full_size_url: hit.large_image_url,
            description: hit.tags,
            page_url: hit.page_url,
            width: hit.image_width,
            height: hit.image_height,
        }
    }
}

/// Pixabay-backed [`ImageSearchProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixabayProvider {
    api_key: Option<String>,
    base_url: String,
    page_size: u32,
}

impl Default for PixabayProvider {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PixabayProvider {
    /// Creates a provider. `page_size` is clamped to the range the API accepts.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zpix::provider::PixabayProvider;
    ///
    /// let provider = PixabayProvider::new(Some("key".to_string()), None, 1000);
    /// assert_eq!(provider.page_size(), 200);
    /// ```
    #[must_use]
    pub fn new(api_key: Option<String>, base_url: Option<String>, page_size: u32) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            page_size: page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Builds the request URL for one page of `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ZpixError::Config`] if no API key is configured.
    pub fn url_for(&self, query: &str, page: u32) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ZpixError::Config("api_key is not set".to_string()))?;

        let separator = if self.base_url.contains('?') { '&' } else { '?' };

        Ok(format!(
            "{base}{separator}q={query}&page={page}&key={key}&image_type=photo&orientation=horizontal&per_page={per_page}",
            base = self.base_url,
            query = urlencoding::encode(query),
            key = urlencoding::encode(key),
            per_page = self.page_size,
        ))
    }
}

impl ImageSearchProvider for PixabayProvider {
    #[tracing::instrument(level = "debug", skip(self), fields(query = %tag.query, page = tag.page))]
    fn build_request(&self, tag: &FetchTag) -> Result<WebRequest> {
        let url = self.url_for(&tag.query, tag.page)?;
        let context = RequestContext::capture(tag.clone()).to_map()?;

        let headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);

        Ok(WebRequest {
            url,
            headers,
            context,
        })
    }

    fn decode_response(&self, status: u16, body: &[u8]) -> Result<ImageBatch> {
        decode_response(status, body)
    }
}

/// Decodes a Pixabay response into an [`ImageBatch`].
///
/// # Errors
///
/// - [`ZpixError::Provider`] for non-2xx statuses (the API reports bad keys
///   and rate limiting this way, with a plain-text body)
/// - [`ZpixError::Decode`] if the body is not the expected JSON
pub fn decode_response(status: u16, body: &[u8]) -> Result<ImageBatch> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(body);
        let snippet: String = text.trim().chars().take(ERROR_SNIPPET_LEN).collect();
        return Err(ZpixError::Provider(format!("HTTP {status}: {snippet}")));
    }

    let response: PixabayResponse = serde_json::from_slice(body)?;

    tracing::debug!(
        total_hits = response.total_hits,
        hit_count = response.hits.len(),
        "decoded pixabay response"
    );

    Ok(ImageBatch::new(
        response.hits.into_iter().map(ImageResult::from).collect(),
        response.total_hits,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "total": 4692,
        "totalHits": 500,
        "hits": [
            {
                "id": 195893,
                "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                "type": "photo",
                "tags": "blossom, bloom, flower",
                "previewURL": "https://cdn.pixabay.com/photo/2013/10/15/09/12/flower-195893_150.jpg",
                "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                "imageWidth": 4000,
                "imageHeight": 2250,
                "views": 7671,
                "user": "Josch13"
            },
            {
                "webformatURL": "https://pixabay.com/get/b_640.jpg",
                "largeImageURL": "https://pixabay.com/get/b_1280.jpg"
            }
        ]
    }"#;

    #[test]
    fn decodes_hits_and_uses_total_hits() {
        let batch = decode_response(200, SAMPLE.as_bytes()).unwrap();

        assert_eq!(batch.total_matches, 500);
        assert_eq!(batch.items.len(), 2);

        let first = &batch.items[0];
        assert_eq!(first.id, 195_893);
        assert_eq!(first.preview_url, "https://pixabay.com/get/35bbf209e13e39d2_640.jpg");
        assert_eq!(first.full_size_url, "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg");
        assert_eq!(first.description, "blossom, bloom, flower");
        assert_eq!(first.dimensions().as_deref(), Some("4000x2250"));

        let second = &batch.items[1];
        assert_eq!(second.description, "");
        assert_eq!(second.page_url, None);
    }

    #[test]
    fn empty_hits_decode_to_empty_batch() {
        let batch = decode_response(200, br#"{"total":0,"totalHits":0,"hits":[]}"#).unwrap();
        assert!(batch.items.is_empty());
        assert_eq!(batch.total_matches, 0);
    }

    #[test]
    fn error_status_becomes_provider_error() {
        let err = decode_response(400, b"[ERROR 400] Invalid or missing API key").unwrap_err();
        match err {
            ZpixError::Provider(message) => {
                assert_eq!(message, "HTTP 400: [ERROR 400] Invalid or missing API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_becomes_decode_error() {
        let err = decode_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ZpixError::Decode(_)));
    }

    #[test]
    fn url_encodes_query_and_pins_parameters() {
        let provider = PixabayProvider::new(Some("abc123".to_string()), None, DEFAULT_PAGE_SIZE);
        let url = provider.url_for("red cars & bikes", 2).unwrap();

        assert_eq!(
            url,
            "https://pixabay.com/api/?q=red%20cars%20%26%20bikes&page=2&key=abc123\
             &image_type=photo&orientation=horizontal&per_page=12"
        );
    }

    #[test]
    fn base_url_with_query_string_appends_parameters() {
        let provider = PixabayProvider::new(
            Some("k".to_string()),
            Some("http://localhost:8080/api/?lang=en".to_string()),
            20,
        );
        let url = provider.url_for("cat", 1).unwrap();
        assert!(url.starts_with("http://localhost:8080/api/?lang=en&q=cat&page=1"));
        assert!(url.ends_with("per_page=20"));
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let provider = PixabayProvider::new(Some("  ".to_string()), None, 12);
        let err = provider.build_request(&FetchTag::new(1, "cat", 1)).unwrap_err();
        assert!(matches!(err, ZpixError::Config(_)));
    }

    #[test]
    fn request_carries_tag_in_context() {
        let provider = PixabayProvider::new(Some("k".to_string()), None, 12);
        let tag = FetchTag::new(4, "cat", 2);

        let request = provider.build_request(&tag).unwrap();

        let context = RequestContext::from_map(&request.context).unwrap();
        assert_eq!(context.tag, tag);
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }
}
