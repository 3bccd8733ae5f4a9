//! Image search provider boundary.
//!
//! Zellij plugins cannot block on network I/O. A fetch is therefore split in
//! two halves: [`ImageSearchProvider::build_request`] describes the HTTP
//! request (the shim hands it to Zellij's `web_request`), and
//! [`ImageSearchProvider::decode_response`] turns the `WebRequestResult` that
//! eventually arrives into an [`ImageBatch`]. The request's
//! [`FetchTag`](crate::search::FetchTag) travels in the web request context
//! so the response can be matched to the request that caused it.
//!
//! # Modules
//!
//! - [`pixabay`]: Pixabay API client
//! - [`context`]: Round-trip context codec and trace propagation

pub mod context;
pub mod pixabay;

pub use context::{RequestContext, TraceContext};
pub use pixabay::PixabayProvider;

use crate::domain::{ImageBatch, Result};
use crate::search::FetchTag;
use std::collections::BTreeMap;

/// An HTTP GET ready to be issued through Zellij.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Returned verbatim with the response.
    pub context: BTreeMap<String, String>,
}

/// Source of image search results.
pub trait ImageSearchProvider: std::fmt::Debug {
    /// Describes the request for the page identified by `tag`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built (e.g. missing API key).
    fn build_request(&self, tag: &FetchTag) -> Result<WebRequest>;

    /// Decodes the provider's answer.
    ///
    /// # Errors
    ///
    /// Returns an error for non-success statuses and malformed bodies.
    fn decode_response(&self, status: u16, body: &[u8]) -> Result<ImageBatch>;
}
