//! Image result domain model.
//!
//! An [`ImageResult`] is one hit returned by the image search provider. The
//! search controller treats every field as opaque and only passes results
//! through to the presentation layer.

use serde::{Deserialize, Serialize};

/// One image returned by the search provider.
///
/// # Fields
///
/// - `id`: Provider identifier, `0` when the provider did not report one
/// - `preview_url`: Small rendition shown in the gallery
/// - `full_size_url`: Large rendition opened from the preview modal
/// - `description`: Comma-separated tags describing the image
/// - `page_url`: Provider page for the image, if reported
/// - `width` / `height`: Pixel dimensions of the full-size rendition, if reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub id: u64,
    pub preview_url: String,
    pub full_size_url: String,
    pub description: String,
    pub page_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageResult {
    /// Creates a result from the three fields every provider reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use zpix::domain::ImageResult;
    ///
    /// let image = ImageResult::new(
    ///     "https://cdn.example/cat_640.jpg",
    ///     "https://cdn.example/cat_1280.jpg",
    ///     "cat, kitten, pet",
    /// );
    /// assert_eq!(image.description, "cat, kitten, pet");
    /// assert!(image.dimensions().is_none());
    /// ```
    #[must_use]
    pub fn new(
        preview_url: impl Into<String>,
        full_size_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            preview_url: preview_url.into(),
            full_size_url: full_size_url.into(),
            description: description.into(),
            page_url: None,
            width: None,
            height: None,
        }
    }

    /// Returns `"WIDTHxHEIGHT"` when both dimensions are known.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        }
    }

    /// Short label for a gallery cell: the first tag, or `"untitled"`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.description
            .split(',')
            .map(str::trim)
            .find(|tag| !tag.is_empty())
            .unwrap_or("untitled")
    }
}

/// One page of results as reported by the provider.
///
/// `total_matches` is the number of hits the provider will serve for the query
/// across all pages. Exhaustion is decided from it, never from `items.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageBatch {
    pub items: Vec<ImageResult>,
    pub total_matches: u64,
}

impl ImageBatch {
    #[must_use]
    pub const fn new(items: Vec<ImageResult>, total_matches: u64) -> Self {
        Self {
            items,
            total_matches,
        }
    }
}
