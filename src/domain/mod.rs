//! Domain layer for the zpix plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image search result model
//!
//! # Examples
//!
//! ```
//! use zpix::domain::{ImageResult, Result};
//!
//! fn first_hit() -> Result<ImageResult> {
//!     Ok(ImageResult::new("preview.jpg", "large.jpg", "cat"))
//! }
//! ```

pub mod error;
pub mod image;

pub use error::{Result, ZpixError};
pub use image::{ImageBatch, ImageResult};
