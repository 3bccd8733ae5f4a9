//! Sandbox filesystem helpers.
//!
//! Zellij mounts the host filesystem under `/host`; these helpers translate
//! user-facing paths and locate the plugin's data directory.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
