//! Request identity for in-flight provider fetches.

use serde::{Deserialize, Serialize};

/// Identifies one provider request.
///
/// Issued by the controller when a fetch starts and echoed back with the
/// response. A response is merged only if its tag equals the controller's
/// current in-flight tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTag {
    /// Session epoch at issue time.
    pub epoch: u64,
    /// Normalized query the request was issued for.
    pub query: String,
    /// 1-based page requested.
    pub page: u32,
}

impl FetchTag {
    #[must_use]
    pub fn new(epoch: u64, query: impl Into<String>, page: u32) -> Self {
        Self {
            epoch,
            query: query.into(),
            page,
        }
    }
}
