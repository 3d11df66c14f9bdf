use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Query parameters accepted by the list endpoints.
///
/// `page` and `limit` are kept as raw strings so that garbage input falls back
/// to the defaults instead of rejecting the request. Extracted from the raw
/// query pairs (see `core::extractor`), where the first occurrence of a key wins.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring match on the region name
    #[param(example = "jawa")]
    pub search: Option<String>,

    /// Page number (1-indexed, default: 1)
    #[param(value_type = Option<i64>, minimum = 1)]
    pub page: Option<String>,

    /// Number of items per page (default: 10)
    #[param(value_type = Option<i64>, minimum = 1)]
    pub limit: Option<String>,
}

/// Positive integer from `raw`, or `default` when missing, unparsable or not positive
fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

impl ListQuery {
    /// Builds the query from decoded `key=value` pairs; unknown keys are ignored
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut query.search,
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub fn page(&self) -> i64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        positive_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE)
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Search term, `None` when absent or empty
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}
